//! Normalized body part record.

use std::fmt;

use crate::{Code, SexSpecific};

/// A normalized anatomic location record.
///
/// Each record is a node in the containment hierarchy (`contained_by_id`)
/// and optionally in the part-of hierarchy (`part_of_id`). Sided concepts
/// are tied to their generic concept through `unsided_id`, `left_id` and
/// `right_id`.
///
/// # Examples
///
/// ```
/// use body_part_types::{BodyPartRecord, well_known};
///
/// let root = BodyPartRecord::new(
///     well_known::WHOLE_BODY_ID,
///     "whole body",
///     well_known::WHOLE_BODY_ID,
/// );
///
/// assert!(root.is_root());
/// assert_eq!(root.to_string(), "RID39569: whole body");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BodyPartRecord {
    /// Catalog-unique identifier (a RadLex id).
    #[cfg_attr(feature = "serde", serde(rename = "radlexId"))]
    pub id: String,
    /// Preferred display term.
    pub description: String,
    /// Identifier of the immediate containment parent.
    pub contained_by_id: String,
    /// External codes, in document order.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub codes: Vec<Code>,
    /// Alternate terms.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub synonyms: Vec<String>,
    /// Identifier of the generic (unsided) concept.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub unsided_id: Option<String>,
    /// Identifier of the left-sided variant.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub left_id: Option<String>,
    /// Identifier of the right-sided variant.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub right_id: Option<String>,
    /// Identifier of the parent in the part-of hierarchy.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub part_of_id: Option<String>,
    /// Sex phenotype restriction, if any.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub sex_specific: Option<SexSpecific>,
}

impl BodyPartRecord {
    /// Creates a record with the required fields and every optional field empty.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        contained_by_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            contained_by_id: contained_by_id.into(),
            codes: Vec::new(),
            synonyms: Vec::new(),
            unsided_id: None,
            left_id: None,
            right_id: None,
            part_of_id: None,
            sex_specific: None,
        }
    }

    /// Returns true if this record contains itself (the hierarchy root).
    pub fn is_root(&self) -> bool {
        self.id == self.contained_by_id
    }

    /// Returns the first code value directly assigned under `system`.
    pub fn code_for(&self, system: &str) -> Option<&str> {
        self.codes
            .iter()
            .find(|c| c.is_system(system))
            .map(|c| c.code.as_str())
    }

    /// Returns true if this record is a left or right variant.
    pub fn is_sided(&self) -> bool {
        self.unsided_id.is_some()
    }

    /// Iterates over every id this record references, paired with the
    /// document field name it came from.
    pub fn references(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("containedById", Some(self.contained_by_id.as_str())),
            ("partOfId", self.part_of_id.as_deref()),
            ("unsidedId", self.unsided_id.as_deref()),
            ("leftId", self.left_id.as_deref()),
            ("rightId", self.right_id.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, id)| id.map(|id| (field, id)))
    }
}

impl fmt::Display for BodyPartRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_pelvis() -> BodyPartRecord {
        BodyPartRecord {
            codes: vec![
                Code::new("FMA", "9578"),
                Code::new("SNOMED", "12921003"),
                Code::new("SNOMED", "99999999"),
            ],
            part_of_id: Some("RID1".to_string()),
            ..BodyPartRecord::new("RID2507", "pelvis", "RID39569")
        }
    }

    #[test]
    fn test_code_for_returns_first_match() {
        let pelvis = make_pelvis();
        assert_eq!(pelvis.code_for("SNOMED"), Some("12921003"));
        assert_eq!(pelvis.code_for("FMA"), Some("9578"));
        assert_eq!(pelvis.code_for("UMLS"), None);
    }

    #[test]
    fn test_references_skip_absent_fields() {
        let pelvis = make_pelvis();
        let refs: Vec<_> = pelvis.references().collect();
        assert_eq!(
            refs,
            vec![("containedById", "RID39569"), ("partOfId", "RID1")]
        );
    }

    #[test]
    fn test_root_and_sided() {
        let pelvis = make_pelvis();
        assert!(!pelvis.is_root());
        assert!(!pelvis.is_sided());

        let left = BodyPartRecord {
            unsided_id: Some("RID294".to_string()),
            ..BodyPartRecord::new("RID294_RID5824", "left uterine adnexa", "RID2507")
        };
        assert!(left.is_sided());
    }
}
