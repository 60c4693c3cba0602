//! Enumerations for coded record attributes.

use std::fmt;

/// Sex phenotype a body part concept is restricted to.
///
/// # Examples
///
/// ```
/// use body_part_types::SexSpecific;
///
/// assert_eq!(SexSpecific::from_label("Female"), Some(SexSpecific::Female));
/// assert_eq!(SexSpecific::from_label("female"), None);
/// assert_eq!(SexSpecific::Male.as_str(), "Male");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SexSpecific {
    /// Concept only exists in female anatomy.
    Female,
    /// Concept only exists in male anatomy.
    Male,
}

impl SexSpecific {
    /// Label used for the female phenotype in source documents.
    pub const FEMALE_LABEL: &'static str = "Female";
    /// Label used for the male phenotype in source documents.
    pub const MALE_LABEL: &'static str = "Male";

    /// Creates a SexSpecific from its document label.
    ///
    /// Returns `None` if the label is not recognized. Matching is exact.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            Self::FEMALE_LABEL => Some(Self::Female),
            Self::MALE_LABEL => Some(Self::Male),
            _ => None,
        }
    }

    /// Returns the document label for this phenotype.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Female => Self::FEMALE_LABEL,
            Self::Male => Self::MALE_LABEL,
        }
    }
}

impl fmt::Display for SexSpecific {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
