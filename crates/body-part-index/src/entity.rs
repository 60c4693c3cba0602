//! Borrowed view of one record inside a built index.
//!
//! A [`BodyPart`] is a record slot paired with a shared reference to its
//! [`BodyPartIndex`]. It owns nothing; every relationship is answered from
//! the index's precomputed tables.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use body_part_types::{well_known, BodyPartRecord};

use crate::index::BodyPartIndex;

/// A body part resolved against its index.
///
/// Dereferences to the underlying [`BodyPartRecord`], so record fields are
/// available directly (`part.id`, `part.codes`, ...). Equality and hashing
/// use the record id.
#[derive(Clone, Copy)]
pub struct BodyPart<'a> {
    index: &'a BodyPartIndex,
    slot: usize,
}

impl<'a> BodyPart<'a> {
    pub(crate) fn new(index: &'a BodyPartIndex, slot: usize) -> Self {
        Self { index, slot }
    }

    fn at(&self, slot: usize) -> BodyPart<'a> {
        BodyPart::new(self.index, slot)
    }

    fn resolve(&self, id: Option<&str>) -> Option<BodyPart<'a>> {
        id.and_then(|id| self.index.slot_of(id)).map(|slot| self.at(slot))
    }

    /// Returns the underlying record.
    pub fn record(&self) -> &'a BodyPartRecord {
        self.index.record_at(self.slot)
    }

    /// Parent in the containment hierarchy. The root is its own parent.
    pub fn contained_by(&self) -> BodyPart<'a> {
        self.at(self.index.parent_slot(self.slot))
    }

    /// Parent in the part-of hierarchy.
    pub fn part_of(&self) -> Option<BodyPart<'a>> {
        self.resolve(self.record().part_of_id.as_deref())
    }

    /// Left-sided variant.
    pub fn left(&self) -> Option<BodyPart<'a>> {
        self.resolve(self.record().left_id.as_deref())
    }

    /// Right-sided variant.
    pub fn right(&self) -> Option<BodyPart<'a>> {
        self.resolve(self.record().right_id.as_deref())
    }

    /// Generic concept this sided variant belongs to.
    pub fn unsided(&self) -> Option<BodyPart<'a>> {
        self.resolve(self.record().unsided_id.as_deref())
    }

    /// Body parts directly contained by this one.
    pub fn children(&self) -> HashSet<BodyPart<'a>> {
        self.index
            .child_slots(self.slot)
            .iter()
            .map(|&slot| self.at(slot))
            .collect()
    }

    /// Body parts transitively contained by this one.
    pub fn descendants(&self) -> HashSet<BodyPart<'a>> {
        self.index
            .descendant_slots(self.slot)
            .iter()
            .map(|&slot| self.at(slot))
            .collect()
    }

    /// Number of descendants, without materializing them.
    pub fn descendant_count(&self) -> usize {
        self.index.descendant_slots(self.slot).len()
    }

    /// Containment ancestors, nearest first, ending with the root.
    ///
    /// Empty for the root itself.
    pub fn ancestors(&self) -> Vec<BodyPart<'a>> {
        self.index
            .ancestor_slots(self.slot)
            .iter()
            .map(|&slot| self.at(slot))
            .collect()
    }

    /// Returns true if `other` is directly contained by this body part.
    pub fn is_child(&self, other: &BodyPart<'_>) -> bool {
        other.id != self.id && other.contained_by_id == self.id
    }

    /// Returns true if `other` is among this body part's ancestors.
    pub fn is_contained(&self, other: &BodyPart<'_>) -> bool {
        self.index
            .ancestor_slots(self.slot)
            .iter()
            .any(|&slot| self.index.record_at(slot).id == other.id)
    }

    /// Most specific SNOMED CT code for this body part.
    ///
    /// Checks, in order: a code assigned to this record, a code assigned to
    /// its unsided concept, a code assigned to its immediate containing
    /// parent. Codes are never inherited from further up the hierarchy.
    pub fn snomed_code(&self) -> Option<&'a str> {
        let direct = |part: BodyPart<'a>| part.record().code_for(well_known::SNOMED_SYSTEM);

        direct(*self)
            .or_else(|| self.unsided().and_then(direct))
            .or_else(|| direct(self.contained_by()))
    }
}

impl Deref for BodyPart<'_> {
    type Target = BodyPartRecord;

    fn deref(&self) -> &Self::Target {
        self.record()
    }
}

impl PartialEq for BodyPart<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for BodyPart<'_> {}

impl Hash for BodyPart<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for BodyPart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BodyPart").field(&self.id).finish()
    }
}

impl fmt::Display for BodyPart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.record(), f)
    }
}
