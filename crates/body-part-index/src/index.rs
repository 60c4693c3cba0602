//! In-memory body part index.
//!
//! Builds every lookup table from a flat record list in one sequential pass,
//! validates the catalog, and precomputes the containment closure so that
//! hierarchy queries are plain table reads.
//!
//! ```ignore
//! let index = BodyPartIndex::from_path("body_parts.json", IndexConfig::default())?;
//!
//! let pelvis = index.get_by_id("RID2507")?;
//! for child in pelvis.children() {
//!     println!("{child}");
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use body_part_types::{BodyPartRecord, Code};
use serde_json::Value;

use crate::entity::BodyPart;
use crate::loader::{read_document, read_document_from};
use crate::parser::parse_document;
use crate::types::{IndexConfig, IndexError, IndexResult, IndexStats};

/// Read-only index over a catalog of body part records.
///
/// Records live in an arena in document order; every table maps to arena
/// slots. Once built the index is never mutated, so it can be shared across
/// threads freely.
///
/// # Example
///
/// ```ignore
/// use body_part_index::{BodyPartIndex, IndexConfig};
///
/// let index = BodyPartIndex::from_path("body_parts.json", IndexConfig::default())?;
///
/// if let Some(abdomen) = index.get("818983003") {
///     println!("Found: {abdomen}");
/// }
/// ```
pub struct BodyPartIndex {
    config: IndexConfig,
    /// Records in document order.
    records: Vec<BodyPartRecord>,
    /// Slot of each record by id.
    by_id: HashMap<String, usize>,
    /// Slot by (system, code).
    by_code: HashMap<Code, usize>,
    /// Slot by bare code value, regardless of system.
    by_code_text: HashMap<String, usize>,
    /// Search token -> slots of records producing it.
    text_index: HashMap<String, Vec<usize>>,
    /// Slot of the containment parent, per slot.
    parents: Vec<usize>,
    /// Direct containment children, per slot.
    children: Vec<Vec<usize>>,
    /// Containment ancestors from the parent up to the root, per slot.
    ancestors: Vec<Vec<usize>>,
    /// Transitive containment descendants, per slot.
    descendants: Vec<HashSet<usize>>,
    root: usize,
    stats: IndexStats,
}

impl std::fmt::Debug for BodyPartIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BodyPartIndex")
            .field("records", &self.records.len())
            .field("by_code", &self.by_code.len())
            .field("by_code_text", &self.by_code_text.len())
            .field("text_index", &self.text_index.len())
            .field("root", &self.records[self.root].id)
            .finish()
    }
}

impl BodyPartIndex {
    // ═══════════════════════════════════════════════════════════════════════════
    // CONSTRUCTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Builds an index from a body part JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P, config: IndexConfig) -> IndexResult<Self> {
        let document = read_document(path)?;
        Self::from_value(&document, config)
    }

    /// Builds an index from a reader producing a body part JSON document.
    pub fn from_reader<R: Read>(reader: R, config: IndexConfig) -> IndexResult<Self> {
        let document = read_document_from(reader)?;
        Self::from_value(&document, config)
    }

    /// Builds an index from a body part JSON document held in a string.
    pub fn from_json_str(json: &str, config: IndexConfig) -> IndexResult<Self> {
        let document: Value = serde_json::from_str(json)?;
        Self::from_value(&document, config)
    }

    /// Builds an index from an already parsed body part document.
    pub fn from_value(document: &Value, config: IndexConfig) -> IndexResult<Self> {
        let records = parse_document(document)?;
        Self::from_records(records, config)
    }

    /// Builds an index from normalized records.
    ///
    /// # Errors
    /// Fails on the first duplicate id, duplicate code, duplicate bare code
    /// value, unresolved reference, root violation, containment cycle, or
    /// (when enabled) inconsistent sidedness triple.
    pub fn from_records(records: Vec<BodyPartRecord>, config: IndexConfig) -> IndexResult<Self> {
        let start = Instant::now();

        match Self::build(records, config) {
            Ok(mut index) => {
                index.stats.build_time_ms = start.elapsed().as_millis() as u64;
                tracing::info!(
                    "Indexed {} body parts ({} codes, {} search tokens, depth {}) in {} ms",
                    index.stats.record_count,
                    index.stats.code_count,
                    index.stats.token_count,
                    index.stats.max_depth,
                    index.stats.build_time_ms
                );
                Ok(index)
            }
            Err(e) => {
                tracing::warn!("Body part index build failed: {}", e);
                Err(e)
            }
        }
    }

    fn build(records: Vec<BodyPartRecord>, config: IndexConfig) -> IndexResult<Self> {
        let count = records.len();
        let mut index = Self {
            config,
            records: Vec::with_capacity(count),
            by_id: HashMap::with_capacity(count),
            by_code: HashMap::with_capacity(count),
            by_code_text: HashMap::with_capacity(count),
            text_index: HashMap::new(),
            parents: Vec::new(),
            children: Vec::new(),
            ancestors: Vec::new(),
            descendants: Vec::new(),
            root: 0,
            stats: IndexStats::default(),
        };

        for record in records {
            index.insert_record(record)?;
        }
        index.resolve_parents()?;
        index.check_references()?;
        index.root = index.find_root()?;
        index.build_closure()?;
        if index.config.validate_sidedness {
            index.check_sidedness()?;
        }

        index.stats.record_count = index.records.len();
        index.stats.code_count = index.by_code.len();
        index.stats.token_count = index.text_index.len();
        Ok(index)
    }

    /// Adds one record to the id, code, and text tables.
    fn insert_record(&mut self, record: BodyPartRecord) -> IndexResult<()> {
        let slot = self.records.len();

        if self.by_id.contains_key(&record.id) {
            return Err(IndexError::DuplicateId { id: record.id });
        }
        self.by_id.insert(record.id.clone(), slot);

        for code in &record.codes {
            if let Some(&existing) = self.by_code.get(code) {
                return Err(IndexError::DuplicateCode {
                    code: code.clone(),
                    id: record.id.clone(),
                    existing: self.existing_id(existing, slot, &record),
                });
            }
            if let Some(&existing) = self.by_code_text.get(&code.code) {
                return Err(IndexError::DuplicateCodeText {
                    code: code.code.clone(),
                    id: record.id.clone(),
                    existing: self.existing_id(existing, slot, &record),
                });
            }
            self.by_code.insert(code.clone(), slot);
            self.by_code_text.insert(code.code.clone(), slot);
        }

        let tokens = std::iter::once(&record.id)
            .chain(std::iter::once(&record.description))
            .chain(record.synonyms.iter())
            .chain(record.codes.iter().map(|c| &c.code));
        for token in tokens {
            let slots = self
                .text_index
                .entry(self.config.normalize_text(token))
                .or_default();
            if slots.last() != Some(&slot) {
                slots.push(slot);
            }
        }

        self.records.push(record);
        Ok(())
    }

    /// Id of an already indexed slot, which may be the record being inserted.
    fn existing_id(&self, existing: usize, slot: usize, pending: &BodyPartRecord) -> String {
        if existing == slot {
            pending.id.clone()
        } else {
            self.records[existing].id.clone()
        }
    }

    fn resolve_parents(&mut self) -> IndexResult<()> {
        let mut parents = Vec::with_capacity(self.records.len());
        for record in &self.records {
            let parent = self.by_id.get(&record.contained_by_id).copied().ok_or_else(|| {
                IndexError::UnresolvedReference {
                    id: record.id.clone(),
                    field: "containedById",
                    target: record.contained_by_id.clone(),
                }
            })?;
            parents.push(parent);
        }
        self.parents = parents;
        Ok(())
    }

    fn check_references(&self) -> IndexResult<()> {
        for record in &self.records {
            for (field, target) in record.references() {
                if !self.by_id.contains_key(target) {
                    return Err(IndexError::UnresolvedReference {
                        id: record.id.clone(),
                        field,
                        target: target.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn find_root(&self) -> IndexResult<usize> {
        let root_id = &self.config.root_id;
        let root = self
            .by_id
            .get(root_id)
            .copied()
            .filter(|&slot| self.records[slot].is_root())
            .ok_or_else(|| IndexError::MissingRoot {
                root: root_id.clone(),
            })?;

        if let Some(other) = self
            .records
            .iter()
            .find(|r| r.is_root() && &r.id != root_id)
        {
            return Err(IndexError::MultipleRoots {
                id: other.id.clone(),
                root: root_id.clone(),
            });
        }

        Ok(root)
    }

    /// Precomputes children, ancestors, and descendants for every slot.
    ///
    /// Each chain walk is bounded by the record count; a walk that exceeds
    /// it never reaches the root.
    fn build_closure(&mut self) -> IndexResult<()> {
        let count = self.records.len();
        let mut children = vec![Vec::new(); count];
        let mut ancestors = Vec::with_capacity(count);
        let mut descendants = vec![HashSet::new(); count];
        let mut max_depth = 0;

        for slot in 0..count {
            if slot != self.root {
                children[self.parents[slot]].push(slot);
            }

            let mut chain = Vec::new();
            let mut current = slot;
            while current != self.root {
                if chain.len() >= count {
                    return Err(IndexError::CyclicHierarchy {
                        id: self.records[slot].id.clone(),
                        limit: count,
                    });
                }
                current = self.parents[current];
                chain.push(current);
            }

            for &ancestor in &chain {
                descendants[ancestor].insert(slot);
            }
            max_depth = max_depth.max(chain.len());
            ancestors.push(chain);
        }

        self.children = children;
        self.ancestors = ancestors;
        self.descendants = descendants;
        self.stats.max_depth = max_depth;
        Ok(())
    }

    /// Checks that every left/right/unsided reference is mirrored by the
    /// other members of its triple.
    fn check_sidedness(&self) -> IndexResult<()> {
        for record in &self.records {
            let inconsistent = |field: &'static str, target: &str, reason: String| {
                IndexError::InconsistentSidedness {
                    id: record.id.clone(),
                    field,
                    target: target.to_string(),
                    reason,
                }
            };

            if let Some(unsided_id) = &record.unsided_id {
                let unsided = self.record_by_id(unsided_id)?;
                let named = unsided.left_id.as_deref() == Some(record.id.as_str())
                    || unsided.right_id.as_deref() == Some(record.id.as_str());
                if !named {
                    return Err(inconsistent(
                        "unsidedId",
                        unsided_id,
                        format!("which names {} as neither leftId nor rightId", record.id),
                    ));
                }
                for (field, sibling, expected) in [
                    ("leftId", &record.left_id, &unsided.left_id),
                    ("rightId", &record.right_id, &unsided.right_id),
                ] {
                    if let Some(sibling) = sibling {
                        if expected.as_ref() != Some(sibling) {
                            return Err(inconsistent(
                                field,
                                sibling,
                                format!("but {unsided_id}.{field} is {expected:?}"),
                            ));
                        }
                    }
                }
            } else {
                for (field, sided_id) in [("leftId", &record.left_id), ("rightId", &record.right_id)]
                {
                    if let Some(sided_id) = sided_id {
                        let sided = self.record_by_id(sided_id)?;
                        if sided.unsided_id.as_ref() != Some(&record.id) {
                            return Err(inconsistent(
                                field,
                                sided_id,
                                format!("but {sided_id}.unsidedId is {:?}", sided.unsided_id),
                            ));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn record_by_id(&self, id: &str) -> IndexResult<&BodyPartRecord> {
        self.slot_of(id)
            .map(|slot| &self.records[slot])
            .ok_or_else(|| IndexError::NotFound { id: id.to_string() })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // QUERIES
    // ═══════════════════════════════════════════════════════════════════════════

    /// Gets a body part by id.
    ///
    /// # Errors
    /// Returns [`IndexError::NotFound`] if no record has this id.
    pub fn get_by_id(&self, id: &str) -> IndexResult<BodyPart<'_>> {
        self.slot_of(id)
            .map(|slot| self.entity(slot))
            .ok_or_else(|| IndexError::NotFound { id: id.to_string() })
    }

    /// Gets a body part by an exact (system, code) pair.
    pub fn get_by_code(&self, system: &str, code: &str) -> Option<BodyPart<'_>> {
        self.by_code
            .get(&Code::new(system, code))
            .map(|&slot| self.entity(slot))
    }

    /// Gets a body part by id, falling back to a bare code value.
    pub fn get(&self, id_or_code: &str) -> Option<BodyPart<'_>> {
        self.slot_of(id_or_code)
            .or_else(|| self.by_code_text.get(id_or_code).copied())
            .map(|slot| self.entity(slot))
    }

    /// Finds every body part with an id, description, synonym, or code value
    /// containing `query` as a substring.
    ///
    /// Matching is case-sensitive unless the index was built with
    /// [`IndexConfig::case_insensitive_search`]. An empty query matches
    /// every record.
    pub fn search(&self, query: &str) -> HashSet<BodyPart<'_>> {
        let query = self.config.normalize_text(query);

        #[cfg(feature = "parallel")]
        let slots: HashSet<usize> = self
            .text_index
            .par_iter()
            .filter(|(token, _)| token.contains(query.as_str()))
            .flat_map_iter(|(_, slots)| slots.iter().copied())
            .collect();

        #[cfg(not(feature = "parallel"))]
        let slots: HashSet<usize> = self
            .text_index
            .iter()
            .filter(|(token, _)| token.contains(query.as_str()))
            .flat_map(|(_, slots)| slots.iter().copied())
            .collect();

        slots.into_iter().map(|slot| self.entity(slot)).collect()
    }

    /// Iterates over every body part in document order.
    pub fn get_all(&self) -> impl Iterator<Item = BodyPart<'_>> + '_ {
        (0..self.records.len()).map(move |slot| self.entity(slot))
    }

    /// Returns the root of the containment hierarchy.
    pub fn root(&self) -> BodyPart<'_> {
        self.entity(self.root)
    }

    /// Returns true if a record with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the config the index was built with.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Returns the counts gathered during the build.
    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    /// Iterates over every indexed search token.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.text_index.keys().map(String::as_str)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SLOT ACCESS (used by BodyPart)
    // ═══════════════════════════════════════════════════════════════════════════

    fn entity(&self, slot: usize) -> BodyPart<'_> {
        BodyPart::new(self, slot)
    }

    pub(crate) fn slot_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub(crate) fn record_at(&self, slot: usize) -> &BodyPartRecord {
        &self.records[slot]
    }

    pub(crate) fn parent_slot(&self, slot: usize) -> usize {
        self.parents[slot]
    }

    pub(crate) fn child_slots(&self, slot: usize) -> &[usize] {
        &self.children[slot]
    }

    pub(crate) fn ancestor_slots(&self, slot: usize) -> &[usize] {
        &self.ancestors[slot]
    }

    pub(crate) fn descendant_slots(&self, slot: usize) -> &HashSet<usize> {
        &self.descendants[slot]
    }
}
