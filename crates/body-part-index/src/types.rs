//! Error and configuration types for building a body part index.

use body_part_types::{well_known, Code};
use thiserror::Error;

/// Errors that can occur while loading or querying a body part index.
///
/// Every build-time variant is fatal: no partially built index is ever
/// returned alongside it.
#[derive(Error, Debug)]
pub enum IndexError {
    /// I/O error reading the source document.
    #[error("IO error reading body part document: {0}")]
    Io(#[from] std::io::Error),

    /// The source document is not valid JSON.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// The document has no top-level `bodyParts` array.
    #[error("Document has no 'bodyParts' array")]
    MissingBodyParts,

    /// A record is missing a required field or has an invalid value.
    #[error("Malformed record #{position} ({id}): field '{field}' {reason}")]
    MalformedRecord {
        /// Position of the record in the document.
        position: usize,
        /// The record id, or `"?"` when the id itself is missing.
        id: String,
        /// The document field name.
        field: String,
        /// What is wrong with the field.
        reason: String,
    },

    /// Two records share an id.
    #[error("Duplicate body part id: {id}")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },

    /// Two code entries share a (system, code) pair.
    #[error("Duplicate code {code} on {id} (already assigned to {existing})")]
    DuplicateCode {
        /// The repeated code.
        code: Code,
        /// The record carrying the second occurrence.
        id: String,
        /// The record that already owns the code.
        existing: String,
    },

    /// The same bare code value appears under two coding systems.
    #[error("Duplicate code value '{code}' on {id} (already assigned to {existing})")]
    DuplicateCodeText {
        /// The repeated code value.
        code: String,
        /// The record carrying the second occurrence.
        id: String,
        /// The record that already owns the code value.
        existing: String,
    },

    /// A reference field names an id that is not in the catalog.
    #[error("Unresolved reference: {id}.{field} = {target}")]
    UnresolvedReference {
        /// The record holding the reference.
        id: String,
        /// The document field name.
        field: &'static str,
        /// The id that could not be resolved.
        target: String,
    },

    /// The designated root record is absent or not self-contained.
    #[error("Root record {root} is missing or not contained by itself")]
    MissingRoot {
        /// The designated root id.
        root: String,
    },

    /// A record other than the designated root is contained by itself.
    #[error("Record {id} is contained by itself but is not the root {root}")]
    MultipleRoots {
        /// The self-contained record.
        id: String,
        /// The designated root id.
        root: String,
    },

    /// The containment chain from a record never reaches the root.
    #[error("Containment cycle: chain from {id} does not reach the root within {limit} steps")]
    CyclicHierarchy {
        /// The record whose chain failed to terminate.
        id: String,
        /// The step bound (the record count).
        limit: usize,
    },

    /// A left/right/unsided triple disagrees with itself.
    #[error("Inconsistent sidedness: {id}.{field} = {target}, {reason}")]
    InconsistentSidedness {
        /// The record holding the reference.
        id: String,
        /// The document field name.
        field: &'static str,
        /// The referenced id.
        target: String,
        /// What the other side of the triple says instead.
        reason: String,
    },

    /// A strict lookup found no record with the given id.
    #[error("No body part with id {id}")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },
}

/// Result type for index operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// Configuration for building a body part index.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Id of the record that terminates every ancestor chain.
    pub root_id: String,
    /// Whether to reject catalogs whose sidedness triples disagree.
    pub validate_sidedness: bool,
    /// Whether text search ignores letter case.
    pub case_insensitive_search: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            root_id: well_known::WHOLE_BODY_ID.to_string(),
            validate_sidedness: true,
            case_insensitive_search: false,
        }
    }
}

impl IndexConfig {
    /// Creates a config that accepts inconsistent sidedness triples.
    pub fn lenient() -> Self {
        Self {
            validate_sidedness: false,
            ..Self::default()
        }
    }

    /// Creates a config with case-insensitive text search.
    pub fn case_insensitive() -> Self {
        Self {
            case_insensitive_search: true,
            ..Self::default()
        }
    }

    /// Normalizes a search token or query according to this config.
    pub(crate) fn normalize_text(&self, text: &str) -> String {
        if self.case_insensitive_search {
            text.to_lowercase()
        } else {
            text.to_string()
        }
    }
}

/// Counts gathered while building an index.
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    /// Records in the catalog.
    pub record_count: usize,
    /// Distinct (system, code) pairs.
    pub code_count: usize,
    /// Distinct search tokens.
    pub token_count: usize,
    /// Deepest containment chain (root depth is zero).
    pub max_depth: usize,
    /// Time taken to build in milliseconds.
    pub build_time_ms: u64,
}
