//! # body-part-index
//!
//! In-memory index over a catalog of anatomic location records.
//!
//! The index is built once from a body part JSON document and is read-only
//! afterwards. It supports lookup by id, by external code, and by bare code
//! value, substring search over ids, descriptions, synonyms, and codes, and
//! navigation of the containment, part-of, and sidedness relationships.
//!
//! ## Usage
//!
//! ```rust
//! use body_part_index::{BodyPartIndex, IndexConfig};
//!
//! let json = r#"{"bodyParts": [
//!     {"radlexId": "RID39569", "description": "whole body", "containedById": "RID39569"},
//!     {"radlexId": "RID56", "description": "abdomen", "containedById": "RID39569",
//!      "codes": [{"system": "SNOMED", "code": "818983003"}]}
//! ]}"#;
//!
//! let index = BodyPartIndex::from_json_str(json, IndexConfig::default()).unwrap();
//!
//! let abdomen = index.get("818983003").unwrap();
//! assert_eq!(abdomen.description, "abdomen");
//! assert_eq!(abdomen.contained_by(), index.root());
//! assert_eq!(index.search("abdo").len(), 1);
//! ```
//!
//! ## Features
//!
//! - `parallel` (default): scans the text index with rayon during search.

#![warn(missing_docs)]

mod entity;
mod index;
pub mod loader;
pub mod parser;
mod types;

pub use entity::BodyPart;
pub use index::BodyPartIndex;
pub use loader::{read_document, read_document_from};
pub use parser::{parse_document, JsonRecord};
pub use types::{IndexConfig, IndexError, IndexResult, IndexStats};

// Re-export body-part-types for convenience
pub use body_part_types;
pub use body_part_types::{well_known, BodyPartRecord, Code, SexSpecific};
