//! # body-part-types
//!
//! Type definitions for anatomic location records.
//!
//! This crate provides the plain data types shared by the index and its
//! front-ends: coded identifiers, normalized body part records, and the
//! well-known identifiers every catalog relies on.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Field names follow the published JSON document (`radlexId`,
//!   `containedById`, ...).
//!
//! ## Usage
//!
//! ```rust
//! use body_part_types::{BodyPartRecord, Code, well_known};
//!
//! let pelvis = BodyPartRecord {
//!     codes: vec![Code::new("SNOMED", "12921003")],
//!     ..BodyPartRecord::new("RID2507", "pelvis", well_known::WHOLE_BODY_ID)
//! };
//!
//! assert_eq!(pelvis.code_for(well_known::SNOMED_SYSTEM), Some("12921003"));
//! assert!(!pelvis.is_root());
//! ```

#![warn(missing_docs)]

mod code;
mod enums;
mod record;
pub mod well_known;

// Re-export all public types at crate root
pub use code::Code;
pub use enums::SexSpecific;
pub use record::BodyPartRecord;
