//! Well-known identifiers.
//!
//! # Examples
//!
//! ```
//! use body_part_types::well_known;
//!
//! assert_eq!(well_known::WHOLE_BODY_ID, "RID39569");
//! ```

/// RadLex identifier of the whole body (RID39569).
///
/// The single root of the containment hierarchy. The root record is the
/// only one whose `containedById` is its own id.
pub const WHOLE_BODY_ID: &str = "RID39569";

/// Coding system name for SNOMED CT codes.
pub const SNOMED_SYSTEM: &str = "SNOMED";

/// Coding system name for Foundational Model of Anatomy codes.
pub const FMA_SYSTEM: &str = "FMA";

/// Coding system name for UMLS concept identifiers.
pub const UMLS_SYSTEM: &str = "UMLS";

/// Coding system name for MeSH tree numbers.
pub const MESH_SYSTEM: &str = "MESH";
