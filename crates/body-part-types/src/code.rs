//! External coding-system identifier.

use std::fmt;

/// A code from an external coding system, such as SNOMED CT or FMA.
///
/// Equality and hashing cover both the system and the code value, so
/// `("FMA", "9578")` and `("SNOMED", "9578")` are distinct codes.
///
/// # Examples
///
/// ```
/// use body_part_types::Code;
///
/// let code = Code::new("SNOMED", "12921003");
/// assert_eq!(code.system, "SNOMED");
/// assert_eq!(code.to_string(), "SNOMED:12921003");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Code {
    /// Name of the coding system (e.g. `"SNOMED"`, `"FMA"`, `"UMLS"`).
    pub system: String,
    /// The code value within the system.
    pub code: String,
}

impl Code {
    /// Creates a new code.
    pub fn new(system: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            code: code.into(),
        }
    }

    /// Returns true if this code belongs to the given coding system.
    pub fn is_system(&self, system: &str) -> bool {
        self.system == system
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.system, self.code)
    }
}
