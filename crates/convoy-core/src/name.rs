use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Case-insensitive configuration identifier.
///
/// Environment and pipeline names preserve the spelling they were authored
/// with but compare and hash on the lowercased form, so `Production` and
/// `PRODUCTION` refer to the same entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigName(String);

impl ConfigName {
    /// Create a new name from any string-like value
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name exactly as authored
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used for comparison
    pub fn to_lower(&self) -> String {
        self.0.to_lowercase()
    }

    /// Whether the name is usable as a configuration identifier: non-empty,
    /// letters, digits, `-`, `_` and `.` only
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    }
}

impl PartialEq for ConfigName {
    fn eq(&self, other: &Self) -> bool {
        self.to_lower() == other.to_lower()
    }
}

impl Eq for ConfigName {}

impl Hash for ConfigName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_lower().hash(state);
    }
}

impl fmt::Display for ConfigName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConfigName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ConfigName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_equality() {
        assert_eq!(ConfigName::from("Production"), ConfigName::from("pRoDucTioN"));
        assert_ne!(ConfigName::from("staging"), ConfigName::from("production"));
    }

    #[test]
    fn test_display_preserves_authored_case() {
        assert_eq!(ConfigName::from("UAT-West").to_string(), "UAT-West");
    }

    #[test]
    fn test_well_formed() {
        assert!(ConfigName::from("env-1.prod_x").is_well_formed());
        assert!(!ConfigName::from("").is_well_formed());
        assert!(!ConfigName::from("has space").is_well_formed());
        assert!(!ConfigName::from("semi;colon").is_well_formed());
    }
}
