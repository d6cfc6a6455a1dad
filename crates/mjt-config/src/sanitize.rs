//! Category mesh sanitizing configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Object categories of the iTHOR asset set.
const DEFAULT_CATEGORIES: &[&str] = &[
    "Microwave",
    "Fridge",
    "Toaster",
    "Dresser",
    "Light_Switch",
    "Toilet",
    "Book",
    "Shelving_Unit",
    "Side_Table",
    "Coffee_Table",
    "Desk",
    "Laptop",
    "Doorway",
    "Laundry_Hamper",
    "Safe",
    "Box",
];

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(ToString::to_string).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SanitizeConfig {
    /// Mesh files named `<category>_<n>` are candidates for renaming.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

impl SanitizeConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "sanitize.categories".to_string(),
                reason: "category names must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_list_all_categories() {
        let config = SanitizeConfig::default();
        assert_eq!(config.categories.len(), 16);
        assert!(config.categories.iter().any(|c| c == "Shelving_Unit"));
    }
}
