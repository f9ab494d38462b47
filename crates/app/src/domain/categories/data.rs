//! Category Data

use crate::domain::categories::records::CategoryUuid;

/// New Category Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub parent_uuid: Option<CategoryUuid>,
}

/// Category Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryUpdate {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub parent_uuid: Option<CategoryUuid>,
}

/// Derive a URL slug from a display name.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Living Room"), "living-room");
    }

    #[test]
    fn slugify_collapses_internal_whitespace() {
        assert_eq!(slugify("  Oak   Tables "), "oak-tables");
    }
}
