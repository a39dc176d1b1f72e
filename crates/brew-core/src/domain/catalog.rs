use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Attribute families an admin manages in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Region,
    Variety,
    Process,
    BrewingMethod,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Region,
        Category::Variety,
        Category::Process,
        Category::BrewingMethod,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Region => "region",
            Category::Variety => "variety",
            Category::Process => "process",
            Category::BrewingMethod => "brewing_method",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::UnknownCategory(s.to_string()))
    }
}

/// A catalog record as listed on the admin panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub category: Category,
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i32,
}

/// Body of a catalog create/update request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogDraft {
    pub category: Category,
    pub value: String,
    pub label: String,
    pub description: String,
    pub is_active: bool,
    pub display_order: i32,
}

impl CatalogDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.value.trim().is_empty() || self.label.trim().is_empty() {
            return Err(DomainError::Validation(
                "value and label are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// One dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogOption {
    pub value: String,
    pub label: String,
}

impl CatalogOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Active dropdown options per category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    options: BTreeMap<Category, Vec<CatalogOption>>,
}

impl Catalog {
    /// Build from the wire map, skipping categories this client does not know.
    pub fn from_raw(raw: BTreeMap<String, Vec<CatalogOption>>) -> Self {
        let options = raw
            .into_iter()
            .filter_map(|(key, values)| key.parse::<Category>().ok().map(|c| (c, values)))
            .collect();
        Self { options }
    }

    pub fn insert(&mut self, category: Category, options: Vec<CatalogOption>) {
        self.options.insert(category, options);
    }

    pub fn options(&self, category: Category) -> &[CatalogOption] {
        self.options
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.options.values().all(Vec::is_empty)
    }

    /// Map a stored attribute value onto a current dropdown value.
    ///
    /// Exact value match first, then a case-insensitive match on the label,
    /// then a case-insensitive match on the value. Cases saved before a
    /// catalog edit still select the right entry.
    pub fn reconcile(&self, category: Category, stored: &str) -> Option<String> {
        let stored = stored.trim();
        if stored.is_empty() {
            return None;
        }
        let options = self.options(category);

        if let Some(opt) = options.iter().find(|o| o.value == stored) {
            return Some(opt.value.clone());
        }

        let lowered = stored.to_lowercase();
        options
            .iter()
            .find(|o| o.label.to_lowercase() == lowered)
            .or_else(|| options.iter().find(|o| o.value.to_lowercase() == lowered))
            .map(|o| o.value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::default();
        catalog.insert(
            Category::Region,
            vec![
                CatalogOption::new("sarchi", "Sarchí"),
                CatalogOption::new("tarrazu", "Tarrazú"),
            ],
        );
        catalog
    }

    #[test]
    fn test_category_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!("roast".parse::<Category>().is_err());
    }

    #[test]
    fn test_reconcile_exact_value() {
        assert_eq!(
            catalog().reconcile(Category::Region, "tarrazu"),
            Some("tarrazu".to_string())
        );
    }

    #[test]
    fn test_reconcile_by_label_case_insensitive() {
        assert_eq!(
            catalog().reconcile(Category::Region, "SARCHÍ"),
            Some("sarchi".to_string())
        );
    }

    #[test]
    fn test_reconcile_unknown_value() {
        assert_eq!(catalog().reconcile(Category::Region, "naranjo"), None);
        assert_eq!(catalog().reconcile(Category::Variety, "sarchi"), None);
        assert_eq!(catalog().reconcile(Category::Region, "  "), None);
    }

    #[test]
    fn test_from_raw_skips_unknown_categories() {
        let raw: BTreeMap<String, Vec<CatalogOption>> = serde_json::from_str(
            r#"{"region":[{"value":"sarchi","label":"Sarchí"}],"roast":[{"value":"x","label":"X"}]}"#,
        )
        .unwrap();

        let catalog = Catalog::from_raw(raw);
        assert_eq!(catalog.options(Category::Region).len(), 1);
        assert!(catalog.options(Category::Process).is_empty());
    }
}
