//! Catalog Accessor - read-only item list with name search
//!
//! The catalog is loaded once and never changes for the process lifetime.
//! Search is a pure function of `(term, catalog)`.

use shared::order::Item;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Maximum number of search suggestions
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Read-only access to catalog items
pub trait CatalogAccessor: Send + Sync {
    /// All items in catalog order
    fn all(&self) -> &[Item];

    fn search_limit(&self) -> usize {
        DEFAULT_SEARCH_LIMIT
    }

    fn get(&self, id: &str) -> Option<&Item> {
        self.all().iter().find(|item| item.id == id)
    }

    /// Case-insensitive substring match on item names
    fn search(&self, term: &str) -> Vec<Item> {
        search_items(self.all(), term, self.search_limit())
    }
}

/// Case-insensitive substring search preserving catalog order
///
/// A blank term yields no suggestions rather than the whole catalog.
pub fn search_items(items: &[Item], term: &str, limit: usize) -> Vec<Item> {
    if term.trim().is_empty() {
        return Vec::new();
    }
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .take(limit)
        .cloned()
        .collect()
}

/// In-memory catalog
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    items: Vec<Item>,
    /// id -> position in `items`
    index: HashMap<String, usize>,
    search_limit: usize,
}

impl StaticCatalog {
    /// Build a catalog, validating IDs, names and discounts
    pub fn new(items: Vec<Item>) -> CatalogResult<Self> {
        let mut index = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            if item.id.trim().is_empty() {
                return Err(CatalogError::Invalid(format!("item at position {} has an empty id", pos)));
            }
            if item.name.trim().is_empty() {
                return Err(CatalogError::Invalid(format!("item {} has an empty name", item.id)));
            }
            if !(0.0..=1.0).contains(&item.discount) {
                return Err(CatalogError::Invalid(format!(
                    "item {} has discount {} outside [0, 1]",
                    item.id, item.discount
                )));
            }
            if index.insert(item.id.clone(), pos).is_some() {
                return Err(CatalogError::Invalid(format!("duplicate item id {}", item.id)));
            }
        }
        Ok(Self {
            items,
            index,
            search_limit: DEFAULT_SEARCH_LIMIT,
        })
    }

    /// Parse a JSON array of `{id, name, disc}` records
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let items: Vec<Item> = serde_json::from_str(json)?;
        Self::new(items)
    }

    /// Load the catalog from a JSON file
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), items = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CatalogAccessor for StaticCatalog {
    fn all(&self) -> &[Item] {
        &self.items
    }

    fn search_limit(&self) -> usize {
        self.search_limit
    }

    fn get(&self, id: &str) -> Option<&Item> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> StaticCatalog {
        StaticCatalog::new(vec![
            Item::new("1", "Panadol", 0.0),
            Item::new("2", "Brufen", 0.2),
        ])
        .unwrap()
    }

    #[test]
    fn test_search_matches_case_insensitively() {
        let catalog = sample_catalog();
        let results = catalog.search("pan");
        assert_eq!(results, vec![Item::new("1", "Panadol", 0.0)]);

        let results = catalog.search("BRU");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "2");
    }

    #[test]
    fn test_blank_term_yields_nothing() {
        let catalog = sample_catalog();
        assert!(catalog.search("").is_empty());
        assert!(catalog.search("   ").is_empty());
        assert!(catalog.search("\t\n").is_empty());
    }

    #[test]
    fn test_search_truncates_and_preserves_order() {
        let items: Vec<Item> = (1..=8)
            .map(|n| Item::new(n.to_string(), format!("Vitamin {}", n), 0.0))
            .collect();
        let catalog = StaticCatalog::new(items).unwrap();

        let results = catalog.search("vitamin");
        let ids: Vec<&str> = results.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);

        let catalog = catalog.with_search_limit(2);
        assert_eq!(catalog.search("vitamin").len(), 2);
    }

    #[test]
    fn test_search_no_match() {
        assert!(sample_catalog().search("zinc").is_empty());
    }

    #[test]
    fn test_get_by_id() {
        let catalog = sample_catalog();
        assert_eq!(catalog.get("2").map(|item| item.name.as_str()), Some("Brufen"));
        assert!(catalog.get("3").is_none());
    }

    #[test]
    fn test_from_json_normalizes_numeric_ids() {
        let catalog = StaticCatalog::from_json_str(
            r#"[{"id": 1, "name": "Panadol", "disc": 0}, {"id": 2, "name": "Brufen", "disc": 0.2}]"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.all()[1].id, "2");
        assert_eq!(catalog.all()[1].discount, 0.2);
    }

    #[test]
    fn test_rejects_invalid_catalogs() {
        let duplicate = StaticCatalog::new(vec![
            Item::new("1", "Panadol", 0.0),
            Item::new("1", "Brufen", 0.0),
        ]);
        assert!(matches!(duplicate, Err(CatalogError::Invalid(_))));

        let bad_discount = StaticCatalog::new(vec![Item::new("1", "Panadol", 1.5)]);
        assert!(matches!(bad_discount, Err(CatalogError::Invalid(_))));

        let blank_name = StaticCatalog::new(vec![Item::new("1", " ", 0.0)]);
        assert!(matches!(blank_name, Err(CatalogError::Invalid(_))));

        let malformed = StaticCatalog::from_json_str("{not json");
        assert!(matches!(malformed, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = StaticCatalog::load("/definitely/not/here/catalog.json");
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
