//! The read-only catalog seeded once at startup.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::catalog::{Product, SeedProduct};
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::ids::ProductId;
use crate::money::Currency;

/// Seed catalog shipped with the crate.
const BUNDLED_SEED: &str = include_str!("../../data/products.json");

/// Seed input for the catalog.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SeedData {
    /// Purchasable products, in display order.
    pub products: Vec<SeedProduct>,
    /// Product shown on the detail view before anything is selected.
    #[serde(default)]
    pub detail: Option<SeedProduct>,
}

impl SeedData {
    /// Seed from a product list with no explicit detail placeholder.
    pub fn new(products: Vec<SeedProduct>) -> Self {
        Self {
            products,
            detail: None,
        }
    }

    /// Set the detail placeholder.
    pub fn with_detail(mut self, detail: SeedProduct) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Parse a seed document.
    ///
    /// Accepts either `{"products": [...], "detail": {...}}` or a bare array
    /// of products.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum SeedDocument {
            Full(SeedData),
            List(Vec<SeedProduct>),
        }

        Ok(match serde_json::from_str(json)? {
            SeedDocument::Full(seed) => seed,
            SeedDocument::List(products) => SeedData::new(products),
        })
    }
}

/// Immutable list of purchasable products.
///
/// Nothing mutates the store after [`CatalogStore::initialize`]; the cart
/// controller copies entries out of it instead.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogStore {
    products: Vec<Product>,
    detail_placeholder: Product,
    currency: Currency,
}

impl CatalogStore {
    /// Build the store from seed data.
    ///
    /// Fails on duplicate identifiers, negative prices, or a seed with no
    /// products and no explicit detail placeholder.
    pub fn initialize(seed: SeedData, currency: Currency) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(seed.products.len());
        let mut products = Vec::with_capacity(seed.products.len());

        for entry in seed.products {
            if !seen.insert(entry.id.clone()) {
                return Err(StoreError::DuplicateProduct(entry.id));
            }
            products.push(entry.into_product(currency)?);
        }

        let detail_placeholder = match seed.detail {
            Some(detail) => detail.into_product(currency)?,
            None => products.first().cloned().ok_or(StoreError::EmptyCatalog)?,
        };

        info!(
            products = products.len(),
            currency = %currency,
            "catalog initialized"
        );

        Ok(Self {
            products,
            detail_placeholder,
            currency,
        })
    }

    /// Build the store from a JSON seed document.
    pub fn from_json(json: &str, currency: Currency) -> Result<Self, StoreError> {
        Self::initialize(SeedData::from_json(json)?, currency)
    }

    /// Build the store from a JSON seed file.
    pub fn load(path: impl AsRef<Path>, currency: Currency) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content, currency)
    }

    /// Build the store from the seed shipped with the crate.
    pub fn bundled(currency: Currency) -> Result<Self, StoreError> {
        Self::from_json(BUNDLED_SEED, currency)
    }

    /// Build the store from the configured seed file, or the bundled seed.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        match &config.seed_path {
            Some(path) => Self::load(path, config.currency),
            None => Self::bundled(config.currency),
        }
    }

    /// All catalog products in seed order.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a seed entry by id.
    pub fn find(&self, id: &ProductId) -> Result<&Product, StoreError> {
        self.products
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| StoreError::ProductNotFound(id.clone()))
    }

    /// The product shown on the detail view before any selection.
    pub fn detail_placeholder(&self) -> &Product {
        &self.detail_placeholder
    }

    /// Currency of every price in the catalog.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_phones() -> SeedData {
        SeedData::new(vec![
            SeedProduct::new(1, "Google Pixel", 10.0),
            SeedProduct::new(2, "Samsung S7", 25.0),
        ])
    }

    #[test]
    fn test_find() {
        let store = CatalogStore::initialize(two_phones(), Currency::USD).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.find(&ProductId::new("2")).unwrap().name, "Samsung S7");

        let err = store.find(&ProductId::new("does-not-exist")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_placeholder_defaults_to_first_product() {
        let store = CatalogStore::initialize(two_phones(), Currency::USD).unwrap();
        assert_eq!(store.detail_placeholder().id, ProductId::new("1"));

        let seed = two_phones().with_detail(SeedProduct::new("detail", "Placeholder", 0.0));
        let store = CatalogStore::initialize(seed, Currency::USD).unwrap();
        assert_eq!(store.detail_placeholder().id, ProductId::new("detail"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let seed = SeedData::new(vec![
            SeedProduct::new(1, "A", 1.0),
            SeedProduct::new("1", "B", 2.0),
        ]);
        let err = CatalogStore::initialize(seed, Currency::USD).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateProduct(id) if id.as_str() == "1"));
    }

    #[test]
    fn test_empty_catalog() {
        let err = CatalogStore::initialize(SeedData::default(), Currency::USD).unwrap_err();
        assert!(matches!(err, StoreError::EmptyCatalog));

        let seed = SeedData::default().with_detail(SeedProduct::new("d", "Placeholder", 0.0));
        let store = CatalogStore::initialize(seed, Currency::USD).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_bare_array_seed() {
        let store = CatalogStore::from_json(
            r#"[{"id": 1, "title": "Pixel", "price": 10}]"#,
            Currency::USD,
        )
        .unwrap();
        assert_eq!(store.all()[0].price.amount_cents, 1000);
    }

    #[test]
    fn test_malformed_seed() {
        let err = CatalogStore::from_json("{\"products\": 4}", Currency::USD).unwrap_err();
        assert!(matches!(err, StoreError::Seed(_)));
    }

    #[test]
    fn test_bundled_seed_loads() {
        let store = CatalogStore::bundled(Currency::USD).unwrap();
        assert!(!store.is_empty());
        assert!(store.all().iter().all(Product::has_default_cart_state));
    }
}
