//! Store error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors that can occur in catalog and cart operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Product not found in the catalog or the controller's product copies.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    NotInCart(ProductId),

    /// Two seed entries share an identifier.
    #[error("Duplicate product id in seed data: {0}")]
    DuplicateProduct(ProductId),

    /// A seed entry carries a negative or unrepresentable price.
    #[error("Invalid price for {id}: {price}")]
    InvalidPrice { id: ProductId, price: f64 },

    /// The seed has no products and no explicit detail placeholder.
    #[error("Catalog is empty and has no detail placeholder")]
    EmptyCatalog,

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Seed data could not be parsed.
    #[error("Seed error: {0}")]
    Seed(String),

    /// Configuration could not be parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// Reading a seed or config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// True for failures caused by an identifier missing from the relevant collection.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::ProductNotFound(_) | StoreError::NotInCart(_))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Seed(e.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(e: toml::de::Error) -> Self {
        StoreError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(e: toml::ser::Error) -> Self {
        StoreError::Config(e.to_string())
    }
}
