//! Product catalog module.
//!
//! Contains the product type, seed input types, and the read-only catalog store.

mod product;
mod store;

pub use product::{Product, SeedProduct};
pub use store::{CatalogStore, SeedData};
