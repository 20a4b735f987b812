//! Catalog and cart state for the phone store.
//!
//! This crate holds everything the storefront UI reads and mutates:
//!
//! - **Catalog**: the read-only product list seeded once at startup
//! - **Cart**: the controller owning product copies, cart lines, detail and
//!   modal selection, and derived totals
//! - **Config**: tax rate, currency and seed location
//!
//! Rendering is not part of this crate. A UI holds a [`CartController`],
//! calls its operations, and subscribes to the snapshots it publishes.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use store_core::prelude::*;
//!
//! let seed = SeedData::new(vec![
//!     SeedProduct::new(1, "Google Pixel", 10.00),
//!     SeedProduct::new(2, "Samsung S7", 25.00),
//! ]);
//! let catalog = Arc::new(CatalogStore::initialize(seed, Currency::USD)?);
//! let mut cart = CartController::new(catalog, &StoreConfig::default());
//!
//! cart.add_to_cart(&ProductId::from(1))?;
//! let snapshot = cart.add_to_cart(&ProductId::from(2))?;
//! assert_eq!(snapshot.totals.total.display(), "$38.50");
//! # Ok::<(), StoreError>(())
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;

pub use cart::CartController;
pub use error::StoreError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::StoreConfig;
    pub use crate::error::StoreError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{CatalogStore, Product, SeedData, SeedProduct};

    // Cart
    pub use crate::cart::{CartController, CartObserver, CartSnapshot, CartTotals, SubscriptionId};
}
