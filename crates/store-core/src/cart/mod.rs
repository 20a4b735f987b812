//! Shopping cart module.
//!
//! Contains the cart controller, its totals, snapshots, and change observers.

mod controller;
mod observer;
mod snapshot;
mod totals;

pub use controller::CartController;
pub use observer::{CartObserver, SubscriptionId};
pub use snapshot::CartSnapshot;
pub use totals::CartTotals;
