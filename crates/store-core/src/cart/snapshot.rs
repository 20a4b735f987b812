//! Immutable view of the controller state.

use serde::Serialize;

use crate::cart::CartTotals;
use crate::catalog::Product;
use crate::ids::ProductId;

/// Full observable state of a cart controller at one point in time.
///
/// Owns its data; changing a snapshot never touches the controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSnapshot {
    /// Product copies in catalog order.
    pub products: Vec<Product>,
    /// Cart lines in the order they were added.
    pub cart: Vec<Product>,
    /// Product on the detail view.
    pub detail_product: Product,
    /// Whether the quick-view modal is open.
    pub modal_open: bool,
    /// Product in the quick-view modal.
    pub modal_product: Product,
    /// Derived monetary totals.
    pub totals: CartTotals,
    /// Sum of quantities over all cart lines.
    pub item_count: u64,
}

impl CartSnapshot {
    /// Find a cart line by product id.
    pub fn cart_line(&self, id: &ProductId) -> Option<&Product> {
        self.cart.iter().find(|line| &line.id == id)
    }

    /// Find a product copy by id.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn is_cart_empty(&self) -> bool {
        self.cart.is_empty()
    }
}
