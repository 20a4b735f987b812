//! Cart controller: product copies, cart lines, view state and totals.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cart::observer::Observers;
use crate::cart::{CartObserver, CartSnapshot, CartTotals, SubscriptionId};
use crate::catalog::{CatalogStore, Product};
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Owns the mutable copy of the catalog and everything derived from it.
///
/// Cart lines are product identifiers pointing into the copy collection, so
/// a line's `count` and `total` are always read from the one canonical
/// product record. All changes go through the operations below; each
/// successful one publishes a single [`CartSnapshot`] to every subscribed
/// observer. Failed operations leave the state untouched and publish nothing.
#[derive(Debug)]
pub struct CartController {
    catalog: Arc<CatalogStore>,
    tax_rate_bps: u32,
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
    cart: Vec<ProductId>,
    detail: Option<ProductId>,
    modal_open: bool,
    modal: Option<ProductId>,
    totals: CartTotals,
    observers: Observers,
}

impl CartController {
    /// Create a controller over a catalog, using the configured tax rate.
    pub fn new(catalog: Arc<CatalogStore>, config: &StoreConfig) -> Self {
        Self::with_tax_rate(catalog, config.tax_rate_bps)
    }

    /// Create a controller with an explicit tax rate in basis points.
    pub fn with_tax_rate(catalog: Arc<CatalogStore>, tax_rate_bps: u32) -> Self {
        let currency = catalog.currency();
        let mut controller = Self {
            catalog,
            tax_rate_bps,
            products: Vec::new(),
            index: HashMap::new(),
            cart: Vec::new(),
            detail: None,
            modal_open: false,
            modal: None,
            totals: CartTotals::zero(currency),
            observers: Observers::default(),
        };
        controller.copy_products();
        controller
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Replace the product collection with fresh copies of the catalog.
    ///
    /// Fresh copies are never in the cart, so any existing cart lines are
    /// dropped along with them.
    pub fn initialize_products(&mut self) -> CartSnapshot {
        self.copy_products();
        info!(products = self.products.len(), "products initialized");
        self.publish()
    }

    /// Show a product on the detail view.
    pub fn select_detail(&mut self, id: &ProductId) -> Result<CartSnapshot, StoreError> {
        self.product_index(id)
            .map_err(|e| rejected("select_detail", e))?;
        self.detail = Some(id.clone());
        debug!(product_id = %id, "detail selected");
        Ok(self.publish())
    }

    /// Put a product in the cart with a quantity of one.
    ///
    /// Adding a product that is already in the cart changes nothing and
    /// notifies no one.
    pub fn add_to_cart(&mut self, id: &ProductId) -> Result<CartSnapshot, StoreError> {
        let idx = self
            .product_index(id)
            .map_err(|e| rejected("add_to_cart", e))?;

        if self.products[idx].in_cart {
            debug!(product_id = %id, "already in cart, ignoring");
            return Ok(self.snapshot());
        }

        let total = self.products[idx]
            .line_total(1)
            .map_err(|e| rejected("add_to_cart", e))?;
        let product = &mut self.products[idx];
        product.in_cart = true;
        product.count = 1;
        product.total = total;
        self.cart.push(id.clone());

        if let Err(e) = self.recompute_totals() {
            self.cart.pop();
            self.products[idx].reset_cart_state();
            return Err(rejected("add_to_cart", e));
        }

        debug!(product_id = %id, "added to cart");
        Ok(self.publish())
    }

    /// Open the quick-view modal on a product.
    pub fn open_modal(&mut self, id: &ProductId) -> Result<CartSnapshot, StoreError> {
        self.product_index(id)
            .map_err(|e| rejected("open_modal", e))?;
        self.modal = Some(id.clone());
        self.modal_open = true;
        debug!(product_id = %id, "modal opened");
        Ok(self.publish())
    }

    /// Close the quick-view modal. The modal product is kept.
    pub fn close_modal(&mut self) -> CartSnapshot {
        self.modal_open = false;
        debug!("modal closed");
        self.publish()
    }

    /// Raise a cart line's quantity by one.
    pub fn increment(&mut self, id: &ProductId) -> Result<CartSnapshot, StoreError> {
        let (_, idx) = self
            .cart_position(id)
            .map_err(|e| rejected("increment", e))?;

        let count = self.products[idx]
            .count
            .checked_add(1)
            .ok_or(StoreError::Overflow)
            .map_err(|e| rejected("increment", e))?;
        self.set_line_count(idx, count)
            .map_err(|e| rejected("increment", e))?;

        debug!(product_id = %id, count, "incremented");
        Ok(self.publish())
    }

    /// Lower a cart line's quantity by one, removing the line at zero.
    pub fn decrement(&mut self, id: &ProductId) -> Result<CartSnapshot, StoreError> {
        let (_, idx) = self
            .cart_position(id)
            .map_err(|e| rejected("decrement", e))?;

        let count = self.products[idx].count.saturating_sub(1);
        if count == 0 {
            return self.remove_item(id);
        }
        self.set_line_count(idx, count)
            .map_err(|e| rejected("decrement", e))?;

        debug!(product_id = %id, count, "decremented");
        Ok(self.publish())
    }

    /// Drop a cart line and reset its product to the "not in cart" state.
    pub fn remove_item(&mut self, id: &ProductId) -> Result<CartSnapshot, StoreError> {
        let (position, idx) = self
            .cart_position(id)
            .map_err(|e| rejected("remove_item", e))?;

        self.cart.remove(position);
        self.products[idx].reset_cart_state();
        // A subset of summable lines is always summable.
        self.recompute_totals()?;

        debug!(product_id = %id, "removed from cart");
        Ok(self.publish())
    }

    /// Empty the cart and start over from fresh catalog copies.
    pub fn clear_cart(&mut self) -> CartSnapshot {
        let cleared = self.cart.len();
        self.cart.clear();
        self.copy_products();
        info!(lines = cleared, "cart cleared");
        self.publish()
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    /// Register an observer for state changes.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Current state as an owned snapshot.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            products: self.products.clone(),
            cart: self.lines().cloned().collect(),
            detail_product: self.resolve_or_placeholder(self.detail.as_ref()),
            modal_open: self.modal_open,
            modal_product: self.resolve_or_placeholder(self.modal.as_ref()),
            totals: self.totals,
            item_count: self.item_count(),
        }
    }

    /// The catalog this controller copies from.
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Product copies in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product copy.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).map(|&idx| &self.products[idx])
    }

    /// Look up a cart line.
    pub fn cart_line(&self, id: &ProductId) -> Option<&Product> {
        self.product(id).filter(|p| p.in_cart)
    }

    pub fn is_in_cart(&self, id: &ProductId) -> bool {
        self.cart_line(id).is_some()
    }

    /// Identifiers of the cart lines in insertion order.
    pub fn cart_ids(&self) -> &[ProductId] {
        &self.cart
    }

    pub fn totals(&self) -> CartTotals {
        self.totals
    }

    /// Sum of quantities over all cart lines.
    pub fn item_count(&self) -> u64 {
        self.lines().map(|line| u64::from(line.count)).sum()
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn tax_rate_bps(&self) -> u32 {
        self.tax_rate_bps
    }

    pub fn currency(&self) -> Currency {
        self.catalog.currency()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn copy_products(&mut self) {
        self.products = self
            .catalog
            .all()
            .iter()
            .map(Product::fresh_copy)
            .collect();
        self.index = self
            .products
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.id.clone(), idx))
            .collect();
        self.cart.clear();
        // Fresh copies are never in the cart.
        self.totals = CartTotals::zero(self.currency());
    }

    fn product_index(&self, id: &ProductId) -> Result<usize, StoreError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| StoreError::ProductNotFound(id.clone()))
    }

    /// Position in the cart line list and index into the product copies.
    fn cart_position(&self, id: &ProductId) -> Result<(usize, usize), StoreError> {
        let position = self
            .cart
            .iter()
            .position(|line| line == id)
            .ok_or_else(|| StoreError::NotInCart(id.clone()))?;
        let idx = self
            .index
            .get(id)
            .copied()
            .ok_or_else(|| StoreError::NotInCart(id.clone()))?;
        Ok((position, idx))
    }

    /// Set a line's quantity and total, rolling back if the totals overflow.
    fn set_line_count(&mut self, idx: usize, count: u32) -> Result<(), StoreError> {
        let total = self.products[idx].line_total(count)?;
        let previous = (self.products[idx].count, self.products[idx].total);
        self.write_line(idx, count, total);

        if let Err(e) = self.recompute_totals() {
            self.write_line(idx, previous.0, previous.1);
            return Err(e);
        }
        Ok(())
    }

    fn write_line(&mut self, idx: usize, count: u32, total: Money) {
        let product = &mut self.products[idx];
        product.count = count;
        product.total = total;
    }

    fn lines(&self) -> impl Iterator<Item = &Product> + '_ {
        self.cart.iter().filter_map(|id| self.product(id))
    }

    fn recompute_totals(&mut self) -> Result<(), StoreError> {
        let totals = CartTotals::compute(self.lines(), self.currency(), self.tax_rate_bps)?;
        self.totals = totals;
        debug!(
            subtotal_cents = totals.subtotal.amount_cents,
            tax_cents = totals.tax.amount_cents,
            total_cents = totals.total.amount_cents,
            "totals recomputed"
        );
        Ok(())
    }

    fn resolve_or_placeholder(&self, id: Option<&ProductId>) -> Product {
        id.and_then(|id| self.product(id))
            .unwrap_or_else(|| self.catalog.detail_placeholder())
            .clone()
    }

    fn publish(&self) -> CartSnapshot {
        let snapshot = self.snapshot();
        if !self.observers.is_empty() {
            self.observers.notify(&snapshot);
        }
        snapshot
    }
}

fn rejected(operation: &'static str, err: StoreError) -> StoreError {
    warn!(operation, error = %err, "operation rejected");
    err
}
