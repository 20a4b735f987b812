//! Behavioral properties of the cart controller, exercised through the public API.

use std::sync::Arc;

use proptest::prelude::*;
use store_core::prelude::*;

// =============================================================================
// Fixtures
// =============================================================================

fn catalog() -> Arc<CatalogStore> {
    let seed = SeedData::new(vec![
        SeedProduct::new(1, "Google Pixel - Black", 10.00).with_company("google"),
        SeedProduct::new(2, "Samsung S7", 25.00).with_colors(["black", "gold"]),
        SeedProduct::new(3, "HTC 10 - White", 18.99),
        SeedProduct::new(4, "Smashed Iphone", 0.15).with_image("img/product-8.png"),
    ]);
    Arc::new(CatalogStore::initialize(seed, Currency::USD).unwrap())
}

fn controller() -> CartController {
    CartController::new(catalog(), &StoreConfig::default())
}

fn id(n: u32) -> ProductId {
    ProductId::from(n)
}

fn totals_cents(snapshot: &CartSnapshot) -> (i64, i64, i64) {
    (
        snapshot.totals.subtotal.amount_cents,
        snapshot.totals.tax.amount_cents,
        snapshot.totals.total.amount_cents,
    )
}

/// Totals as they should be for the lines in a snapshot, computed independently.
fn expected_totals(snapshot: &CartSnapshot) -> (i64, i64, i64) {
    let subtotal: i64 = snapshot
        .cart
        .iter()
        .map(|line| line.price.amount_cents * i64::from(line.count))
        .sum();
    // round(subtotal * 0.10) to the cent, half away from zero
    let tax = (subtotal + 5) / 10;
    (subtotal, tax, subtotal + tax)
}

fn assert_consistent(cart: &CartController) {
    let snapshot = cart.snapshot();
    assert_eq!(totals_cents(&snapshot), expected_totals(&snapshot));

    for line in &snapshot.cart {
        assert!(line.in_cart);
        assert!(line.count >= 1);
        assert_eq!(snapshot.product(&line.id), Some(line));
    }
    for product in &snapshot.products {
        if product.in_cart {
            assert!(snapshot.cart_line(&product.id).is_some());
        } else {
            assert!(product.has_default_cart_state());
        }
    }
}

// =============================================================================
// Worked scenario
// =============================================================================

#[test]
fn two_product_scenario() {
    let seed = SeedData::new(vec![
        SeedProduct::new(1, "Phone A", 10.00),
        SeedProduct::new(2, "Phone B", 25.00),
    ]);
    let catalog = Arc::new(CatalogStore::initialize(seed, Currency::USD).unwrap());
    let mut cart = CartController::new(catalog, &StoreConfig::default());

    let snap = cart.add_to_cart(&id(1)).unwrap();
    assert_eq!(snap.cart.len(), 1);
    assert_eq!(snap.cart[0].count, 1);
    assert_eq!(snap.cart[0].total.amount_cents, 1000);
    assert_eq!(totals_cents(&snap), (1000, 100, 1100));

    let snap = cart.add_to_cart(&id(2)).unwrap();
    assert_eq!(totals_cents(&snap), (3500, 350, 3850));

    let snap = cart.increment(&id(2)).unwrap();
    let line = snap.cart_line(&id(2)).unwrap();
    assert_eq!((line.count, line.total.amount_cents), (2, 5000));
    assert_eq!(totals_cents(&snap), (6000, 600, 6600));

    let snap = cart.decrement(&id(1)).unwrap();
    assert!(snap.cart_line(&id(1)).is_none());
    assert_eq!(totals_cents(&snap), (5000, 500, 5500));

    let snap = cart.clear_cart();
    assert!(snap.cart.is_empty());
    assert_eq!(totals_cents(&snap), (0, 0, 0));
}

// =============================================================================
// Idempotent add
// =============================================================================

#[test]
fn add_twice_equals_add_once() {
    let mut once = controller();
    once.add_to_cart(&id(3)).unwrap();

    let mut twice = controller();
    twice.add_to_cart(&id(3)).unwrap();
    twice.add_to_cart(&id(3)).unwrap();

    assert_eq!(once.snapshot(), twice.snapshot());
    assert_eq!(twice.cart_ids().len(), 1);
}

// =============================================================================
// Decrement at one is removal
// =============================================================================

#[test]
fn decrement_at_one_equals_remove() {
    let mut decremented = controller();
    decremented.add_to_cart(&id(1)).unwrap();
    decremented.add_to_cart(&id(2)).unwrap();
    decremented.decrement(&id(2)).unwrap();

    let mut removed = controller();
    removed.add_to_cart(&id(1)).unwrap();
    removed.add_to_cart(&id(2)).unwrap();
    removed.remove_item(&id(2)).unwrap();

    assert_eq!(decremented.snapshot(), removed.snapshot());
    assert!(decremented.product(&id(2)).unwrap().has_default_cart_state());
}

// =============================================================================
// Clear resets everything cart-related
// =============================================================================

#[test]
fn clear_matches_fresh_controller() {
    let mut cart = controller();
    for n in 1..=4 {
        cart.add_to_cart(&id(n)).unwrap();
    }
    cart.increment(&id(2)).unwrap();
    cart.remove_item(&id(3)).unwrap();
    cart.add_to_cart(&id(3)).unwrap();
    cart.decrement(&id(4)).unwrap();

    let cleared = cart.clear_cart();
    let fresh = controller().snapshot();

    assert!(cleared.cart.is_empty());
    assert!(cleared.totals.is_zero());
    assert_eq!(cleared.products, fresh.products);
}

// =============================================================================
// Seed data is never touched
// =============================================================================

#[test]
fn catalog_unchanged_by_cart_activity() {
    let catalog = catalog();
    let before = catalog.as_ref().clone();
    let mut cart = CartController::new(Arc::clone(&catalog), &StoreConfig::default());

    cart.add_to_cart(&id(1)).unwrap();
    cart.increment(&id(1)).unwrap();
    assert_eq!(*catalog, before);
    cart.remove_item(&id(1)).unwrap();
    cart.add_to_cart(&id(2)).unwrap();
    cart.clear_cart();

    assert_eq!(*catalog, before);
    assert!(catalog.all().iter().all(Product::has_default_cart_state));
}

#[test]
fn snapshots_are_detached() {
    let mut cart = controller();
    let mut snap = cart.add_to_cart(&id(1)).unwrap();
    snap.cart[0].count = 99;
    snap.products[0].in_cart = false;

    assert_eq!(cart.cart_line(&id(1)).unwrap().count, 1);
    assert!(cart.product(&id(1)).unwrap().in_cart);
}

// =============================================================================
// Unknown identifiers
// =============================================================================

#[test]
fn unknown_identifier_is_not_found_and_changes_nothing() {
    let mut cart = controller();
    cart.add_to_cart(&id(1)).unwrap();
    cart.select_detail(&id(2)).unwrap();
    let before = cart.snapshot();
    let missing = ProductId::new("does-not-exist");

    let results = [
        cart.increment(&missing),
        cart.decrement(&missing),
        cart.remove_item(&missing),
        cart.select_detail(&missing),
    ];
    for result in results {
        let err = result.unwrap_err();
        assert!(err.is_not_found(), "unexpected error: {err}");
    }

    assert_eq!(cart.snapshot(), before);
}

#[test]
fn known_but_not_in_cart_is_not_found() {
    let mut cart = controller();
    let before = cart.snapshot();

    assert!(matches!(cart.increment(&id(2)), Err(StoreError::NotInCart(_))));
    assert!(matches!(cart.decrement(&id(2)), Err(StoreError::NotInCart(_))));
    assert!(matches!(cart.remove_item(&id(2)), Err(StoreError::NotInCart(_))));
    assert_eq!(cart.snapshot(), before);
}

// =============================================================================
// Totals under arbitrary operation sequences
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    Add(u32),
    Increment(u32),
    Decrement(u32),
    Remove(u32),
    Clear,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    // id 5 is not in the catalog
    let product = 1u32..=5;
    prop_oneof![
        3 => product.clone().prop_map(Op::Add),
        3 => product.clone().prop_map(Op::Increment),
        2 => product.clone().prop_map(Op::Decrement),
        1 => product.prop_map(Op::Remove),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn prop_totals_always_match_lines(ops in prop::collection::vec(arbitrary_op(), 0..60)) {
        let mut cart = controller();

        for op in ops {
            let before = cart.snapshot();
            let result = match op {
                Op::Add(n) => cart.add_to_cart(&id(n)).map(|_| ()),
                Op::Increment(n) => cart.increment(&id(n)).map(|_| ()),
                Op::Decrement(n) => cart.decrement(&id(n)).map(|_| ()),
                Op::Remove(n) => cart.remove_item(&id(n)).map(|_| ()),
                Op::Clear => {
                    cart.clear_cart();
                    Ok(())
                }
            };

            if let Err(err) = result {
                prop_assert!(err.is_not_found());
                prop_assert_eq!(cart.snapshot(), before);
            }

            let snapshot = cart.snapshot();
            prop_assert_eq!(totals_cents(&snapshot), expected_totals(&snapshot));
            let count: u64 = snapshot.cart.iter().map(|line| u64::from(line.count)).sum();
            prop_assert_eq!(snapshot.item_count, count);
            assert_consistent(&cart);
        }
    }
}
