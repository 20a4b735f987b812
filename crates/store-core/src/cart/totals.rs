//! Cart totals calculation.

use crate::catalog::Product;
use crate::error::StoreError;
use crate::money::{Currency, Money};
use serde::Serialize;

/// Subtotal, tax and grand total for a cart.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of all line totals.
    pub subtotal: Money,
    /// Tax on the subtotal, rounded to the minor unit.
    pub tax: Money,
    /// Subtotal plus tax.
    pub total: Money,
}

impl CartTotals {
    /// All-zero totals for an empty cart.
    pub fn zero(currency: Currency) -> Self {
        Self {
            subtotal: Money::zero(currency),
            tax: Money::zero(currency),
            total: Money::zero(currency),
        }
    }

    /// Compute totals from scratch over the given cart lines.
    ///
    /// Never adjusts previous totals incrementally; the result depends only
    /// on the lines passed in.
    pub fn compute<'a>(
        lines: impl Iterator<Item = &'a Product>,
        currency: Currency,
        tax_rate_bps: u32,
    ) -> Result<Self, StoreError> {
        let subtotal =
            Money::try_sum(lines.map(|line| &line.total), currency).ok_or(StoreError::Overflow)?;
        let tax = subtotal
            .try_percentage_bps(tax_rate_bps)
            .ok_or(StoreError::Overflow)?;
        let total = subtotal.try_add(&tax).ok_or(StoreError::Overflow)?;

        Ok(Self {
            subtotal,
            tax,
            total,
        })
    }

    /// True when every amount is zero.
    pub fn is_zero(&self) -> bool {
        self.subtotal.is_zero() && self.tax.is_zero() && self.total.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SeedProduct;

    fn line(id: u32, price: f64, count: u32) -> Product {
        let mut product = SeedProduct::new(id, "Phone", price)
            .into_product(Currency::USD)
            .unwrap();
        product.in_cart = true;
        product.count = count;
        product.total = product.line_total(count).unwrap();
        product
    }

    #[test]
    fn test_empty_cart_is_zero() {
        let totals = CartTotals::compute(std::iter::empty(), Currency::USD, 1000).unwrap();
        assert!(totals.is_zero());
        assert_eq!(totals, CartTotals::zero(Currency::USD));
    }

    #[test]
    fn test_ten_percent_tax() {
        let lines = [line(1, 10.0, 1), line(2, 25.0, 2)];
        let totals = CartTotals::compute(lines.iter(), Currency::USD, 1000).unwrap();
        assert_eq!(totals.subtotal.amount_cents, 6000);
        assert_eq!(totals.tax.amount_cents, 600);
        assert_eq!(totals.total.amount_cents, 6600);
    }

    #[test]
    fn test_tax_rounded_to_cents() {
        // 10% of $12.35 is $1.235
        let lines = [line(1, 12.35, 1)];
        let totals = CartTotals::compute(lines.iter(), Currency::USD, 1000).unwrap();
        assert_eq!(totals.tax.amount_cents, 124);
        assert_eq!(totals.total.amount_cents, 1359);
    }

    #[test]
    fn test_subtotal_overflow() {
        let mut big = line(1, 1.0, 1);
        big.total = Money::new(i64::MAX, Currency::USD);
        let lines = [big, line(2, 1.0, 1)];
        let err = CartTotals::compute(lines.iter(), Currency::USD, 1000).unwrap_err();
        assert!(matches!(err, StoreError::Overflow));
    }
}
