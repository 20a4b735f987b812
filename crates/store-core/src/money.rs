//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. Floats only appear
//! at the seed boundary, where decimal prices are converted once.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Denominator for rates expressed in basis points.
pub const BASIS_POINTS: i128 = 10_000;

/// Supported currencies.
///
/// A store runs in exactly one currency; this only controls formatting.
/// Every supported currency has two decimal places, so tax always rounds
/// to the hundredth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// Returns None for NaN, infinities and amounts whose minor-unit value
    /// does not fit in an `i64`.
    ///
    /// ```
    /// use store_core::money::{Money, Currency};
    /// let price = Money::try_from_decimal(49.99, Currency::USD).unwrap();
    /// assert_eq!(price.amount_cents, 4999);
    /// assert!(Money::try_from_decimal(1e20, Currency::USD).is_none());
    /// ```
    pub fn try_from_decimal(amount: f64, currency: Currency) -> Option<Self> {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let scaled = (amount * multiplier as f64).round();
        // i64::MAX as f64 rounds up to 2^63, which is already out of range.
        if !scaled.is_finite() || scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
            return None;
        }
        Some(Self::new(scaled as i64, currency))
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_u64.pow(places);
        let abs = self.amount_cents.unsigned_abs();
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        format!(
            "{sign}{}.{:0width$}",
            abs / divisor,
            abs % divisor,
            width = places as usize
        )
    }

    /// Try to add another Money value.
    ///
    /// Returns None if currencies don't match or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount_cents.checked_add(other.amount_cents)?;
        Some(Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        let amount = self.amount_cents.checked_mul(factor)?;
        Some(Money::new(amount, self.currency))
    }

    /// Take a rate expressed in basis points (1000 = 10%).
    ///
    /// Rounds half away from zero to the nearest minor unit. Returns None
    /// if the result does not fit.
    pub fn try_percentage_bps(&self, rate_bps: u32) -> Option<Money> {
        let scaled = i128::from(self.amount_cents) * i128::from(rate_bps);
        let mut quotient = scaled / BASIS_POINTS;
        let remainder = scaled % BASIS_POINTS;
        if remainder.abs() * 2 >= BASIS_POINTS {
            quotient += scaled.signum();
        }
        let amount = i64::try_from(quotient).ok()?;
        Some(Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values, returning None on overflow or currency mismatch.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
