//! Product and seed entry types.

use crate::error::StoreError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Deserializer, Serialize};

/// A purchasable product together with its cart state.
///
/// Catalog entries always carry the "not in cart" defaults. The cart
/// controller works on its own copies and is the only place the cart
/// fields ever change.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Product {
    /// Unique, stable product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Image reference (path or URL), opaque to the store.
    pub image: String,
    /// Available color variants.
    pub colors: Vec<String>,
    /// Manufacturer.
    pub company: Option<String>,
    /// Long description for the detail view.
    pub info: Option<String>,
    /// Whether the product currently has a cart line.
    pub in_cart: bool,
    /// Quantity in the cart, 0 when not in cart.
    pub count: u32,
    /// `price * count`, 0 when not in cart.
    pub total: Money,
}

impl Product {
    /// Produce an independent copy with cart fields reset.
    pub fn fresh_copy(&self) -> Product {
        let mut copy = self.clone();
        copy.reset_cart_state();
        copy
    }

    /// Return the cart fields to their "not in cart" defaults.
    pub fn reset_cart_state(&mut self) {
        self.in_cart = false;
        self.count = 0;
        self.total = Money::zero(self.price.currency);
    }

    /// Line total for a given quantity.
    pub fn line_total(&self, count: u32) -> Result<Money, StoreError> {
        self.price
            .try_multiply(i64::from(count))
            .ok_or(StoreError::Overflow)
    }

    /// True when the cart fields hold the "not in cart" defaults.
    pub fn has_default_cart_state(&self) -> bool {
        !self.in_cart && self.count == 0 && self.total.is_zero()
    }
}

/// A product as it appears in seed data.
///
/// Cart-related fields present in the input (`inCart`, `count`, `total`)
/// are ignored; every seeded product starts outside the cart.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SeedProduct {
    /// Identifier, numeric or string in the source document.
    #[serde(deserialize_with = "deserialize_product_id")]
    pub id: ProductId,
    /// Product name.
    #[serde(alias = "title")]
    pub name: String,
    /// Decimal unit price in the store currency.
    pub price: f64,
    /// Image reference.
    #[serde(default, alias = "img")]
    pub image: String,
    /// Color variants.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Manufacturer.
    #[serde(default)]
    pub company: Option<String>,
    /// Long description.
    #[serde(default)]
    pub info: Option<String>,
}

impl SeedProduct {
    /// Create a seed entry with only the required fields.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: String::new(),
            colors: Vec::new(),
            company: None,
            info: None,
        }
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the color variants.
    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Set the manufacturer.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Convert into a catalog product, validating the price.
    ///
    /// Rejects negative prices, including ones that would round to zero, and
    /// prices too large to represent in minor units.
    pub fn into_product(self, currency: Currency) -> Result<Product, StoreError> {
        if !self.price.is_finite() {
            return Err(StoreError::Seed(format!(
                "price for {} is not a finite number",
                self.id
            )));
        }
        let price = match Money::try_from_decimal(self.price, currency) {
            Some(price) if self.price >= 0.0 && !price.is_negative() => price,
            _ => {
                return Err(StoreError::InvalidPrice {
                    id: self.id,
                    price: self.price,
                })
            }
        };
        Ok(Product {
            id: self.id,
            name: self.name,
            price,
            image: self.image,
            colors: self.colors,
            company: self.company,
            info: self.info,
            in_cart: false,
            count: 0,
            total: Money::zero(currency),
        })
    }
}

fn deserialize_product_id<'de, D>(deserializer: D) -> Result<ProductId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => ProductId::new(n.to_string()),
        RawId::Text(s) => ProductId::new(s),
    })
}
