// ── Product ──
//
// A single inventory line item. The catalog identifies products by name,
// so `ProductId` is derived from the name at load time and never changes
// afterwards, even if an edit renames the product.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ProductId ───────────────────────────────────────────────────────

/// Stable, unique key of a product within the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProductId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ── Price ───────────────────────────────────────────────────────────

/// A product price as it was last written.
///
/// The catalog sends either a number or a formatted string such as
/// `"$1,190.00"`. The text form is kept for display until an edit
/// normalizes it; arithmetic always goes through [`Price::amount`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Text(String),
}

impl Price {
    /// Plain numeric value of this price. Unparseable text is `0.0`.
    pub fn amount(&self) -> f64 {
        match self {
            Self::Amount(n) if n.is_finite() => *n,
            Self::Amount(_) => 0.0,
            Self::Text(s) => normalize_price(s),
        }
    }

    /// Collapse to the numeric form.
    pub fn normalized(&self) -> Self {
        Self::Amount(self.amount())
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::Amount(0.0)
    }
}

impl From<f64> for Price {
    fn from(n: f64) -> Self {
        Self::Amount(n)
    }
}

impl From<&str> for Price {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Strip everything except ASCII digits and `.` and parse the result.
///
/// Parsing stops at a second `.` (`"1.2.3"` reads as `1.2`). Anything that
/// still fails to parse, or parses to a non-finite value, is `0.0`.
pub fn normalize_price(raw: &str) -> f64 {
    let mut cleaned = String::with_capacity(raw.len());
    let mut seen_dot = false;
    for c in raw.chars() {
        if c.is_ascii_digit() {
            cleaned.push(c);
        } else if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
            cleaned.push(c);
        }
    }

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

// ── Product ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Price,
    pub quantity: u32,
    pub is_disabled: bool,
}

impl Product {
    /// An enabled product whose id is its name.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: impl Into<Price>,
        quantity: u32,
    ) -> Self {
        let name = name.into();
        Self {
            id: ProductId::new(name.clone()),
            name,
            category: category.into(),
            price: price.into(),
            quantity,
            is_disabled: false,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.is_disabled
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }

    /// Stock value: normalized price times quantity.
    pub fn value(&self) -> f64 {
        self.price.amount() * f64::from(self.quantity)
    }

    /// Like [`value`](Self::value), but zero while the product is disabled.
    pub fn effective_value(&self) -> f64 {
        if self.is_disabled { 0.0 } else { self.value() }
    }
}
