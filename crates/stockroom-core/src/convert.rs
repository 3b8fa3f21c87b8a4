// ── API-to-domain type conversions ──
//
// Bridges raw `stockroom_api` records into canonical `Product`s: derives
// the id from the name, reads loosely typed quantities, and collapses
// duplicate names so ids stay unique.

use indexmap::IndexMap;
use tracing::warn;

use stockroom_api::{NumberOrText, RawProduct};

use crate::model::{Price, Product, ProductId};

// ── Helpers ────────────────────────────────────────────────────────

/// Read a quantity that may be a number or a string.
///
/// Fractions are truncated. Negative, non-finite, or unparseable values
/// become `0`.
fn parse_quantity(raw: &NumberOrText) -> Option<u32> {
    let n = match raw {
        NumberOrText::Number(n) => *n,
        NumberOrText::Text(s) => s.trim().parse::<f64>().ok()?,
    };
    if !n.is_finite() || n < 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
    let q = n.trunc().min(f64::from(u32::MAX)) as u32;
    Some(q)
}

fn to_price(raw: NumberOrText) -> Price {
    match raw {
        NumberOrText::Number(n) => Price::Amount(n),
        NumberOrText::Text(s) => Price::Text(s),
    }
}

// ── Product ────────────────────────────────────────────────────────

impl From<RawProduct> for Product {
    fn from(raw: RawProduct) -> Self {
        let quantity = parse_quantity(&raw.quantity).unwrap_or_else(|| {
            warn!(product = %raw.name, quantity = %raw.quantity, "unusable quantity, using 0");
            0
        });

        Product {
            id: ProductId::new(raw.name.clone()),
            name: raw.name,
            category: raw.category,
            price: to_price(raw.price),
            quantity,
            is_disabled: false,
        }
    }
}

/// Convert a whole catalog payload, keeping first-seen order.
///
/// A later record with an already-seen name replaces the earlier one in
/// its original position.
pub fn products_from_raw(raw: Vec<RawProduct>) -> IndexMap<ProductId, Product> {
    let mut out = IndexMap::with_capacity(raw.len());
    for record in raw {
        let product = Product::from(record);
        if let Some(previous) = out.insert(product.id.clone(), product) {
            warn!(product = %previous.id, "duplicate product name in catalog, keeping the later record");
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> Vec<RawProduct> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn maps_records_to_enabled_products() {
        let products = products_from_raw(raw(json!([
            { "name": "Bluetooth", "category": "Electronic", "price": "$150", "quantity": 5 }
        ])));
        let p = &products[0];
        assert_eq!(p.id.as_str(), "Bluetooth");
        assert_eq!(p.price, Price::Text("$150".into()));
        assert_eq!(p.quantity, 5);
        assert!(!p.is_disabled);
    }

    #[test]
    fn quantity_is_read_leniently() {
        let products = products_from_raw(raw(json!([
            { "name": "a", "category": "c", "price": 1, "quantity": "12" },
            { "name": "b", "category": "c", "price": 1, "quantity": 3.9 },
            { "name": "c", "category": "c", "price": 1, "quantity": -4 },
            { "name": "d", "category": "c", "price": 1, "quantity": "lots" },
            { "name": "e", "category": "c", "price": 1, "quantity": " 7 " }
        ])));
        let q: Vec<u32> = products.values().map(|p| p.quantity).collect();
        assert_eq!(q, vec![12, 3, 0, 0, 7]);
    }

    #[test]
    fn duplicate_names_keep_position_of_first() {
        let products = products_from_raw(raw(json!([
            { "name": "a", "category": "old", "price": 1, "quantity": 1 },
            { "name": "b", "category": "c", "price": 1, "quantity": 1 },
            { "name": "a", "category": "new", "price": 2, "quantity": 2 }
        ])));
        assert_eq!(products.len(), 2);
        let first = &products[0];
        assert_eq!(first.id.as_str(), "a");
        assert_eq!(first.category, "new");
    }
}
