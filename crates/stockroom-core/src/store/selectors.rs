// ── Derived views ──
//
// Pure functions of an `InventoryState`. Aggregates count active
// products only; disabled products stay listed but drop out of totals.

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{Product, ProductId};

use super::state::InventoryState;

/// Products at or below this quantity are listed as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Headline numbers for the dashboard widgets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InventoryStats {
    pub total_products: usize,
    pub active_products: usize,
    pub total_value: f64,
    pub out_of_stock: usize,
    pub categories: usize,
}

impl InventoryStats {
    /// `total_value` with two decimals, as shown on the dashboard.
    pub fn total_value_display(&self) -> String {
        format!("{:.2}", self.total_value)
    }
}

/// Per-category rollup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub products: usize,
    pub active_products: usize,
    pub quantity: u64,
    pub value: f64,
}

impl InventoryState {
    pub fn product_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn active_products(&self) -> impl Iterator<Item = &Product> {
        self.products.values().filter(|p| p.is_active())
    }

    pub fn total_value(&self) -> f64 {
        // f64's Sum starts at -0.0, which would print as "-0.00"
        self.products
            .values()
            .map(Product::effective_value)
            .fold(0.0, |acc, v| acc + v)
    }

    pub fn out_of_stock_count(&self) -> usize {
        self.active_products().filter(|p| p.is_out_of_stock()).count()
    }

    pub fn category_count(&self) -> usize {
        let mut seen: Vec<&str> = self.active_products().map(|p| p.category.as_str()).collect();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }

    pub fn low_stock_products(&self) -> Vec<&Product> {
        self.active_products()
            .filter(|p| p.quantity <= LOW_STOCK_THRESHOLD)
            .collect()
    }

    pub fn stats(&self) -> InventoryStats {
        InventoryStats {
            total_products: self.products.len(),
            active_products: self.active_products().count(),
            total_value: self.total_value(),
            out_of_stock: self.out_of_stock_count(),
            categories: self.category_count(),
        }
    }

    /// Rollup per category in first-seen order. Disabled products are
    /// counted in `products` but not in `active_products` or `value`.
    pub fn category_summaries(&self) -> Vec<CategorySummary> {
        let mut by_name: IndexMap<&str, CategorySummary> = IndexMap::new();
        for p in self.products.values() {
            let entry = by_name
                .entry(p.category.as_str())
                .or_insert_with(|| CategorySummary {
                    name: p.category.clone(),
                    products: 0,
                    active_products: 0,
                    quantity: 0,
                    value: 0.0,
                });
            entry.products += 1;
            if p.is_active() {
                entry.active_products += 1;
                entry.quantity += u64::from(p.quantity);
                entry.value += p.value();
            }
        }
        by_name.into_values().collect()
    }
}
