//! Product command handlers.

use std::cmp::Ordering;
use std::fmt::Write;

use tabled::Tabled;
use stockroom_core::{Inventory, LOW_STOCK_THRESHOLD, Product};

use crate::cli::{GlobalOpts, ProductListArgs, ProductsArgs, ProductsCommand, SortKey};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Stock")]
    stock: &'static str,
}

fn stock_label(p: &Product) -> &'static str {
    if p.is_disabled {
        "disabled"
    } else if p.is_out_of_stock() {
        "out"
    } else if p.quantity <= LOW_STOCK_THRESHOLD {
        "low"
    } else {
        "ok"
    }
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            category: p.category.clone(),
            price: p.price.to_string(),
            quantity: p.quantity,
            value: output::money(p.value()),
            stock: stock_label(p),
        }
    }
}

fn detail(p: &Product, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", output::heading(&p.name, color));
    let _ = writeln!(out, "  ID:        {}", p.id);
    let _ = writeln!(out, "  Category:  {}", p.category);
    let _ = writeln!(out, "  Price:     {} ({})", p.price, output::money(p.price.amount()));
    let _ = writeln!(out, "  Quantity:  {}", p.quantity);
    let _ = writeln!(out, "  Value:     {}", output::money(p.value()));
    let stock = stock_label(p);
    let stock = if stock == "ok" {
        stock.to_owned()
    } else {
        output::warn_text(stock, color)
    };
    let _ = write!(out, "  Stock:     {stock}");
    out
}

// ── Filtering & sorting ─────────────────────────────────────────────

fn select(products: Vec<Product>, args: &ProductListArgs) -> Vec<Product> {
    let mut out: Vec<Product> = products
        .into_iter()
        .filter(|p| {
            args.category
                .as_deref()
                .is_none_or(|c| p.category.eq_ignore_ascii_case(c))
        })
        .filter(|p| !args.low_stock || (p.is_active() && p.quantity <= LOW_STOCK_THRESHOLD))
        .collect();

    let by_f64 = |a: f64, b: f64| a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    match args.sort {
        SortKey::Catalog => {}
        SortKey::Name => out.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        SortKey::Category => out.sort_by(|a, b| a.category.cmp(&b.category)),
        SortKey::Price => out.sort_by(|a, b| by_f64(a.price.amount(), b.price.amount())),
        SortKey::Quantity => out.sort_by_key(|p| p.quantity),
        SortKey::Value => out.sort_by(|a, b| by_f64(a.value(), b.value())),
    }
    if args.reverse {
        out.reverse();
    }
    out
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::unused_async)]
pub async fn handle(
    inventory: &Inventory,
    args: ProductsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProductsCommand::List(list) => {
            let all: Vec<Product> = inventory.snapshot().products.values().cloned().collect();
            let products = select(all, &list);
            let out = output::render_list(
                &global.output,
                &products,
                |p| ProductRow::from(p),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProductsCommand::Get { id } => {
            let product = util::resolve_product(inventory, &id)?;
            let color = output::should_color(&global.color);
            let out = output::render_single(
                &global.output,
                &product,
                |p| detail(p, color),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
