//! Stats command handler.

use std::fmt::Write;

use serde::Serialize;
use stockroom_core::{Inventory, InventoryStats, LOW_STOCK_THRESHOLD};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Stats plus the low-stock list, as emitted by structured formats.
#[derive(Serialize)]
struct StatsReport {
    #[serde(flatten)]
    stats: InventoryStats,
    total_value_display: String,
    low_stock_threshold: u32,
    low_stock: Vec<String>,
}

fn detail(report: &StatsReport, color: bool) -> String {
    let s = &report.stats;
    let mut out = String::new();
    let _ = writeln!(out, "{}", output::heading("Inventory", color));
    let _ = writeln!(out, "  Total products:   {}", s.total_products);
    let _ = writeln!(out, "  Active products:  {}", s.active_products);
    let _ = writeln!(out, "  Total value:      ${}", report.total_value_display);
    let _ = writeln!(out, "  Out of stock:     {}", s.out_of_stock);
    let _ = write!(out, "  Categories:       {}", s.categories);

    if !report.low_stock.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out);
        let title = format!("Low stock (<= {})", report.low_stock_threshold);
        let _ = write!(out, "{}", output::heading(&title, color));
        for name in &report.low_stock {
            let _ = write!(out, "\n  {}", output::warn_text(name, color));
        }
    }
    out
}

fn plain(report: &StatsReport) -> String {
    let s = &report.stats;
    [
        format!("total_products={}", s.total_products),
        format!("active_products={}", s.active_products),
        format!("total_value={}", report.total_value_display),
        format!("out_of_stock={}", s.out_of_stock),
        format!("categories={}", s.categories),
    ]
    .join("\n")
}

#[allow(clippy::unused_async)]
pub async fn handle(inventory: &Inventory, global: &GlobalOpts) -> Result<(), CliError> {
    let snap = inventory.snapshot();
    let stats = snap.stats();
    let report = StatsReport {
        stats,
        total_value_display: stats.total_value_display(),
        low_stock_threshold: LOW_STOCK_THRESHOLD,
        low_stock: snap
            .low_stock_products()
            .into_iter()
            .map(|p| p.name.clone())
            .collect(),
    };

    let color = output::should_color(&global.color);
    let out = output::render_single(&global.output, &report, |r| detail(r, color), plain)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
