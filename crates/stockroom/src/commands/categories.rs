//! Categories command handler.

use tabled::Tabled;
use stockroom_core::{CategorySummary, Inventory};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Products")]
    products: usize,
    #[tabled(rename = "Active")]
    active: usize,
    #[tabled(rename = "Units")]
    quantity: u64,
    #[tabled(rename = "Value")]
    value: String,
}

impl From<&CategorySummary> for CategoryRow {
    fn from(c: &CategorySummary) -> Self {
        Self {
            name: c.name.clone(),
            products: c.products,
            active: c.active_products,
            quantity: c.quantity,
            value: output::money(c.value),
        }
    }
}

#[allow(clippy::unused_async)]
pub async fn handle(inventory: &Inventory, global: &GlobalOpts) -> Result<(), CliError> {
    let summaries = inventory.snapshot().category_summaries();
    let out = output::render_list(
        &global.output,
        &summaries,
        |c| CategoryRow::from(c),
        |c| c.name.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
