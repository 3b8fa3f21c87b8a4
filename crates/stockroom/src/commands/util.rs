//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use stockroom_core::{CatalogConfig, Inventory, Product, ProductId};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Build an inventory and load the catalog once, with a spinner on
/// interactive terminals.
pub async fn load_inventory(
    config: CatalogConfig,
    global: &GlobalOpts,
) -> Result<Inventory, CliError> {
    let inventory = Inventory::new(config)?;

    let spinner = (!global.quiet && std::io::stderr().is_terminal()).then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Loading products...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let result = inventory.load_products().await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    result?;
    Ok(inventory)
}

/// Resolve a product by exact id, falling back to a case-insensitive
/// name match.
pub fn resolve_product(inventory: &Inventory, identifier: &str) -> Result<Product, CliError> {
    let snap = inventory.snapshot();
    if let Some(p) = snap.product_by_id(&ProductId::new(identifier)) {
        return Ok(p.clone());
    }
    snap.products
        .values()
        .find(|p| p.name.eq_ignore_ascii_case(identifier))
        .cloned()
        .ok_or_else(|| CliError::NotFound {
            resource_type: "product".into(),
            identifier: identifier.into(),
            list_command: "products list".into(),
        })
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}
