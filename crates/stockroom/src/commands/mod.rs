//! Command dispatch: bridges CLI args -> inventory snapshot -> output formatting.

pub mod categories;
pub mod config_cmd;
pub mod products;
pub mod stats;
pub mod util;

use stockroom_core::Inventory;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a catalog-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    inventory: &Inventory,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Products(args) => products::handle(inventory, args, global).await,
        Command::Stats => stats::handle(inventory, global).await,
        Command::Categories => categories::handle(inventory, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
