//! Data bridge: connects the [`Inventory`] store to TUI actions.
//!
//! Runs as a background task: pushes the current snapshot, kicks off the
//! initial catalog load, then forwards every store change as an
//! [`Action::StateUpdated`] through the TUI's action channel.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use stockroom_core::Inventory;

use crate::action::Action;

/// Forward store changes to the TUI until cancelled or the store is dropped.
pub async fn spawn_data_bridge(
    inventory: Inventory,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut state = inventory.subscribe();

    // Push the initial snapshot so screens have data immediately
    let _ = action_tx.send(Action::StateUpdated(state.current().clone()));

    spawn_load(inventory, action_tx.clone());

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            changed = state.changed() => {
                let Some(snapshot) = changed else { break };
                debug!(
                    products = snapshot.products.len(),
                    loading = snapshot.loading,
                    "dispatching StateUpdated"
                );
                let _ = action_tx.send(Action::StateUpdated(snapshot));
            }
        }
    }

    debug!("data bridge shutting down");
}

/// Fetch the catalog in the background and report the outcome.
///
/// State changes from the load reach the screens through the bridge loop;
/// the [`Action::LoadFinished`] only drives the notification toast.
pub fn spawn_load(inventory: Inventory, action_tx: mpsc::UnboundedSender<Action>) {
    tokio::spawn(async move {
        let result = inventory
            .load_products()
            .await
            .map_err(|e| e.display_message());
        let _ = action_tx.send(Action::LoadFinished(result));
    });
}
