// ── Inventory store ──
//
// Reducer-driven state container. `state` defines the transitions,
// `selectors` the derived numbers, `inventory_store` the reactive wrapper.

mod inventory_store;
mod selectors;
mod state;

pub use inventory_store::InventoryStore;
pub use selectors::{CategorySummary, InventoryStats, LOW_STOCK_THRESHOLD};
pub use state::{InventoryState, StoreAction};
