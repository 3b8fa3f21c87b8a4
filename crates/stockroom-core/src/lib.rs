// stockroom-core: Reactive inventory store between stockroom-api and consumers (CLI/TUI).

pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{CatalogConfig, TlsVerification};
pub use controller::Inventory;
pub use error::CoreError;
pub use store::{
    CategorySummary, InventoryState, InventoryStats, InventoryStore, LOW_STOCK_THRESHOLD,
    StoreAction,
};
pub use stream::StateStream;

pub use model::{DraftErrors, DraftField, Price, Product, ProductDraft, ProductId, Role};
