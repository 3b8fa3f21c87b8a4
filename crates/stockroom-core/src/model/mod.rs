// ── Inventory domain model ──
//
// Canonical representation of catalog entries. Raw wire records from
// `stockroom-api` are normalized into these types by `convert`.

pub mod draft;
pub mod product;
pub mod role;

// ── Re-exports ──────────────────────────────────────────────────────
pub use draft::{DraftErrors, DraftField, ProductDraft};
pub use product::{Price, Product, ProductId, normalize_price};
pub use role::Role;
