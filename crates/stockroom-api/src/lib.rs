// stockroom-api: Async Rust client for remote product catalog endpoints

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::CatalogClient;
pub use error::Error;
pub use models::{NumberOrText, RawProduct};
pub use transport::{TlsMode, TransportConfig};
