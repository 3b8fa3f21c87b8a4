// ── Runtime catalog configuration ──
//
// These types describe *where* the product catalog lives and how to reach
// it. They never touch disk: the CLI/TUI constructs a `CatalogConfig` and
// hands it in.

use std::time::Duration;

use url::Url;

use crate::model::Role;

/// Catalog root used when no profile overrides it.
pub const DEFAULT_BASE_URL: &str = "https://dev-0tf0hinghgjl39z.api.raw-labs.com/";

/// Path segment of the product list below the base URL.
pub const DEFAULT_ENDPOINT: &str = "inventory";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed staging endpoints).
    DangerAcceptInvalid,
}

/// Configuration for loading a single catalog.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Catalog root URL.
    pub base_url: Url,
    /// Path segment appended to `base_url` for the product list.
    pub endpoint: String,
    /// Role the store starts in.
    pub initial_role: Role,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            initial_role: Role::default(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }
}
