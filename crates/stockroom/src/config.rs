//! CLI configuration -- thin wrapper around `stockroom_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--base-url, --endpoint, etc.).

use std::time::Duration;

use stockroom_core::{CatalogConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use stockroom_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Comma-separated profile names for diagnostics.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
    names.sort_unstable();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

/// Build a `CatalogConfig` from the config file, profile, and CLI overrides.
///
/// CLI flag overrides take priority over profile values.
pub fn build_catalog_config(global: &GlobalOpts) -> Result<CatalogConfig, CliError> {
    let cfg = load_config_or_default();
    let (_, profile) = cfg
        .resolve_profile(global.profile.as_deref())
        .map_err(|_| CliError::ProfileNotFound {
            name: active_profile_name(global, &cfg),
            available: available_profiles(&cfg),
        })?;
    resolve_profile(&profile, &cfg.defaults, global)
}

/// Translate a `Profile` + global flags into a `CatalogConfig`.
pub fn resolve_profile(
    profile: &Profile,
    defaults: &Defaults,
    global: &GlobalOpts,
) -> Result<CatalogConfig, CliError> {
    let mut catalog = stockroom_config::profile_to_catalog_config(profile, defaults)?;

    // 1. Base URL (flag > env > profile)
    if let Some(ref raw) = global.base_url {
        catalog.base_url = raw.parse().map_err(|_| CliError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
    }

    // 2. Endpoint
    if let Some(ref endpoint) = global.endpoint {
        catalog.endpoint.clone_from(endpoint);
    }

    // 3. TLS verification
    if global.insecure {
        catalog.tls = TlsVerification::DangerAcceptInvalid;
    }

    // 4. Timeout
    catalog.timeout = Duration::from_secs(global.timeout);

    Ok(catalog)
}
