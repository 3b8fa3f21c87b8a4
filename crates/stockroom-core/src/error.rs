// ── Core error types ──
//
// User-facing errors from stockroom-core. Consumers never see raw HTTP
// bodies or serde messages; `From<stockroom_api::Error>` translates
// transport-layer failures into these variants.

use thiserror::Error;

/// Message stored in the inventory state when a load fails without a
/// more specific explanation.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to fetch products";

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach catalog at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Catalog request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Load errors ──────────────────────────────────────────────────
    /// Non-success status or an unreadable payload.
    #[error("{message}")]
    LoadFailed {
        message: String,
        status: Option<u16>,
    },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Product not found: {identifier}")]
    ProductNotFound { identifier: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The message shown in the inventory state's `error` slot.
    pub fn display_message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            LOAD_FAILED_MESSAGE.to_owned()
        } else {
            msg
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<stockroom_api::Error> for CoreError {
    fn from(err: stockroom_api::Error) -> Self {
        match err {
            stockroom_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::LoadFailed {
                        message: format!("{LOAD_FAILED_MESSAGE}: {e}"),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            stockroom_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            stockroom_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            stockroom_api::Error::Status { status, .. } => CoreError::LoadFailed {
                message: format!("{LOAD_FAILED_MESSAGE} (HTTP {status})"),
                status: Some(status),
            },
            stockroom_api::Error::Deserialization { message, body: _ } => CoreError::LoadFailed {
                message: format!("{LOAD_FAILED_MESSAGE}: {message}"),
                status: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_to_load_failed_with_fallback_message() {
        let err: CoreError = stockroom_api::Error::Status {
            status: 500,
            body: String::new(),
        }
        .into();
        assert!(matches!(err, CoreError::LoadFailed { status: Some(500), .. }));
        assert!(err.display_message().starts_with(LOAD_FAILED_MESSAGE));
    }

    #[test]
    fn empty_message_falls_back() {
        let err = CoreError::LoadFailed {
            message: String::new(),
            status: None,
        };
        assert_eq!(err.display_message(), LOAD_FAILED_MESSAGE);
    }
}
