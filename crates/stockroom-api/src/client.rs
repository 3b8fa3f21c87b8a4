// Catalog HTTP client
//
// Wraps `reqwest::Client` with base-URL normalization and the single
// endpoint the inventory dashboard consumes: a JSON array of raw product
// records served at `{base_url}/{endpoint}`.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::RawProduct;
use crate::transport::TransportConfig;

const BODY_PREVIEW_CHARS: usize = 200;

/// Async client for a remote product catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a new catalog client from a `TransportConfig`.
    ///
    /// `base_url` is the catalog root, e.g.
    /// `https://dev-0tf0hinghgjl39z.api.raw-labs.com/`.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Create a catalog client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: Self::with_trailing_slash(base_url),
        }
    }

    /// Create a catalog client from a raw base URL string and an existing client.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let url = Url::parse(base_url)?;
        Ok(Self::with_client(http, url))
    }

    /// The catalog base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    fn with_trailing_slash(mut url: Url) -> Url {
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url
    }

    /// Resolve an endpoint path segment against the base URL.
    ///
    /// A leading `/` on `endpoint` is ignored so the base path is kept.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Fetch the raw product records served at `endpoint`.
    pub async fn list_products(&self, endpoint: &str) -> Result<Vec<RawProduct>, Error> {
        let url = self.endpoint_url(endpoint)?;
        self.get(url).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "catalog request failed");
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> CatalogClient {
        CatalogClient::from_reqwest(base, reqwest::Client::new()).unwrap()
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let c = client("https://catalog.example.com/api");
        assert_eq!(c.base_url().as_str(), "https://catalog.example.com/api/");
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let c = client("https://catalog.example.com/api/");
        let url = c.endpoint_url("/inventory").unwrap();
        assert_eq!(url.as_str(), "https://catalog.example.com/api/inventory");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = CatalogClient::from_reqwest("not a url", reqwest::Client::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
