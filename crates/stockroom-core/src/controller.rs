// ── Inventory controller ──
//
// Ties the catalog client to the store. `Inventory` is cheaply cloneable;
// the TUI's data bridge and event loop share one instance.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use url::Url;

use stockroom_api::{CatalogClient, TlsMode, TransportConfig};

use crate::config::{CatalogConfig, TlsVerification};
use crate::convert::products_from_raw;
use crate::error::CoreError;
use crate::model::{Product, ProductDraft, ProductId, Role};
use crate::store::{InventoryState, InventoryStore, StoreAction};
use crate::stream::StateStream;

/// Handle to a catalog and its in-memory inventory.
#[derive(Clone)]
pub struct Inventory {
    inner: Arc<InventoryInner>,
}

struct InventoryInner {
    config: CatalogConfig,
    client: CatalogClient,
    store: InventoryStore,
}

impl Inventory {
    /// Build an inventory for `config`. Does NOT load; call
    /// [`load_products()`](Self::load_products).
    pub fn new(config: CatalogConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let client = CatalogClient::with_client(transport.build_client()?, config.base_url.clone());
        Ok(Self::with_client(config, client))
    }

    /// Build an inventory around an existing catalog client.
    pub fn with_client(config: CatalogConfig, client: CatalogClient) -> Self {
        let store = InventoryStore::new(InventoryState::new(config.initial_role));
        Self {
            inner: Arc::new(InventoryInner {
                config,
                client,
                store,
            }),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    /// The URL `load_products` requests.
    pub fn source_url(&self) -> Result<Url, CoreError> {
        Ok(self.inner.client.endpoint_url(&self.inner.config.endpoint)?)
    }

    pub fn store(&self) -> &InventoryStore {
        &self.inner.store
    }

    pub fn snapshot(&self) -> Arc<InventoryState> {
        self.inner.store.snapshot()
    }

    pub fn subscribe(&self) -> StateStream {
        self.inner.store.subscribe()
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Fetch the catalog and replace the product collection.
    ///
    /// On failure the previous collection is kept, the store's `error` is
    /// set, and the error is also returned. Overlapping calls are not
    /// cancelled; whichever finishes last wins.
    pub async fn load_products(&self) -> Result<usize, CoreError> {
        let store = &self.inner.store;
        let endpoint = &self.inner.config.endpoint;
        store.dispatch(StoreAction::LoadStarted);
        debug!(base_url = %self.inner.client.base_url(), endpoint, "loading products");

        match self.inner.client.list_products(endpoint).await {
            Ok(raw) => {
                let products = products_from_raw(raw);
                let count = products.len();
                store.dispatch(StoreAction::LoadSucceeded {
                    products,
                    at: Utc::now(),
                });
                info!(count, "products loaded");
                Ok(count)
            }
            Err(e) => {
                let err = match CoreError::from(e) {
                    CoreError::Timeout { .. } => CoreError::Timeout {
                        timeout_secs: self.inner.config.timeout.as_secs(),
                    },
                    other => other,
                };
                warn!(error = %err, "product load failed");
                store.dispatch(StoreAction::LoadFailed {
                    message: err.display_message(),
                });
                Err(err)
            }
        }
    }

    // ── Role ─────────────────────────────────────────────────────────

    pub fn set_role(&self, role: Role) {
        self.inner.store.dispatch(StoreAction::SetRole(role));
    }

    /// Switch to the other role and return the new one.
    pub fn toggle_role(&self) -> Role {
        self.inner.store.dispatch(StoreAction::ToggleRole);
        self.snapshot().role
    }

    // ── Edit workflow ────────────────────────────────────────────────

    /// Open the edit dialog for `id`. Returns `false` for unknown ids.
    pub fn begin_edit(&self, id: &ProductId) -> bool {
        self.inner.store.dispatch(StoreAction::BeginEdit(id.clone()))
    }

    pub fn cancel_edit(&self) {
        self.inner.store.dispatch(StoreAction::CancelEdit);
    }

    /// Write `product` back by id and close the dialog.
    pub fn save_edit(&self, product: Product) {
        self.inner.store.dispatch(StoreAction::SaveEdit(product));
    }

    /// Validate `draft` against the product being edited and save it.
    ///
    /// Leaves the dialog open when validation fails. Closes it without
    /// writing if the product has since been removed.
    pub fn save_draft(&self, draft: &ProductDraft) -> Result<(), CoreError> {
        let snapshot = self.snapshot();
        let Some(base) = snapshot.editing_product() else {
            return Err(CoreError::Validation {
                message: "no product is being edited".into(),
            });
        };
        if !snapshot.products.contains_key(&base.id) {
            self.cancel_edit();
            return Err(CoreError::Validation {
                message: format!("{} no longer exists", base.name),
            });
        }
        let product = draft.apply(base).map_err(|errors| CoreError::Validation {
            message: errors.to_string(),
        })?;
        self.save_edit(product);
        Ok(())
    }

    // ── Row actions ──────────────────────────────────────────────────

    /// Remove one product. Returns `false` if the id was unknown.
    pub fn delete_product(&self, id: &ProductId) -> bool {
        self.inner.store.dispatch(StoreAction::DeleteProduct(id.clone()))
    }

    /// Flip the disabled flag. Returns `false` if the id was unknown.
    pub fn toggle_disabled(&self, id: &ProductId) -> bool {
        self.inner.store.dispatch(StoreAction::ToggleDisabled(id.clone()))
    }

    // ── One-shot convenience ─────────────────────────────────────────

    /// Build an inventory, load it once, and run `f` against it.
    pub async fn oneshot<F, Fut, T>(config: CatalogConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Inventory) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let inventory = Inventory::new(config)?;
        inventory.load_products().await?;
        f(inventory).await
    }
}

fn build_transport(config: &CatalogConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
