// ── Inventory state and reducer ──
//
// `InventoryState` is a plain value; every change goes through
// `reduce`, which reports whether anything actually changed so the
// store only notifies subscribers on real updates.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::error::{CoreError, LOAD_FAILED_MESSAGE};
use crate::model::{Product, ProductId, Role};

/// Everything the dashboard knows about the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryState {
    /// Products keyed by id, in catalog order.
    pub products: IndexMap<ProductId, Product>,
    pub role: Role,
    /// Snapshot of the product being edited. The edit dialog is open
    /// exactly while this is `Some`.
    pub editing: Option<Product>,
    pub loading: bool,
    pub error: Option<String>,
    /// When the last successful load finished.
    pub last_loaded: Option<DateTime<Utc>>,
}

/// State transitions understood by [`InventoryState::reduce`].
#[derive(Debug, Clone)]
pub enum StoreAction {
    LoadStarted,
    LoadSucceeded {
        products: IndexMap<ProductId, Product>,
        at: DateTime<Utc>,
    },
    LoadFailed {
        message: String,
    },
    SetRole(Role),
    ToggleRole,
    BeginEdit(ProductId),
    CancelEdit,
    SaveEdit(Product),
    DeleteProduct(ProductId),
    ToggleDisabled(ProductId),
}

impl InventoryState {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }

    /// Apply `action`. Returns `true` if the state changed.
    pub fn reduce(&mut self, action: StoreAction) -> bool {
        match action {
            StoreAction::LoadStarted => {
                let changed = !self.loading || self.error.is_some();
                self.loading = true;
                self.error = None;
                changed
            }
            StoreAction::LoadSucceeded { products, at } => {
                if self
                    .editing
                    .as_ref()
                    .is_some_and(|p| !products.contains_key(&p.id))
                {
                    self.editing = None;
                }
                self.products = products;
                self.loading = false;
                self.last_loaded = Some(at);
                true
            }
            StoreAction::LoadFailed { message } => {
                let message = if message.trim().is_empty() {
                    LOAD_FAILED_MESSAGE.to_owned()
                } else {
                    message
                };
                self.loading = false;
                self.error = Some(message);
                true
            }
            StoreAction::SetRole(role) => {
                let changed = self.role != role;
                self.role = role;
                changed
            }
            StoreAction::ToggleRole => {
                self.role = self.role.toggled();
                true
            }
            StoreAction::BeginEdit(id) => match self.products.get(&id) {
                Some(product) => {
                    self.editing = Some(product.clone());
                    true
                }
                None => false,
            },
            StoreAction::CancelEdit => self.editing.take().is_some(),
            StoreAction::SaveEdit(mut product) => {
                product.price = product.price.normalized();
                let closed = self.editing.take().is_some();
                let written = match self.products.get_mut(&product.id) {
                    Some(slot) if *slot != product => {
                        *slot = product;
                        true
                    }
                    _ => false,
                };
                closed || written
            }
            StoreAction::DeleteProduct(id) => {
                let removed = self.products.shift_remove(&id).is_some();
                if removed && self.editing.as_ref().is_some_and(|p| p.id == id) {
                    self.editing = None;
                }
                removed
            }
            StoreAction::ToggleDisabled(id) => match self.products.get_mut(&id) {
                Some(product) => {
                    product.is_disabled = !product.is_disabled;
                    true
                }
                None => false,
            },
        }
    }

    // ── Edit workflow ────────────────────────────────────────────────

    pub fn is_edit_dialog_open(&self) -> bool {
        self.editing.is_some()
    }

    pub fn editing_product(&self) -> Option<&Product> {
        self.editing.as_ref()
    }

    // ── Permissions ──────────────────────────────────────────────────
    //
    // Advisory only: views use these to enable or hide row actions.

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn can_edit(&self, product: &Product) -> bool {
        self.is_admin() && !product.is_disabled
    }

    pub fn can_delete(&self, product: &Product) -> bool {
        self.is_admin() && !product.is_disabled
    }

    pub fn can_toggle(&self, _product: &Product) -> bool {
        self.is_admin()
    }

    /// Look up a product or fail with [`CoreError::ProductNotFound`].
    pub fn require_product(&self, id: &ProductId) -> Result<&Product, CoreError> {
        self.products
            .get(id)
            .ok_or_else(|| CoreError::ProductNotFound {
                identifier: id.to_string(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Price;
    use pretty_assertions::assert_eq;

    fn loaded() -> InventoryState {
        let mut state = InventoryState::default();
        let products = [
            Product::new("Bluetooth", "Electronic", "$150", 5),
            Product::new("Edifier M43560", "Electronic", "$0", 0),
            Product::new("Sony 4K ultra 55 inch TV", "ELECTRONICS", "$1190", 17),
        ]
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect();
        state.reduce(StoreAction::LoadSucceeded {
            products,
            at: Utc::now(),
        });
        state
    }

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[test]
    fn initial_state_is_admin_and_empty() {
        let state = InventoryState::default();
        assert_eq!(state.role, Role::Admin);
        assert!(state.products.is_empty());
        assert!(!state.is_edit_dialog_open());
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn load_started_sets_loading_and_clears_error() {
        let mut state = InventoryState {
            error: Some("boom".into()),
            ..InventoryState::default()
        };
        assert!(state.reduce(StoreAction::LoadStarted));
        assert!(state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn load_success_replaces_collection() {
        let mut state = loaded();
        state.reduce(StoreAction::LoadStarted);
        let products: IndexMap<_, _> = [Product::new("Only", "x", 1.0, 1)]
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();
        state.reduce(StoreAction::LoadSucceeded {
            products,
            at: Utc::now(),
        });
        assert!(!state.loading);
        assert_eq!(state.products.len(), 1);
        assert!(state.last_loaded.is_some());
    }

    #[test]
    fn failed_load_keeps_products_and_sets_error() {
        let mut state = loaded();
        let before = state.products.clone();
        state.reduce(StoreAction::LoadStarted);
        state.reduce(StoreAction::LoadFailed {
            message: String::new(),
        });
        assert_eq!(state.products, before);
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some(LOAD_FAILED_MESSAGE));
    }

    #[test]
    fn toggle_role_flips_between_roles() {
        let mut state = InventoryState::default();
        state.reduce(StoreAction::ToggleRole);
        assert_eq!(state.role, Role::User);
        state.reduce(StoreAction::ToggleRole);
        assert_eq!(state.role, Role::Admin);
    }

    #[test]
    fn set_same_role_is_not_a_change() {
        let mut state = InventoryState::default();
        assert!(!state.reduce(StoreAction::SetRole(Role::Admin)));
        assert!(state.reduce(StoreAction::SetRole(Role::User)));
    }

    #[test]
    fn begin_edit_opens_dialog_with_product() {
        let mut state = loaded();
        assert!(state.reduce(StoreAction::BeginEdit(id("Bluetooth"))));
        assert!(state.is_edit_dialog_open());
        assert_eq!(state.editing_product().map(|p| p.name.as_str()), Some("Bluetooth"));
    }

    #[test]
    fn begin_edit_with_unknown_id_is_ignored() {
        let mut state = loaded();
        assert!(!state.reduce(StoreAction::BeginEdit(id("nope"))));
        assert!(!state.is_edit_dialog_open());
    }

    #[test]
    fn reload_closes_dialog_for_vanished_product() {
        let mut state = loaded();
        state.reduce(StoreAction::BeginEdit(id("Bluetooth")));

        let kept = Product::new("Edifier M43560", "Electronic", "$0", 0);
        state.reduce(StoreAction::LoadSucceeded {
            products: [(kept.id.clone(), kept)].into_iter().collect(),
            at: Utc::now(),
        });
        assert!(state.editing.is_none());
    }

    #[test]
    fn reload_keeps_dialog_when_product_survives() {
        let mut state = loaded();
        state.reduce(StoreAction::BeginEdit(id("Bluetooth")));
        let products = state.products.clone();
        state.reduce(StoreAction::LoadSucceeded {
            products,
            at: Utc::now(),
        });
        assert_eq!(state.editing.as_ref().map(|p| p.id.clone()), Some(id("Bluetooth")));
    }

    #[test]
    fn cancel_edit_closes_dialog() {
        let mut state = loaded();
        state.reduce(StoreAction::BeginEdit(id("Bluetooth")));
        assert!(state.reduce(StoreAction::CancelEdit));
        assert!(state.editing.is_none());
        assert!(!state.reduce(StoreAction::CancelEdit));
    }

    #[test]
    fn save_edit_normalizes_price_and_writes_back() {
        let mut state = loaded();
        state.reduce(StoreAction::BeginEdit(id("Bluetooth")));
        let mut edited = state.products[&id("Bluetooth")].clone();
        edited.price = Price::Text("$12.50".into());
        edited.quantity = 2;
        assert!(state.reduce(StoreAction::SaveEdit(edited)));

        let saved = &state.products[&id("Bluetooth")];
        assert_eq!(saved.price, Price::Amount(12.5));
        assert_eq!(saved.quantity, 2);
        assert!(!state.is_edit_dialog_open());
        assert_eq!(state.products.get_index_of(&id("Bluetooth")), Some(0));
    }

    #[test]
    fn save_edit_for_vanished_product_only_closes_dialog() {
        let mut state = loaded();
        state.reduce(StoreAction::BeginEdit(id("Bluetooth")));
        let ghost = Product::new("Ghost", "x", 1.0, 1);
        state.reduce(StoreAction::SaveEdit(ghost));
        assert_eq!(state.products.len(), 3);
        assert!(!state.products.contains_key(&id("Ghost")));
        assert!(!state.is_edit_dialog_open());
    }

    #[test]
    fn delete_removes_exactly_one() {
        let mut state = loaded();
        let others: Vec<ProductId> = state
            .products
            .keys()
            .filter(|k| k.as_str() != "Edifier M43560")
            .cloned()
            .collect();
        assert!(state.reduce(StoreAction::DeleteProduct(id("Edifier M43560"))));
        let remaining: Vec<ProductId> = state.products.keys().cloned().collect();
        assert_eq!(remaining, others);
        assert!(!state.reduce(StoreAction::DeleteProduct(id("Edifier M43560"))));
    }

    #[test]
    fn toggle_disabled_twice_restores_product() {
        let mut state = loaded();
        let before = state.products[&id("Bluetooth")].clone();
        state.reduce(StoreAction::ToggleDisabled(id("Bluetooth")));
        assert!(state.products[&id("Bluetooth")].is_disabled);
        state.reduce(StoreAction::ToggleDisabled(id("Bluetooth")));
        assert_eq!(state.products[&id("Bluetooth")], before);
    }

    #[test]
    fn permissions_follow_role_and_disabled_flag() {
        let mut state = loaded();
        let mut p = state.products[&id("Bluetooth")].clone();
        assert!(state.can_edit(&p) && state.can_delete(&p) && state.can_toggle(&p));

        p.is_disabled = true;
        assert!(!state.can_edit(&p));
        assert!(!state.can_delete(&p));
        assert!(state.can_toggle(&p));

        state.reduce(StoreAction::SetRole(Role::User));
        assert!(!state.can_toggle(&p));
    }

    #[test]
    fn require_product_reports_missing_id() {
        let state = loaded();
        assert!(state.require_product(&id("Bluetooth")).is_ok());
        let err = state.require_product(&id("nope")).unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound { identifier } if identifier == "nope"));
    }
}
