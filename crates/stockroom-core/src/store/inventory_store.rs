// ── Reactive inventory store ──
//
// Holds the current `InventoryState` behind a `watch` channel. Every
// dispatched action is reduced against a copy-on-write snapshot; readers
// always see a complete, immutable `Arc<InventoryState>`.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::trace;

use super::state::{InventoryState, StoreAction};
use crate::stream::StateStream;

/// Single source of truth for inventory data.
pub struct InventoryStore {
    state: watch::Sender<Arc<InventoryState>>,
}

impl InventoryStore {
    pub fn new(initial: InventoryState) -> Self {
        let (state, _) = watch::channel(Arc::new(initial));
        Self { state }
    }

    /// Reduce `action` into the state. Subscribers are notified only when
    /// the state actually changed; the return value says whether it did.
    pub fn dispatch(&self, action: StoreAction) -> bool {
        trace!(?action, "dispatch");
        self.state
            .send_if_modified(|state| Arc::make_mut(state).reduce(action))
    }

    /// Current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<InventoryState> {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> StateStream {
        StateStream::new(self.state.subscribe())
    }
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new(InventoryState::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Product, ProductId, Role};
    use chrono::Utc;

    fn seeded() -> InventoryStore {
        let store = InventoryStore::default();
        let p = Product::new("Bluetooth", "Electronic", "$150", 5);
        store.dispatch(StoreAction::LoadSucceeded {
            products: [(p.id.clone(), p)].into_iter().collect(),
            at: Utc::now(),
        });
        store
    }

    #[test]
    fn snapshots_are_immutable() {
        let store = seeded();
        let before = store.snapshot();
        store.dispatch(StoreAction::DeleteProduct(ProductId::new("Bluetooth")));
        assert_eq!(before.products.len(), 1);
        assert!(store.snapshot().products.is_empty());
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let store = seeded();
        let mut stream = store.subscribe();
        assert_eq!(stream.current().role, Role::Admin);

        store.dispatch(StoreAction::ToggleRole);
        let next = stream.changed().await.unwrap();
        assert_eq!(next.role, Role::User);
    }

    #[test]
    fn no_op_actions_do_not_notify() {
        let store = seeded();
        let stream = store.subscribe();
        assert!(!store.dispatch(StoreAction::BeginEdit(ProductId::new("missing"))));
        assert!(!stream.has_changed());
    }
}
