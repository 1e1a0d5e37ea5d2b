//! The basket session state machine.

use crate::state::LoadState;
use kiosk_client::BasketService;
use kiosk_core::{
    BasketSnapshot, ItemId, Notice, NoticeKind, NoticeToken, NotificationChannel, ProductId,
};
use kiosk_session::SessionIds;
use std::cell::RefCell;
use std::collections::HashSet;

/// Advisory message when the basket snapshot cannot be fetched.
pub const BASKET_LOAD_FAILED: &str = "Failed to load basket contents. Please try again later.";
/// Advisory message when the catalog cannot be fetched.
pub const PRODUCTS_LOAD_FAILED: &str = "Failed to load products. Please try again later.";
/// Advisory message when an add mutation fails.
pub const ADD_FAILED: &str = "Failed to add product to basket. Please try again.";
/// Advisory message when a remove mutation succeeds.
pub const REMOVE_SUCCEEDED: &str = "Item removed from basket";
/// Advisory message when a remove mutation fails.
pub const REMOVE_FAILED: &str = "Failed to remove item from basket. Please try again.";

/// Orchestrates fetch, mutation and notification for the active session.
///
/// Interior-mutable so independent mutations can be awaited concurrently
/// through `&self`; each product/item carries its own in-flight flag, and
/// the snapshot is only ever replaced wholesale. No borrow is held across
/// an await point.
pub struct BasketSession<S: BasketService> {
    service: S,
    ids: SessionIds,
    state: RefCell<LoadState<BasketSnapshot>>,
    adding: RefCell<HashSet<ProductId>>,
    removing: RefCell<HashSet<ItemId>>,
    notices: RefCell<NotificationChannel>,
}

impl<S: BasketService> BasketSession<S> {
    /// Create a session in the `Loading` state; call [`load`] to populate.
    ///
    /// [`load`]: BasketSession::load
    pub fn new(service: S, ids: SessionIds) -> Self {
        Self {
            service,
            ids,
            state: RefCell::new(LoadState::Loading),
            adding: RefCell::new(HashSet::new()),
            removing: RefCell::new(HashSet::new()),
            notices: RefCell::new(NotificationChannel::new()),
        }
    }

    /// The identifiers this session operates under.
    pub fn ids(&self) -> &SessionIds {
        &self.ids
    }

    /// Current state, cloned for the view layer.
    pub fn state(&self) -> LoadState<BasketSnapshot> {
        self.state.borrow().clone()
    }

    /// The live notification, if any.
    pub fn notice(&self) -> Option<Notice> {
        self.notices.borrow().current().cloned()
    }

    /// Whether an add for this product is in flight.
    pub fn is_adding(&self, product_id: &ProductId) -> bool {
        self.adding.borrow().contains(product_id)
    }

    /// Whether a remove for this item is in flight.
    pub fn is_removing(&self, item_id: &ItemId) -> bool {
        self.removing.borrow().contains(item_id)
    }

    /// User-initiated dismissal of the live notification.
    pub fn dismiss_notice(&self) {
        self.notices.borrow_mut().dismiss();
    }

    /// Timer-driven expiry of a pushed notification.
    pub fn expire_notice(&self, token: NoticeToken) {
        self.notices.borrow_mut().expire(token);
    }

    /// Fetch the authoritative snapshot, replacing the state wholesale.
    ///
    /// When fetches race (e.g. a remove's follow-up against a manual
    /// retry) the last response to settle wins.
    pub async fn load(&self) {
        *self.state.borrow_mut() = LoadState::Loading;
        match self.service.fetch_items(&self.ids).await {
            Ok(snapshot) => {
                tracing::debug!(items = snapshot.items.len(), "basket snapshot replaced");
                *self.state.borrow_mut() = LoadState::Ready(snapshot);
            }
            Err(error) => {
                tracing::warn!(%error, "basket fetch failed");
                *self.state.borrow_mut() = LoadState::Error(BASKET_LOAD_FAILED.to_string());
            }
        }
    }

    /// Re-invoke [`load`] after a fetch failure (user-triggered only).
    ///
    /// [`load`]: BasketSession::load
    pub async fn retry(&self) {
        self.load().await;
    }

    /// Add a product to the basket.
    ///
    /// Marks the product busy for the duration; other products stay
    /// addable. The add response alone feeds the notification; the
    /// snapshot is considered stale until the next [`load`]. Returns the
    /// notification token so the caller can schedule its expiry, or
    /// `None` if an add for this product was already outstanding.
    ///
    /// [`load`]: BasketSession::load
    pub async fn add_product(&self, product_id: &ProductId) -> Option<NoticeToken> {
        if !self.adding.borrow_mut().insert(product_id.clone()) {
            return None;
        }

        let result = self.service.add_item(&self.ids, product_id).await;
        self.adding.borrow_mut().remove(product_id);

        let token = match result {
            Ok(item) => self.notices.borrow_mut().push(
                NoticeKind::Success,
                format!("{} added to basket", item.product_name),
            ),
            Err(error) => {
                tracing::warn!(%error, product_id = %product_id, "add to basket failed");
                self.notices.borrow_mut().push(NoticeKind::Failure, ADD_FAILED)
            }
        };
        Some(token)
    }

    /// Remove a line item from the basket.
    ///
    /// On success the authoritative snapshot is re-fetched before the
    /// success notification is pushed; on failure the snapshot is left
    /// untouched. Returns the notification token, or `None` if a remove
    /// for this item was already outstanding.
    pub async fn remove_item(&self, item_id: &ItemId) -> Option<NoticeToken> {
        if !self.removing.borrow_mut().insert(item_id.clone()) {
            return None;
        }

        let result = self.service.remove_item(&self.ids, item_id).await;
        self.removing.borrow_mut().remove(item_id);

        let token = match result {
            Ok(()) => {
                self.load().await;
                self.notices
                    .borrow_mut()
                    .push(NoticeKind::Success, REMOVE_SUCCEEDED)
            }
            Err(error) => {
                tracing::warn!(%error, item_id = %item_id, "remove from basket failed");
                self.notices
                    .borrow_mut()
                    .push(NoticeKind::Failure, REMOVE_FAILED)
            }
        };
        Some(token)
    }
}

/// Catalog listing state for the storefront page.
///
/// Same fetch/retry shape as the basket, over the product list.
pub struct CatalogSession<S: BasketService> {
    service: S,
    state: RefCell<LoadState<Vec<kiosk_core::Product>>>,
}

impl<S: BasketService> CatalogSession<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: RefCell::new(LoadState::Loading),
        }
    }

    /// Current state, cloned for the view layer.
    pub fn state(&self) -> LoadState<Vec<kiosk_core::Product>> {
        self.state.borrow().clone()
    }

    /// Fetch the catalog, replacing the listing wholesale.
    pub async fn load(&self) {
        *self.state.borrow_mut() = LoadState::Loading;
        match self.service.fetch_products().await {
            Ok(products) => *self.state.borrow_mut() = LoadState::Ready(products),
            Err(error) => {
                tracing::warn!(%error, "catalog fetch failed");
                *self.state.borrow_mut() = LoadState::Error(PRODUCTS_LOAD_FAILED.to_string());
            }
        }
    }

    /// Re-invoke [`load`] after a fetch failure (user-triggered only).
    ///
    /// [`load`]: CatalogSession::load
    pub async fn retry(&self) {
        self.load().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{line_item, session_ids, snapshot, AddOutcome, MockService};
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use kiosk_client::FetchError;
    use std::rc::Rc;

    fn failure() -> FetchError {
        FetchError::Http {
            status: 500,
            url: "/api/test".to_string(),
        }
    }

    #[test]
    fn test_load_success_enters_ready() {
        let mock = MockService::new();
        mock.script_fetch(Ok(snapshot(vec![line_item("item-1", "prod-1", "Widget")])));

        let session = BasketSession::new(mock, session_ids());
        assert!(session.state().is_loading());

        block_on(session.load());
        let state = session.state();
        let fetched = state.ready().expect("should be ready");
        assert_eq!(fetched.items.len(), 1);
    }

    #[test]
    fn test_load_failure_enters_error_and_retry_recovers() {
        let mock = MockService::new();
        mock.script_fetch(Err(failure()));
        mock.script_fetch(Ok(snapshot(vec![])));

        let session = BasketSession::new(mock, session_ids());

        block_on(session.load());
        assert_eq!(session.state().error(), Some(BASKET_LOAD_FAILED));

        block_on(session.retry());
        assert!(session.state().ready().is_some());
    }

    #[test]
    fn test_add_success_pushes_named_notification_and_clears_flag() {
        let mock = MockService::new();
        mock.script_add(AddOutcome::Ready(Ok(line_item("item-1", "p1", "Widget"))));

        let session = BasketSession::new(mock, session_ids());
        let token = block_on(session.add_product(&ProductId::new("p1")));

        assert!(token.is_some());
        assert!(!session.is_adding(&ProductId::new("p1")));

        let notice = session.notice().expect("notification expected");
        assert_eq!(notice.kind, NoticeKind::Success);
        assert!(notice.message.contains("Widget"));
    }

    #[test]
    fn test_add_does_not_refetch_snapshot() {
        let mock = MockService::new();
        mock.script_fetch(Ok(snapshot(vec![])));
        mock.script_add(AddOutcome::Ready(Ok(line_item("item-1", "p1", "Widget"))));
        let calls = mock.calls();

        let session = BasketSession::new(mock, session_ids());
        block_on(session.load());
        block_on(session.add_product(&ProductId::new("p1")));

        assert_eq!(&*calls.borrow(), &["fetch_items", "add_item"]);
    }

    #[test]
    fn test_add_failure_pushes_failure_notification_and_clears_flag() {
        let mock = MockService::new();
        mock.script_add(AddOutcome::Ready(Err(failure())));

        let session = BasketSession::new(mock, session_ids());
        block_on(session.add_product(&ProductId::new("p1")));

        assert!(!session.is_adding(&ProductId::new("p1")));
        let notice = session.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Failure);
        assert_eq!(notice.message, ADD_FAILED);
    }

    #[test]
    fn test_concurrent_adds_have_independent_flags() {
        let mock = MockService::new();
        let first = mock.script_pending_add();
        let second = mock.script_pending_add();

        let session = Rc::new(BasketSession::new(mock, session_ids()));
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        for id in ["p1", "p2"] {
            let session = session.clone();
            spawner
                .spawn_local(async move {
                    session.add_product(&ProductId::new(id)).await;
                })
                .unwrap();
        }

        pool.run_until_stalled();
        assert!(session.is_adding(&ProductId::new("p1")));
        assert!(session.is_adding(&ProductId::new("p2")));

        // Complete the second add first; p1 stays busy, p2 clears.
        second
            .send(Ok(line_item("item-2", "p2", "Second")))
            .unwrap();
        pool.run_until_stalled();
        assert!(session.is_adding(&ProductId::new("p1")));
        assert!(!session.is_adding(&ProductId::new("p2")));
        assert!(session.notice().unwrap().message.contains("Second"));

        first.send(Ok(line_item("item-1", "p1", "First"))).unwrap();
        pool.run_until_stalled();
        assert!(!session.is_adding(&ProductId::new("p1")));
        assert!(session.notice().unwrap().message.contains("First"));
    }

    #[test]
    fn test_double_submit_of_same_product_is_rejected() {
        let mock = MockService::new();
        let pending = mock.script_pending_add();

        let session = Rc::new(BasketSession::new(mock, session_ids()));
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        let background = session.clone();
        spawner
            .spawn_local(async move {
                background.add_product(&ProductId::new("p1")).await;
            })
            .unwrap();
        pool.run_until_stalled();

        // Same product while in flight: refused without touching the mock.
        let blocked = session.clone();
        spawner
            .spawn_local(async move {
                assert!(blocked.add_product(&ProductId::new("p1")).await.is_none());
            })
            .unwrap();
        pool.run_until_stalled();

        pending.send(Ok(line_item("item-1", "p1", "Widget"))).unwrap();
        pool.run();
    }

    #[test]
    fn test_remove_success_reloads_and_notifies() {
        let mock = MockService::new();
        mock.script_remove(Ok(()));
        mock.script_fetch(Ok(snapshot(vec![])));
        let calls = mock.calls();

        let session = BasketSession::new(mock, session_ids());
        block_on(session.remove_item(&ItemId::new("item-1")));

        assert_eq!(&*calls.borrow(), &["remove_item", "fetch_items"]);
        assert!(!session.is_removing(&ItemId::new("item-1")));

        let notice = session.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.message, REMOVE_SUCCEEDED);
    }

    #[test]
    fn test_remove_failure_leaves_snapshot_untouched() {
        let mock = MockService::new();
        mock.script_fetch(Ok(snapshot(vec![line_item("item-1", "p1", "Widget")])));
        mock.script_remove(Err(failure()));
        let calls = mock.calls();

        let session = BasketSession::new(mock, session_ids());
        block_on(session.load());
        let before = session.state();

        block_on(session.remove_item(&ItemId::new("item-1")));

        // No follow-up fetch, snapshot unchanged, failure notice pushed.
        assert_eq!(&*calls.borrow(), &["fetch_items", "remove_item"]);
        assert_eq!(session.state(), before);
        let notice = session.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Failure);
        assert_eq!(notice.message, REMOVE_FAILED);
    }

    #[test]
    fn test_catalog_load_and_retry() {
        let mock = MockService::new();
        mock.script_products(Err(failure()));
        mock.script_products(Ok(vec![]));

        let catalog = CatalogSession::new(mock);
        assert!(catalog.state().is_loading());

        block_on(catalog.load());
        assert_eq!(catalog.state().error(), Some(PRODUCTS_LOAD_FAILED));

        block_on(catalog.retry());
        assert_eq!(catalog.state().ready().map(Vec::len), Some(0));
    }

    #[test]
    fn test_notification_expiry_is_token_guarded() {
        let mock = MockService::new();
        mock.script_add(AddOutcome::Ready(Ok(line_item("item-1", "p1", "First"))));
        mock.script_add(AddOutcome::Ready(Ok(line_item("item-2", "p2", "Second"))));

        let session = BasketSession::new(mock, session_ids());
        let first = block_on(session.add_product(&ProductId::new("p1"))).unwrap();
        let second = block_on(session.add_product(&ProductId::new("p2"))).unwrap();

        // The first add's timer fires after the second push replaced it.
        session.expire_notice(first);
        assert!(session.notice().unwrap().message.contains("Second"));

        session.expire_notice(second);
        assert!(session.notice().is_none());
    }
}
