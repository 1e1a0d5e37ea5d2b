//! Scripted basket service for state machine tests.

use async_trait::async_trait;
use futures::channel::oneshot;
use kiosk_client::{BasketService, FetchError};
use kiosk_core::{BasketId, BasketSnapshot, ItemId, LineItem, Product, ProductId, StoreId};
use kiosk_session::SessionIds;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub(crate) fn session_ids() -> SessionIds {
    SessionIds {
        store_id: StoreId::new("store-001"),
        basket_id: BasketId::new("basket-123"),
    }
}

pub(crate) fn line_item(item_id: &str, product_id: &str, name: &str) -> LineItem {
    LineItem {
        item_id: ItemId::new(item_id),
        product_id: ProductId::new(product_id),
        product_name: name.to_string(),
        price: Some(1.0),
        quantity: Some(1),
        image_url: None,
    }
}

pub(crate) fn snapshot(items: Vec<LineItem>) -> BasketSnapshot {
    BasketSnapshot {
        item_count: items.len() as i64,
        items,
        last_updated_at: "2024-01-01T10:00:00".to_string(),
    }
}

/// Outcome of one scripted `add_item` call.
pub(crate) enum AddOutcome {
    /// Settle immediately.
    Ready(Result<LineItem, FetchError>),
    /// Stay in flight until the paired sender fires.
    Wait(oneshot::Receiver<Result<LineItem, FetchError>>),
}

/// Basket service double with per-operation scripts and a call log.
///
/// Each call consumes the next scripted outcome for its operation;
/// running past the script is a test bug and panics.
#[derive(Default)]
pub(crate) struct MockService {
    products: RefCell<VecDeque<Result<Vec<Product>, FetchError>>>,
    fetches: RefCell<VecDeque<Result<BasketSnapshot, FetchError>>>,
    adds: RefCell<VecDeque<AddOutcome>>,
    removes: RefCell<VecDeque<Result<(), FetchError>>>,
    calls: Rc<RefCell<Vec<&'static str>>>,
}

impl MockService {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> Rc<RefCell<Vec<&'static str>>> {
        self.calls.clone()
    }

    pub(crate) fn script_products(&self, outcome: Result<Vec<Product>, FetchError>) {
        self.products.borrow_mut().push_back(outcome);
    }

    pub(crate) fn script_fetch(&self, outcome: Result<BasketSnapshot, FetchError>) {
        self.fetches.borrow_mut().push_back(outcome);
    }

    pub(crate) fn script_add(&self, outcome: AddOutcome) {
        self.adds.borrow_mut().push_back(outcome);
    }

    /// Script an add that stays in flight until the returned sender fires.
    pub(crate) fn script_pending_add(&self) -> oneshot::Sender<Result<LineItem, FetchError>> {
        let (sender, receiver) = oneshot::channel();
        self.script_add(AddOutcome::Wait(receiver));
        sender
    }

    pub(crate) fn script_remove(&self, outcome: Result<(), FetchError>) {
        self.removes.borrow_mut().push_back(outcome);
    }
}

#[async_trait(?Send)]
impl BasketService for MockService {
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        self.calls.borrow_mut().push("fetch_products");
        self.products
            .borrow_mut()
            .pop_front()
            .expect("unscripted fetch_products call")
    }

    async fn fetch_items(&self, _ids: &SessionIds) -> Result<BasketSnapshot, FetchError> {
        self.calls.borrow_mut().push("fetch_items");
        self.fetches
            .borrow_mut()
            .pop_front()
            .expect("unscripted fetch_items call")
    }

    async fn add_item(
        &self,
        _ids: &SessionIds,
        _product_id: &ProductId,
    ) -> Result<LineItem, FetchError> {
        self.calls.borrow_mut().push("add_item");
        let outcome = self
            .adds
            .borrow_mut()
            .pop_front()
            .expect("unscripted add_item call");
        match outcome {
            AddOutcome::Ready(result) => result,
            AddOutcome::Wait(receiver) => receiver.await.expect("add sender dropped"),
        }
    }

    async fn remove_item(&self, _ids: &SessionIds, _item_id: &ItemId) -> Result<(), FetchError> {
        self.calls.borrow_mut().push("remove_item");
        self.removes
            .borrow_mut()
            .pop_front()
            .expect("unscripted remove_item call")
    }
}
