//! The checkout flow state machine.

use kiosk_client::BasketService;
use kiosk_core::{BasketId, BasketSnapshot, PaymentForm, PricingBreakdown, ValidationErrors};
use kiosk_session::{KeyValueStore, SessionIdentity, SessionIds};
use std::cell::RefCell;
use thiserror::Error;

use crate::session::BASKET_LOAD_FAILED;

/// Advisory message when payment authorization fails.
pub const PAYMENT_FAILED: &str = "Failed to process payment. Please try again.";

/// Payment authorization failure.
///
/// Structurally present to keep the state machine honest; the simulated
/// gateway shipped with the app never produces one.
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment was declined: {0}")]
    Declined(String),
}

/// Payment processor seam.
#[async_trait::async_trait(?Send)]
pub trait PaymentGateway {
    /// Authorize a payment for the given breakdown.
    async fn authorize(&self, breakdown: &PricingBreakdown) -> Result<(), PaymentError>;
}

/// What the shopper paid for, frozen at entry to `Processing`.
///
/// The completion screen renders from this capture, never from a re-read,
/// since continue-shopping rotates the session out from under it.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub snapshot: BasketSnapshot,
    pub breakdown: PricingBreakdown,
}

/// Phase of the checkout flow.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutPhase {
    /// Initial snapshot fetch in flight.
    Loading,
    /// Snapshot fetch failed; holds the user-facing message.
    Error(String),
    /// Snapshot fetched but the basket holds no items.
    Empty,
    /// Form entry over the fetched snapshot.
    Editing(BasketSnapshot),
    /// Payment authorization in flight over the frozen snapshot.
    Processing(BasketSnapshot),
    /// Terminal for this session.
    Complete(Receipt),
}

/// Drives checkout: snapshot fetch, local form validation, the payment
/// sub-machine, and post-completion session rotation.
pub struct CheckoutFlow<S: BasketService, P: PaymentGateway, K: KeyValueStore> {
    service: S,
    gateway: P,
    identity: SessionIdentity<K>,
    ids: SessionIds,
    phase: RefCell<CheckoutPhase>,
    validation: RefCell<ValidationErrors>,
    payment_error: RefCell<Option<String>>,
}

impl<S: BasketService, P: PaymentGateway, K: KeyValueStore> CheckoutFlow<S, P, K> {
    /// Create a flow in the `Loading` phase; call [`load`] to populate.
    ///
    /// [`load`]: CheckoutFlow::load
    pub fn new(service: S, gateway: P, identity: SessionIdentity<K>) -> Self {
        let ids = identity.resolve();
        Self {
            service,
            gateway,
            identity,
            ids,
            phase: RefCell::new(CheckoutPhase::Loading),
            validation: RefCell::new(ValidationErrors::default()),
            payment_error: RefCell::new(None),
        }
    }

    /// Current phase, cloned for the view layer.
    pub fn phase(&self) -> CheckoutPhase {
        self.phase.borrow().clone()
    }

    /// Inline validation failures from the last submit attempt.
    pub fn validation(&self) -> ValidationErrors {
        self.validation.borrow().clone()
    }

    /// Persistent alert from a failed payment attempt, if any.
    pub fn payment_error(&self) -> Option<String> {
        self.payment_error.borrow().clone()
    }

    /// Fetch the snapshot and classify it into `Empty`/`Editing`.
    pub async fn load(&self) {
        *self.phase.borrow_mut() = CheckoutPhase::Loading;
        match self.service.fetch_items(&self.ids).await {
            Ok(snapshot) if snapshot.is_empty() => {
                *self.phase.borrow_mut() = CheckoutPhase::Empty;
            }
            Ok(snapshot) => {
                *self.phase.borrow_mut() = CheckoutPhase::Editing(snapshot);
            }
            Err(error) => {
                tracing::warn!(%error, "checkout snapshot fetch failed");
                *self.phase.borrow_mut() = CheckoutPhase::Error(BASKET_LOAD_FAILED.to_string());
            }
        }
    }

    /// Re-invoke [`load`] after a fetch failure (user-triggered only).
    ///
    /// [`load`]: CheckoutFlow::load
    pub async fn retry(&self) {
        self.load().await;
    }

    /// Submit the payment form.
    ///
    /// Pattern validation runs first and entirely locally; on failure the
    /// flow stays in `Editing` with inline feedback and no payment call is
    /// made. On valid input the snapshot is frozen, the flow enters
    /// `Processing`, and the gateway decides `Complete` versus a return to
    /// `Editing` with a persistent alert.
    pub async fn submit(&self, form: &PaymentForm) {
        let snapshot = match &*self.phase.borrow() {
            CheckoutPhase::Editing(snapshot) => snapshot.clone(),
            _ => return,
        };

        match form.validate() {
            Ok(()) => *self.validation.borrow_mut() = ValidationErrors::default(),
            Err(errors) => {
                *self.validation.borrow_mut() = errors;
                return;
            }
        }

        *self.payment_error.borrow_mut() = None;
        let breakdown = PricingBreakdown::for_items(&snapshot.items);
        *self.phase.borrow_mut() = CheckoutPhase::Processing(snapshot.clone());
        tracing::debug!(total = breakdown.total, "payment authorization started");

        match self.gateway.authorize(&breakdown).await {
            Ok(()) => {
                *self.phase.borrow_mut() = CheckoutPhase::Complete(Receipt {
                    snapshot,
                    breakdown,
                });
            }
            Err(error) => {
                tracing::warn!(%error, "payment authorization failed");
                *self.payment_error.borrow_mut() = Some(PAYMENT_FAILED.to_string());
                *self.phase.borrow_mut() = CheckoutPhase::Editing(snapshot);
            }
        }
    }

    /// Rotate to a fresh basket after completion.
    ///
    /// Returns the new basket id for the caller to navigate with, or
    /// `None` when checkout has not completed.
    pub fn continue_shopping(&self) -> Option<BasketId> {
        match &*self.phase.borrow() {
            CheckoutPhase::Complete(_) => {}
            _ => return None,
        }
        Some(self.identity.rotate())
    }
}
