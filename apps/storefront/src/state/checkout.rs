//! # Checkout State
//!
//! The wizard lives in memory only: a restart begins at step 1 with a blank
//! form.

use storefront_core::Checkout;
use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct CheckoutState {
    checkout: Mutex<Checkout>,
}

impl CheckoutState {
    pub fn new() -> Self {
        CheckoutState::default()
    }

    pub async fn lock(&self) -> MutexGuard<'_, Checkout> {
        self.checkout.lock().await
    }

    /// Copy of the current wizard state.
    pub async fn snapshot(&self) -> Checkout {
        self.checkout.lock().await.clone()
    }
}
