//! # Cart State
//!
//! The storefront cart plus the coupon the shopper selected.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>`: almost every cart command
//! mutates it, so a read/write split buys nothing here.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use storefront_core::Cart;

/// One shopper's cart and coupon selection.
#[derive(Debug, Clone)]
pub struct CartSession {
    pub cart: Cart,

    /// Code of the selected coupon; at most one applies per checkout.
    pub coupon_code: Option<String>,

    /// When the cart was opened or last cleared.
    pub opened_at: DateTime<Utc>,
}

impl CartSession {
    pub fn new() -> Self {
        CartSession {
            cart: Cart::new(),
            coupon_code: None,
            opened_at: Utc::now(),
        }
    }

    /// Empties the cart, drops the coupon and restarts the session clock.
    pub fn reset(&mut self) {
        self.cart.clear();
        self.coupon_code = None;
        self.opened_at = Utc::now();
    }
}

impl Default for CartSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared cart session.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    session: Arc<Mutex<CartSession>>,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the session.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartSession) -> R,
    {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    /// Executes a function with write access to the session.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartSession) -> R,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }
}
