//! Application session state
//!
//! Explicit session context instead of a process-wide key-value bag:
//! the current logged-in user plus the reactive cart, reset together
//! on logout. Lifetime is bound to the process; nothing here touches
//! the persistent store.

mod cart;

pub use cart::CartState;

use parking_lot::RwLock;

/// Process-wide session: current user and cart.
#[derive(Default)]
pub struct SessionContext {
    user: RwLock<Option<String>>,
    cart: CartState,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `username` as the logged-in user.
    pub fn sign_in(&self, username: impl Into<String>) {
        *self.user.write() = Some(username.into());
    }

    /// Clear the logged-in flag, current user, and cart in one step.
    pub fn sign_out(&self) {
        *self.user.write() = None;
        self.cart.clear();
    }

    pub fn current_user(&self) -> Option<String> {
        self.user.read().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.read().is_some()
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }
}
