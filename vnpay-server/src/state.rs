//! Application state shared across all request handlers.

use std::sync::Arc;
use vnpay_sdk::HashSecret;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
/// The hash secret is loaded once at startup and never mutated.
#[derive(Clone, Debug)]
pub struct AppState {
    /// VNPay hash secret used to verify callbacks.
    pub secret: Arc<HashSecret>,
}

impl AppState {
    /// Create a new AppState from the loaded hash secret.
    pub fn new(secret: HashSecret) -> Self {
        Self {
            secret: Arc::new(secret),
        }
    }
}
