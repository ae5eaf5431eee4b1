//! VNPay API handlers.
//!
//! # Endpoints
//!
//! - `GET {return_path}` – VNPay return URL; answers `200` for an authentic
//!   callback and `400` otherwise

use axum::{Router, routing::get};

use crate::state::AppState;

mod callback;
mod extractors;

/// Build the VNPay router, mounting the return handler at `return_path`.
pub fn router(return_path: &str) -> Router<AppState> {
    Router::new().route(return_path, get(callback::vnpay_return))
}
