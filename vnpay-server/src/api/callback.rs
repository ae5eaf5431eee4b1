use axum::{http::StatusCode, response::IntoResponse};
use vnpay_sdk::params::{AMOUNT, RESPONSE_CODE, TXN_REF};

use crate::api::extractors::VerifiedCallback;

/// `GET /vnpay/return` — acknowledge an authentic VNPay callback.
///
/// Signature failures never reach this handler; the extractor answers them
/// with `400`.
pub(super) async fn vnpay_return(VerifiedCallback(params): VerifiedCallback) -> impl IntoResponse {
    tracing::info!(
        txn_ref = params.get(TXN_REF).unwrap_or_default(),
        amount = params.get(AMOUNT).unwrap_or_default(),
        response_code = params.get(RESPONSE_CODE).unwrap_or_default(),
        params = ?params,
        "VNPay callback verified"
    );
    (StatusCode::OK, "VNPay callback verified")
}
