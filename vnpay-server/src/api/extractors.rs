//! Custom Axum extractor for VNPay callback authentication.
//!
//! `VerifiedCallback` parses the query string into [`CallbackParams`] and
//! checks its `vnp_SecureHash` against the configured hash secret.
//!
//! All cryptographic operations are delegated to [`vnpay_sdk::signature`].

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use vnpay_sdk::{CallbackParams, ParamsError, verify};

use crate::state::AppState;

/// An Axum extractor that yields the callback parameters only when their
/// signature checks out.
///
/// # Query format
///
/// ```text
/// ?vnp_Amount=...&vnp_TxnRef=...&vnp_SecureHashType=HmacSHA512&vnp_SecureHash={hex}
/// ```
///
/// The signature is `hex(HMAC-SHA512("{k1}={v1}&...", hash_secret))` over
/// all parameters except the two `vnp_SecureHash*` ones, keys sorted.
pub struct VerifiedCallback(pub CallbackParams);

/// Errors returned by the [`VerifiedCallback`] extractor.
#[derive(Debug, thiserror::Error)]
pub enum CallbackRejection {
    #[error("malformed query string: {0}")]
    MalformedQuery(#[from] ParamsError),
    #[error("signature verification failed")]
    InvalidSignature,
}

impl IntoResponse for CallbackRejection {
    fn into_response(self) -> Response {
        let message = match self {
            CallbackRejection::MalformedQuery(_) => "malformed query string",
            CallbackRejection::InvalidSignature => "invalid signature",
        };
        (StatusCode::BAD_REQUEST, message).into_response()
    }
}

impl FromRequestParts<AppState> for VerifiedCallback {
    type Rejection = CallbackRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();
        let params = CallbackParams::from_query(query).map_err(|e| {
            tracing::warn!(error = %e, "Rejected VNPay callback with malformed query");
            e
        })?;

        let result = verify(&params, &state.secret);
        if !result.authentic {
            tracing::warn!(
                params = ?params,
                received = result.received_signature.as_deref().unwrap_or("<missing>"),
                computed = %result.computed_signature,
                canonical_payload = %result.canonical_payload,
                "VNPay callback signature mismatch"
            );
            return Err(CallbackRejection::InvalidSignature);
        }

        Ok(VerifiedCallback(params))
    }
}
