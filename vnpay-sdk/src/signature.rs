//! Signature algorithm and verification for VNPay callbacks.
//!
//! VNPay signs every callback with HMAC-SHA512 over a canonical rendering
//! of its parameters and sends the hex digest in `vnp_SecureHash`:
//!
//! ```text
//! payload = "{k1}={v1}&{k2}={v2}&...&{kn}={vn}"
//! vnp_SecureHash = hex(HMAC-SHA512(hash_secret, payload))
//! ```
//!
//! Keys are sorted byte-wise, `vnp_SecureHash` and `vnp_SecureHashType` are
//! left out, and values are taken exactly as received (no re-encoding).

use ring::hmac;

use crate::params::{CallbackParams, SECURE_HASH, SECURE_HASH_TYPE};

/// Errors produced by signature operations.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("hash secret must not be empty")]
    EmptySecret,
}

// ---------------------------------------------------------------------------
// HashSecret
// ---------------------------------------------------------------------------

/// The merchant hash secret shared with VNPay.
///
/// The HMAC key is derived once on construction. `Debug` never prints the
/// secret.
#[derive(Clone)]
pub struct HashSecret {
    key: hmac::Key,
}

impl HashSecret {
    /// Build a secret from its raw bytes. An empty secret is rejected since
    /// it can only come from a broken deployment.
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, SignatureError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(SignatureError::EmptySecret);
        }
        Ok(Self {
            key: hmac::Key::new(hmac::HMAC_SHA512, &secret),
        })
    }

    fn sign(&self, data: &[u8]) -> hmac::Tag {
        hmac::sign(&self.key, data)
    }

    fn verify(&self, data: &[u8], tag: &[u8]) -> bool {
        hmac::verify(&self.key, data, tag).is_ok()
    }
}

impl std::fmt::Debug for HashSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HashSecret(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// Canonicalization and signing
// ---------------------------------------------------------------------------

/// Render the signed payload: every non-reserved `key=value` pair in
/// byte-wise key order, joined with `&`.
pub fn canonical_payload(params: &CallbackParams) -> String {
    let mut payload = String::new();
    for (key, value) in params.signable() {
        if !payload.is_empty() {
            payload.push('&');
        }
        payload.push_str(key);
        payload.push('=');
        payload.push_str(value);
    }
    payload
}

/// Lowercase hex HMAC-SHA512 of the canonical payload.
pub fn compute_signature(params: &CallbackParams, secret: &HashSecret) -> String {
    hex::encode(secret.sign(canonical_payload(params).as_bytes()))
}

/// Sign `params` in place the way VNPay does.
///
/// Any reserved keys already present are dropped first, then the computed
/// digest is stored under `vnp_SecureHash`.
pub fn sign_params(params: &mut CallbackParams, secret: &HashSecret) {
    params.remove(SECURE_HASH);
    params.remove(SECURE_HASH_TYPE);
    let signature = compute_signature(params, secret);
    params.insert(SECURE_HASH, signature);
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Outcome of [`verify`], with the intermediate values kept for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    pub authentic: bool,
    /// `vnp_SecureHash` as received, `None` when the callback had none.
    pub received_signature: Option<String>,
    pub computed_signature: String,
    pub canonical_payload: String,
}

/// Check whether `params` carries a valid `vnp_SecureHash` under `secret`.
///
/// Never fails: a missing, non-hex or wrong-length signature and an empty
/// parameter set all yield `authentic == false`. The received hex is decoded
/// before comparison, so its letter case does not matter. The digest
/// comparison itself is constant-time.
pub fn verify(params: &CallbackParams, secret: &HashSecret) -> VerificationResult {
    let canonical_payload = canonical_payload(params);
    let tag = secret.sign(canonical_payload.as_bytes());
    let computed_signature = hex::encode(tag.as_ref());
    let received_signature = params.get(SECURE_HASH).map(str::to_owned);

    let authentic = !params.is_empty()
        && received_signature
            .as_deref()
            .and_then(|hex_sig| hex::decode(hex_sig).ok())
            .is_some_and(|raw| secret.verify(canonical_payload.as_bytes(), &raw));

    VerificationResult {
        authentic,
        received_signature,
        computed_signature,
        canonical_payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{AMOUNT, TXN_REF};

    const SECRET: &str = "TESTSECRETKEY0123456789ABCDEFGHIJ";

    // HMAC-SHA512("vnp_Amount=100000&vnp_TxnRef=TX1") under SECRET.
    const TX1_SIGNATURE: &str = "3aff704122f2fa4c9fa00259121f7e3e38b4d00262e73c9a5c10476f256025db\
                                 173debee1e579dc569774fd14a21ade6a918f9f596f9b6bf7f8b7c51fdc17c04";

    fn secret() -> HashSecret {
        HashSecret::new(SECRET).unwrap()
    }

    fn tx1() -> CallbackParams {
        [(AMOUNT, "100000"), (TXN_REF, "TX1")].into_iter().collect()
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            HashSecret::new(""),
            Err(SignatureError::EmptySecret)
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", secret());
        assert!(!rendered.contains(SECRET));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn test_canonical_payload() {
        let mut params = tx1();
        params.insert(SECURE_HASH, "deadbeef");
        params.insert(SECURE_HASH_TYPE, "HmacSHA512");
        assert_eq!(
            canonical_payload(&params),
            "vnp_Amount=100000&vnp_TxnRef=TX1"
        );
    }

    #[test]
    fn test_canonical_payload_keeps_empty_and_raw_values() {
        let params: CallbackParams = [("vnp_BankTranNo", ""), ("vnp_OrderInfo", "Thanh toan&x=1")]
            .into_iter()
            .collect();
        assert_eq!(
            canonical_payload(&params),
            "vnp_BankTranNo=&vnp_OrderInfo=Thanh toan&x=1"
        );
    }

    #[test]
    fn test_compute_signature_known_vector() {
        assert_eq!(compute_signature(&tx1(), &secret()), TX1_SIGNATURE);
    }

    #[test]
    fn test_verify_known_vector() {
        let mut params = tx1();
        params.insert(SECURE_HASH, TX1_SIGNATURE);
        let result = verify(&params, &secret());
        assert!(result.authentic);
        assert_eq!(result.computed_signature, TX1_SIGNATURE);
        assert_eq!(result.received_signature.as_deref(), Some(TX1_SIGNATURE));
        assert_eq!(result.canonical_payload, "vnp_Amount=100000&vnp_TxnRef=TX1");
    }

    #[test]
    fn test_verify_rejects_tampered_amount() {
        let mut params = tx1();
        params.insert(SECURE_HASH, TX1_SIGNATURE);
        params.insert(AMOUNT, "100001");
        let result = verify(&params, &secret());
        assert!(!result.authentic);
        assert_ne!(result.computed_signature, TX1_SIGNATURE);
    }

    #[test]
    fn test_verify_is_case_insensitive() {
        let mut params = tx1();
        params.insert(SECURE_HASH, TX1_SIGNATURE.to_uppercase());
        assert!(verify(&params, &secret()).authentic);
    }

    #[test]
    fn test_verify_missing_signature() {
        let result = verify(&tx1(), &secret());
        assert!(!result.authentic);
        assert_eq!(result.received_signature, None);
        assert_eq!(result.computed_signature, TX1_SIGNATURE);
    }

    #[test]
    fn test_verify_empty_params() {
        let result = verify(&CallbackParams::new(), &secret());
        assert!(!result.authentic);
        assert_eq!(result.canonical_payload, "");
    }

    #[test]
    fn test_verify_rejects_non_hex_and_truncated() {
        let mut params = tx1();
        params.insert(SECURE_HASH, "not-hex");
        assert!(!verify(&params, &secret()).authentic);

        params.insert(SECURE_HASH, &TX1_SIGNATURE[..64]);
        assert!(!verify(&params, &secret()).authentic);

        params.insert(SECURE_HASH, "");
        assert!(!verify(&params, &secret()).authentic);
    }

    #[test]
    fn test_verify_wrong_secret() {
        let mut params = tx1();
        params.insert(SECURE_HASH, TX1_SIGNATURE);
        let other = HashSecret::new("ANOTHERSECRET").unwrap();
        assert!(!verify(&params, &other).authentic);
    }

    #[test]
    fn test_sign_params_replaces_reserved_keys() {
        let mut params = tx1();
        params.insert(SECURE_HASH, "stale");
        params.insert(SECURE_HASH_TYPE, "SHA256");
        sign_params(&mut params, &secret());
        assert_eq!(params.get(SECURE_HASH), Some(TX1_SIGNATURE));
        assert!(!params.contains_key(SECURE_HASH_TYPE));
        assert!(verify(&params, &secret()).authentic);
    }
}
