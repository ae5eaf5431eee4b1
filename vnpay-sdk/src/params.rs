//! Callback parameter mapping.
//!
//! VNPay delivers its result as query-string parameters on the merchant's
//! return URL:
//!
//! ```text
//! GET /vnpay/return?vnp_Amount=100000&vnp_TxnRef=TX1&...&vnp_SecureHash={hex}
//! ```
//!
//! [`CallbackParams`] keeps them in an ordered map so iteration always
//! follows the byte-wise order of the keys, which is the order the
//! signature is computed over.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Reserved parameter carrying the processor's hex-encoded HMAC.
pub const SECURE_HASH: &str = "vnp_SecureHash";

/// Reserved parameter naming the hash algorithm. Informational only.
pub const SECURE_HASH_TYPE: &str = "vnp_SecureHashType";

/// Amount in the smallest currency unit, multiplied by 100.
pub const AMOUNT: &str = "vnp_Amount";

/// Merchant-side order reference.
pub const TXN_REF: &str = "vnp_TxnRef";

/// Gateway response code (`00` means success).
pub const RESPONSE_CODE: &str = "vnp_ResponseCode";

/// Transaction status at the gateway (`00` means success).
pub const TRANSACTION_STATUS: &str = "vnp_TransactionStatus";

/// Gateway-side transaction number.
pub const TRANSACTION_NO: &str = "vnp_TransactionNo";

/// Merchant terminal code.
pub const TMN_CODE: &str = "vnp_TmnCode";

/// Payment time, `yyyyMMddHHmmss` in GMT+7.
pub const PAY_DATE: &str = "vnp_PayDate";

/// Errors produced while parsing a raw query string.
#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    #[error("malformed query string: {0}")]
    MalformedQuery(String),
}

/// Callback parameters as received on the wire.
///
/// Keys and values are opaque text. Inserting an existing key replaces its
/// value, so the last occurrence of a duplicated key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackParams(BTreeMap<String, String>);

impl CallbackParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` query string.
    ///
    /// A leading `?` is ignored, `+` decodes to a space and empty segments
    /// are skipped. A segment without `=` is a key with an empty value.
    pub fn from_query(query: &str) -> Result<Self, ParamsError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::new();
        for segment in query.split('&').filter(|s| !s.is_empty()) {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            params.insert(decode_component(key)?, decode_component(value)?);
        }
        Ok(params)
    }

    /// Encode back into a query string, keys in byte-wise order.
    pub fn to_query(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over all parameters in byte-wise key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over the parameters that participate in signing, i.e.
    /// everything except [`SECURE_HASH`] and [`SECURE_HASH_TYPE`].
    pub fn signable(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(k, _)| !is_reserved(k))
    }
}

/// Whether `key` is excluded from the signed payload.
pub fn is_reserved(key: &str) -> bool {
    key == SECURE_HASH || key == SECURE_HASH_TYPE
}

fn decode_component(raw: &str) -> Result<String, ParamsError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .map_err(|e| ParamsError::MalformedQuery(e.to_string()))
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CallbackParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for CallbackParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl From<std::collections::HashMap<String, String>> for CallbackParams {
    fn from(map: std::collections::HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl IntoIterator for CallbackParams {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
