//! TOML file configuration structures.
//!
//! These structs directly map to the `vnpay-config.toml` file format.

use serde::Deserialize;
use std::net::SocketAddr;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub vnpay: VnpayConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// VNPay merchant section.
#[derive(Clone, Deserialize)]
pub struct VnpayConfig {
    /// Hash secret issued by VNPay. Usually left out of the file and
    /// supplied through `VNPAY_HASH_SECRET` instead.
    #[serde(default)]
    pub hash_secret: Option<String>,
    /// Path VNPay redirects the customer to after payment.
    #[serde(default = "default_return_path")]
    pub return_path: String,
}

impl Default for VnpayConfig {
    fn default() -> Self {
        Self {
            hash_secret: None,
            return_path: default_return_path(),
        }
    }
}

impl std::fmt::Debug for VnpayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VnpayConfig")
            .field("hash_secret", &self.hash_secret.as_ref().map(|_| "<redacted>"))
            .field("return_path", &self.return_path)
            .finish()
    }
}

fn default_return_path() -> String {
    "/vnpay/return".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"

[vnpay]
hash_secret = "secret123"
return_path = "/payments/vnpay/return"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.vnpay.hash_secret.as_deref(), Some("secret123"));
        assert_eq!(config.vnpay.return_path, "/payments/vnpay/return");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.listen, default_listen_addr());
        assert_eq!(config.vnpay.hash_secret, None);
        assert_eq!(config.vnpay.return_path, "/vnpay/return");
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = VnpayConfig {
            hash_secret: Some("secret123".to_string()),
            return_path: default_return_path(),
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret123"));
    }
}
