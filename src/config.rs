//! Process configuration.
//!
//! Layering (later wins): built-in defaults, optional `config.toml`,
//! then `ADHAN_`-prefixed environment variables with `__` as the section
//! separator, e.g. `ADHAN_PUSH__VAPID_PUBLIC_KEY`.

use base64::Engine;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

pub const CONFIG_FILE: &str = "config.toml";

pub static CONFIG: LazyLock<Config> =
    LazyLock::new(|| Config::load().expect("FATAL: invalid configuration"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
    pub timings: TimingsConfig,
    pub notify: NotifyConfig,
    pub push: PushConfig,
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed("ADHAN_").split("__"))
            .extract()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    pub listen_addr: String,
    pub database_url: String,
    pub loglevel: String,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite://adhan.db".to_string(),
            loglevel: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingsConfig {
    pub endpoint: Url,
}

impl Default for TimingsConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse("http://api.aladhan.com/v1/timingsByCity")
                .expect("static timings endpoint is a valid URL"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    pub poll_interval_secs: u64,
    pub cooldown_secs: u64,
    pub title: String,
}

impl NotifyConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 60,
            cooldown_secs: 30,
            title: "Prayer time".to_string(),
        }
    }
}

/// VAPID key pair and message options for Web Push.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    /// Uncompressed P-256 public key, URL-safe base64 without padding.
    pub vapid_public_key: Option<String>,
    /// PKCS#8 or SEC1 PEM of the matching private key.
    pub vapid_private_key_pem: Option<String>,
    pub subject: String,
    pub ttl_secs: u32,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            vapid_public_key: None,
            vapid_private_key_pem: None,
            subject: "mailto:admin@localhost".to_string(),
            ttl_secs: 600,
        }
    }
}

impl PushConfig {
    /// Both halves of the key pair, if present and non-blank.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let public = self.vapid_public_key.as_deref().map(str::trim)?;
        let private = self.vapid_private_key_pem.as_deref().map(str::trim)?;
        if public.is_empty() || private.is_empty() {
            return None;
        }
        Some((public, private))
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }

    /// The public key as the browser expects it for `applicationServerKey`,
    /// or `None` when it does not decode to an uncompressed P-256 point.
    pub fn application_server_key(&self) -> Option<&str> {
        let (public, _) = self.credentials()?;
        let raw = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(public)
            .ok()?;
        (raw.len() == 65 && raw[0] == 0x04).then_some(public)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_polling_contract() {
        let cfg = Config::default();
        assert_eq!(cfg.notify.poll_interval(), Duration::from_secs(60));
        assert_eq!(cfg.notify.cooldown(), Duration::from_secs(30));
        assert_eq!(
            cfg.timings.endpoint.as_str(),
            "http://api.aladhan.com/v1/timingsByCity"
        );
        assert!(!cfg.push.is_configured());
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let push = PushConfig {
            vapid_public_key: Some("  ".to_string()),
            vapid_private_key_pem: Some("pem".to_string()),
            ..PushConfig::default()
        };
        assert!(push.credentials().is_none());
    }

    #[test]
    fn application_server_key_requires_uncompressed_point() {
        let mut point = vec![0x04u8];
        point.extend_from_slice(&[7u8; 64]);
        let encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&point);
        let push = PushConfig {
            vapid_public_key: Some(encoded.clone()),
            vapid_private_key_pem: Some("pem".to_string()),
            ..PushConfig::default()
        };
        assert_eq!(push.application_server_key(), Some(encoded.as_str()));

        let short = PushConfig {
            vapid_public_key: Some("AAAA".to_string()),
            ..push
        };
        assert_eq!(short.application_server_key(), None);
    }
}
