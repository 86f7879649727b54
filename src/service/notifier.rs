use crate::config::PushConfig;
use crate::error::AdhanError;
use crate::types::PushMessage;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;
use tracing::debug;
use url::Url;
use web_push::{
    ContentEncoding, IsahcWebPushClient, SubscriptionInfo, VapidSignatureBuilder, WebPushClient,
    WebPushError, WebPushMessageBuilder,
};

/// Delivers a message to one browser subscription.
#[ractor::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, subscription: &Value, message: &PushMessage) -> Result<(), AdhanError>;
}

/// Check that an opaque subscription payload is usable for Web Push:
/// an absolute endpoint URL plus non-empty `p256dh`/`auth` keys.
pub fn parse_subscription(subscription: &Value) -> Result<SubscriptionInfo, AdhanError> {
    let info: SubscriptionInfo = serde_json::from_value(subscription.clone())
        .map_err(|e| AdhanError::InvalidSubscription(e.to_string()))?;
    Url::parse(&info.endpoint)
        .map_err(|e| AdhanError::InvalidSubscription(format!("endpoint: {e}")))?;
    if info.keys.p256dh.is_empty() || info.keys.auth.is_empty() {
        return Err(AdhanError::InvalidSubscription(
            "subscription keys are empty".to_string(),
        ));
    }
    Ok(info)
}

/// Uncompressed public key that `private_pem` signs for.
pub fn public_key_from_pem(private_pem: &str) -> Result<Vec<u8>, AdhanError> {
    VapidSignatureBuilder::from_pem_no_sub(private_pem.as_bytes())
        .map(|partial| partial.get_public_key())
        .map_err(|e| AdhanError::InvalidVapidKey(format!("private key: {e}")))
}

/// Fails unless the configured public key belongs to the configured private
/// key; browsers subscribe with the public half.
pub fn check_key_pair(config: &PushConfig) -> Result<(), AdhanError> {
    let (public, private_pem) = config.credentials().ok_or(AdhanError::PushNotConfigured)?;
    let configured = URL_SAFE_NO_PAD
        .decode(public.trim_end_matches('='))
        .map_err(|e| AdhanError::InvalidVapidKey(format!("public key: {e}")))?;
    if configured != public_key_from_pem(private_pem)? {
        return Err(AdhanError::InvalidVapidKey(
            "public key does not match the private key".to_string(),
        ));
    }
    Ok(())
}

fn delivery_error(e: WebPushError) -> AdhanError {
    AdhanError::PushDelivery(e.to_string())
}

/// Web Push (VAPID) delivery.
pub struct WebPushNotifier {
    config: PushConfig,
    client: IsahcWebPushClient,
}

impl WebPushNotifier {
    pub fn new(config: PushConfig) -> Result<Self, AdhanError> {
        let client = IsahcWebPushClient::new().map_err(delivery_error)?;
        Ok(Self { config, client })
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }
}

#[ractor::async_trait]
impl Notifier for WebPushNotifier {
    async fn send(&self, subscription: &Value, message: &PushMessage) -> Result<(), AdhanError> {
        let Some((_, private_pem)) = self.config.credentials() else {
            return Err(AdhanError::PushNotConfigured);
        };
        let info = parse_subscription(subscription)?;
        let payload = serde_json::to_vec(message)?;

        let mut sig_builder =
            VapidSignatureBuilder::from_pem(private_pem.as_bytes(), &info).map_err(delivery_error)?;
        sig_builder.add_claim("sub", self.config.subject.as_str());
        let signature = sig_builder.build().map_err(delivery_error)?;

        let mut builder = WebPushMessageBuilder::new(&info);
        builder.set_ttl(self.config.ttl_secs);
        builder.set_payload(ContentEncoding::Aes128Gcm, &payload);
        builder.set_vapid_signature(signature);
        let push = builder.build().map_err(delivery_error)?;

        self.client.send(push).await.map_err(delivery_error)?;
        debug!(endpoint = %info.endpoint, "push notification delivered");
        Ok(())
    }
}
