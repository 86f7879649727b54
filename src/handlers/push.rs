use axum::{Json, extract::State};
use serde_json::{Value, json};
use tracing::info;

use crate::router::AdhanState;
use crate::service::notifier::parse_subscription;
use crate::AdhanError;

/// GET /api/push/public-key -> VAPID key for `pushManager.subscribe`.
pub async fn public_key(State(state): State<AdhanState>) -> Result<Json<Value>, AdhanError> {
    let key = state
        .push
        .application_server_key()
        .ok_or(AdhanError::PushNotConfigured)?;
    Ok(Json(json!({ "public_key": key })))
}

/// POST /api/push/subscribe -> stores the browser's subscription as sent.
pub async fn subscribe(
    State(state): State<AdhanState>,
    Json(subscription): Json<Value>,
) -> Result<Json<Value>, AdhanError> {
    let info = parse_subscription(&subscription)?;
    state.storage.set_push_subscription(&subscription).await?;
    info!(endpoint = %info.endpoint, "push subscription registered");
    Ok(Json(json!({ "subscribed": true })))
}
