use crate::api::TimingsSource;
use crate::config::PushConfig;
use crate::db::SettingsStorage;
use crate::handlers::{assets, prayer_times, push, settings};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AdhanState {
    pub storage: SettingsStorage,
    pub timings: Arc<dyn TimingsSource>,
    pub push: Arc<PushConfig>,
}

impl AdhanState {
    pub fn new(
        storage: SettingsStorage,
        timings: Arc<dyn TimingsSource>,
        push: PushConfig,
    ) -> Self {
        Self {
            storage,
            timings,
            push: Arc::new(push),
        }
    }
}

pub fn adhan_router(state: AdhanState) -> Router {
    Router::new()
        .route("/", get(assets::index))
        .route("/sw.js", get(assets::service_worker))
        .route("/script.js", get(assets::script))
        .route("/api/times", get(prayer_times::prayer_times_handler))
        .route(
            "/api/location",
            get(settings::get_location).post(settings::set_location),
        )
        .route(
            "/api/select",
            get(settings::get_selection).post(settings::set_selection),
        )
        .route("/api/push/public-key", get(push::public_key))
        .route("/api/push/subscribe", post(push::subscribe))
        .with_state(state)
}
