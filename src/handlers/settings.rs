use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::Settings;
use crate::router::AdhanState;
use crate::service::method_resolver::resolve_method;
use crate::types::PrayerSet;
use crate::types::timings::SELECTABLE_PRAYERS;
use crate::AdhanError;

#[derive(Debug, Deserialize)]
pub struct LocationForm {
    pub city: String,
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectionForm {
    #[serde(default)]
    pub prayers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SelectionView {
    pub all_prayers: &'static [&'static str],
    pub selected: PrayerSet,
}

async fn require_location(state: &AdhanState) -> Result<Settings, AdhanError> {
    state
        .storage
        .load()
        .await?
        .filter(Settings::has_location)
        .ok_or(AdhanError::LocationNotSet)
}

/// GET /api/location
pub async fn get_location(State(state): State<AdhanState>) -> Result<Json<Settings>, AdhanError> {
    Ok(Json(require_location(&state).await?))
}

/// POST /api/location -> resolves the calculation method from the country
/// and stores the location, resetting the notification selection.
pub async fn set_location(
    State(state): State<AdhanState>,
    Json(form): Json<LocationForm>,
) -> Result<Json<Settings>, AdhanError> {
    let city = form.city.trim();
    let country = form.country.trim();
    if city.is_empty() || country.is_empty() {
        return Err(AdhanError::InvalidInput(
            "city and country are required".to_string(),
        ));
    }

    let method = resolve_method(country);
    let settings = state.storage.set_location(city, country, method).await?;
    info!(city, country, method = method.code(), "location updated");
    Ok(Json(settings))
}

/// GET /api/select
pub async fn get_selection(
    State(state): State<AdhanState>,
) -> Result<Json<SelectionView>, AdhanError> {
    let settings = require_location(&state).await?;
    Ok(Json(SelectionView {
        all_prayers: &SELECTABLE_PRAYERS,
        selected: settings.notified_prayers,
    }))
}

/// POST /api/select -> replaces the prayers that trigger a notification.
pub async fn set_selection(
    State(state): State<AdhanState>,
    Json(form): Json<SelectionForm>,
) -> Result<Json<SelectionView>, AdhanError> {
    require_location(&state).await?;

    if let Some(unknown) = form
        .prayers
        .iter()
        .find(|p| !SELECTABLE_PRAYERS.iter().any(|k| k.eq_ignore_ascii_case(p.trim())))
    {
        return Err(AdhanError::InvalidInput(format!(
            "unknown prayer: {unknown}"
        )));
    }

    let selected: PrayerSet = form.prayers.iter().collect();
    state.storage.set_notified_prayers(&selected).await?;
    info!(count = selected.len(), "notification selection updated");
    Ok(Json(SelectionView {
        all_prayers: &SELECTABLE_PRAYERS,
        selected,
    }))
}
