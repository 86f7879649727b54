use axum::{Json, extract::State};
use serde::Serialize;

use crate::router::AdhanState;
use crate::types::DisplayTime;
use crate::AdhanError;

#[derive(Debug, Serialize)]
pub struct PrayerTimesView {
    pub no_location: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<i64>,
    pub times: Vec<DisplayTime>,
}

/// GET /api/times -> today's times for the stored location, 12-hour format.
///
/// A provider failure is not an error here: the view simply has no times.
pub async fn prayer_times_handler(
    State(state): State<AdhanState>,
) -> Result<Json<PrayerTimesView>, AdhanError> {
    let Some(settings) = state.storage.load().await?.filter(|s| s.has_location()) else {
        return Ok(Json(PrayerTimesView {
            no_location: true,
            city: None,
            country: None,
            method: None,
            times: Vec::new(),
        }));
    };

    let times = state
        .timings
        .fetch(&settings.city, &settings.country, settings.method)
        .await
        .map(|timings| timings.display_entries())
        .unwrap_or_default();

    Ok(Json(PrayerTimesView {
        no_location: false,
        method: Some(settings.method.code()),
        city: Some(settings.city),
        country: Some(settings.country),
        times,
    }))
}
