use crate::error::AdhanError;
use crate::types::{CalculationMethod, Timings};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Source of a day's prayer timings for a location.
#[ractor::async_trait]
pub trait TimingsSource: Send + Sync {
    async fn fetch(
        &self,
        city: &str,
        country: &str,
        method: CalculationMethod,
    ) -> Result<Timings, AdhanError>;
}

/// Response envelope of `timingsByCity`. `data` is an object on success and
/// an error string otherwise, so it is kept untyped until `code` is checked.
#[derive(Debug, Deserialize)]
struct TimingsEnvelope {
    code: i64,
    #[serde(default)]
    data: Value,
}

/// Decode a `timingsByCity` body into the timings map.
pub fn parse_timings(body: &[u8]) -> Result<Timings, AdhanError> {
    let envelope: TimingsEnvelope = serde_json::from_slice(body)?;
    if envelope.code != 200 {
        return Err(AdhanError::UpstreamCode(envelope.code));
    }
    let timings: Timings = envelope
        .data
        .get("timings")
        .and_then(Value::as_object)
        .ok_or(AdhanError::MissingTimings)?
        .iter()
        .filter_map(|(prayer, time)| time.as_str().map(|t| (prayer.as_str(), t)))
        .collect();
    if timings.is_empty() {
        return Err(AdhanError::MissingTimings);
    }
    Ok(timings)
}

/// Client for the Aladhan `timingsByCity` endpoint.
#[derive(Clone)]
pub struct AladhanApi {
    client: reqwest::Client,
    endpoint: Url,
}

impl AladhanApi {
    pub fn new(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub async fn get_timings(
        &self,
        city: &str,
        country: &str,
        method: CalculationMethod,
    ) -> Result<Timings, AdhanError> {
        let method = method.code().to_string();
        let resp = self
            .client
            .get(self.endpoint.clone())
            .query(&[("city", city), ("country", country), ("method", method.as_str())])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AdhanError::UpstreamStatus(status));
        }
        let body = resp.bytes().await?;
        let timings = parse_timings(&body)?;
        debug!(city, country, count = timings.len(), "fetched prayer timings");
        Ok(timings)
    }
}

#[ractor::async_trait]
impl TimingsSource for AladhanApi {
    async fn fetch(
        &self,
        city: &str,
        country: &str,
        method: CalculationMethod,
    ) -> Result<Timings, AdhanError> {
        self.get_timings(city, country, method)
            .await
            .inspect_err(|e| warn!(city, country, error = %e, "failed to fetch prayer timings"))
    }
}
