#![allow(dead_code)]

use adhan_push::AdhanError;
use adhan_push::api::TimingsSource;
use adhan_push::db::SettingsStorage;
use adhan_push::service::notification_loop::Clock;
use adhan_push::service::notifier::Notifier;
use adhan_push::types::{CalculationMethod, PushMessage, Timings};
use serde_json::{Value, json};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub async fn memory_storage() -> SettingsStorage {
    SettingsStorage::connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory sqlite")
}

pub fn subscription() -> Value {
    json!({
        "endpoint": "https://push.example.com/send/abc123",
        "expirationTime": null,
        "keys": {"p256dh": "BNcRdreALRFXTkOOUHK1EtK2wtaz5Ry4YfYCA", "auth": "tBHItJI5svbpez7KI4CCXg"}
    })
}

/// Timings source returning a fixed snapshot, or failing when none is set.
#[derive(Default)]
pub struct FakeTimings {
    timings: Mutex<Option<Timings>>,
    calls: AtomicUsize,
    last_query: Mutex<Option<(String, String, CalculationMethod)>>,
}

impl FakeTimings {
    pub fn with(pairs: &[(&str, &str)]) -> Self {
        let fake = Self::default();
        *fake.timings.lock().unwrap() = Some(pairs.iter().copied().collect());
        fake
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<(String, String, CalculationMethod)> {
        self.last_query.lock().unwrap().clone()
    }
}

#[ractor::async_trait]
impl TimingsSource for FakeTimings {
    async fn fetch(
        &self,
        city: &str,
        country: &str,
        method: CalculationMethod,
    ) -> Result<Timings, AdhanError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some((city.to_string(), country.to_string(), method));
        self.timings
            .lock()
            .unwrap()
            .clone()
            .ok_or(AdhanError::UpstreamCode(500))
    }
}

/// Notifier that records every message instead of delivering it.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(Value, PushMessage)>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(Value, PushMessage)> {
        self.sent.lock().unwrap().clone()
    }
}

#[ractor::async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, subscription: &Value, message: &PushMessage) -> Result<(), AdhanError> {
        self.sent
            .lock()
            .unwrap()
            .push((subscription.clone(), message.clone()));
        if self.fail {
            return Err(AdhanError::PushDelivery("410 Gone".to_string()));
        }
        Ok(())
    }
}

pub struct FixedClock(Mutex<String>);

impl FixedClock {
    pub fn at(hhmm: &str) -> Self {
        Self(Mutex::new(hhmm.to_string()))
    }

    pub fn set(&self, hhmm: &str) {
        *self.0.lock().unwrap() = hhmm.to_string();
    }
}

impl Clock for FixedClock {
    fn now_hhmm(&self) -> String {
        self.0.lock().unwrap().clone()
    }
}
