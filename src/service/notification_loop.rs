//! One pass of the prayer notification poll.
//!
//! A cycle loads the settings row, fetches today's timings and pushes a
//! reminder for each selected prayer whose "HH:MM" equals the wall clock.
//! After every dispatch it sleeps for the cooldown before scanning on.
//!
//! Duplicate suppression is only that cooldown: nothing records that a
//! prayer was already notified today. If the poll interval is not longer
//! than the cooldown, or the clock jitters around a minute boundary, a
//! prayer can be notified twice or not at all.
//!
//! The driver re-arms its timer only after a cycle returns, so the real
//! period is the poll interval plus fetch latency (and any cooldowns). The
//! schedule drifts later each cycle and now and then steps over a whole
//! minute, so a prayer falling in that minute is never matched.

use crate::api::TimingsSource;
use crate::config::NotifyConfig;
use crate::db::{Settings, SettingsStorage};
use crate::error::AdhanError;
use crate::service::notifier::Notifier;
use crate::types::{PrayerSet, PushMessage, Timings};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Wall-clock source, as a 24-hour "HH:MM" string.
pub trait Clock: Send + Sync {
    fn now_hhmm(&self) -> String;
}

/// The server's local time.
pub struct LocalClock;

impl Clock for LocalClock {
    fn now_hhmm(&self) -> String {
        chrono::Local::now().format("%H:%M").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoSettings,
    /// The settings row could not be read at all (locked, closed, I/O).
    StorageUnavailable,
    NoLocation,
    NoPrayersSelected,
    NoSubscription,
    CorruptSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Prayers whose time matched this cycle, in scan order.
    pub matched: Vec<String>,
    pub delivered: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Skipped(SkipReason),
    FetchFailed,
    Checked(CycleReport),
}

/// Entries of `timings` that are selected and due at `now` ("HH:MM").
pub fn matching_prayers<'a>(
    timings: &'a Timings,
    selected: &PrayerSet,
    now: &str,
) -> Vec<(&'a str, &'a str)> {
    timings
        .iter()
        .filter(|(prayer, time)| selected.contains(prayer) && *time == now)
        .collect()
}

/// What a cycle needs from the settings row once it is known to be usable.
struct ArmedSettings {
    settings: Settings,
    subscription: Value,
}

pub struct NotificationLoop {
    storage: SettingsStorage,
    timings: Arc<dyn TimingsSource>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    title: String,
    cooldown: Duration,
}

impl NotificationLoop {
    pub fn new(
        storage: SettingsStorage,
        timings: Arc<dyn TimingsSource>,
        notifier: Arc<dyn Notifier>,
        config: &NotifyConfig,
    ) -> Self {
        Self {
            storage,
            timings,
            notifier,
            clock: Arc::new(LocalClock),
            title: config.title.clone(),
            cooldown: config.cooldown(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Run one cycle. Never fails: every error is logged and reflected in
    /// the returned outcome.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let armed = match self.load_armed().await {
            Ok(armed) => armed,
            Err(reason) => {
                debug!(?reason, "notification cycle skipped");
                return CycleOutcome::Skipped(reason);
            }
        };
        let settings = &armed.settings;

        let Ok(timings) = self
            .timings
            .fetch(&settings.city, &settings.country, settings.method)
            .await
        else {
            return CycleOutcome::FetchFailed;
        };

        let now = self.clock.now_hhmm();
        let mut report = CycleReport::default();
        for (prayer, time) in matching_prayers(&timings, &settings.notified_prayers, &now) {
            report.matched.push(prayer.to_string());
            let message = PushMessage::prayer_due(self.title.as_str(), prayer, time);
            match self.notifier.send(&armed.subscription, &message).await {
                Ok(()) => {
                    report.delivered += 1;
                    info!(prayer, time, "prayer notification sent");
                }
                Err(e) => {
                    report.failed += 1;
                    warn!(prayer, time, error = %e, "prayer notification failed");
                }
            }
            if !self.cooldown.is_zero() {
                tokio::time::sleep(self.cooldown).await;
            }
        }
        CycleOutcome::Checked(report)
    }

    async fn load_armed(&self) -> Result<ArmedSettings, SkipReason> {
        let settings = match self.storage.load().await {
            Ok(Some(settings)) => settings,
            Ok(None) => return Err(SkipReason::NoSettings),
            Err(e @ AdhanError::CorruptSettings(_)) => {
                warn!(error = %e, "ignoring unreadable settings");
                return Err(SkipReason::CorruptSettings);
            }
            Err(e) => {
                warn!(error = %e, "failed to load settings");
                return Err(SkipReason::StorageUnavailable);
            }
        };
        if !settings.has_location() {
            return Err(SkipReason::NoLocation);
        }
        if settings.notified_prayers.is_empty() {
            return Err(SkipReason::NoPrayersSelected);
        }
        let Some(subscription) = settings.push_subscription.clone() else {
            return Err(SkipReason::NoSubscription);
        };
        Ok(ArmedSettings {
            settings,
            subscription,
        })
    }
}
