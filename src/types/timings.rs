use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Prayers shown on the daily view, in display order.
pub const DISPLAY_PRAYERS: [&str; 6] = ["Fajr", "Dhuhr", "Asr", "Sunset", "Maghrib", "Isha"];

/// Prayers a user may opt into notifications for.
pub const SELECTABLE_PRAYERS: [&str; 5] = ["Fajr", "Dhuhr", "Asr", "Maghrib", "Isha"];

/// One day's timings as returned by the provider: prayer name -> "HH:MM".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timings(BTreeMap<String, String>);

impl Timings {
    pub fn get(&self, prayer: &str) -> Option<&str> {
        self.0.get(prayer).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 12-hour display entries for [`DISPLAY_PRAYERS`], skipping any the
    /// provider omitted or sent in an unexpected shape.
    pub fn display_entries(&self) -> Vec<DisplayTime> {
        DISPLAY_PRAYERS
            .iter()
            .filter_map(|prayer| {
                format_to_12h(self.get(prayer)).map(|time| DisplayTime {
                    prayer: (*prayer).to_string(),
                    time,
                })
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Timings {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayTime {
    pub prayer: String,
    pub time: String,
}

/// Case-insensitive set of prayer names, stored lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct PrayerSet(BTreeSet<String>);

impl PrayerSet {
    pub fn contains(&self, prayer: &str) -> bool {
        self.0.contains(&prayer.trim().to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<S: AsRef<str>> FromIterator<S> for PrayerSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

impl From<Vec<String>> for PrayerSet {
    fn from(value: Vec<String>) -> Self {
        value.into_iter().collect()
    }
}

impl From<PrayerSet> for Vec<String> {
    fn from(value: PrayerSet) -> Self {
        value.0.into_iter().collect()
    }
}

/// Render a 24-hour "HH:MM" string as "hh:mm AM/PM".
///
/// Absent input stays absent; so does input that is not a valid "HH:MM".
pub fn format_to_12h(time: Option<&str>) -> Option<String> {
    let parsed = NaiveTime::parse_from_str(time?.trim(), "%H:%M").ok()?;
    Some(parsed.format("%I:%M %p").to_string())
}
