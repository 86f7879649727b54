use crate::error::AdhanError;
use crate::types::{CalculationMethod, PrayerSet};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;

/// Raw `settings` row, before the JSON columns are validated.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbSettings {
    pub id: i64,
    pub city: String,
    pub country: String,
    pub method: i64,
    pub notified_prayers: String,
    pub push_subscription: Option<String>,
    pub updated_at: String,
}

/// The user's configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub city: String,
    pub country: String,
    pub method: CalculationMethod,
    pub notified_prayers: PrayerSet,
    #[serde(skip_serializing)]
    pub push_subscription: Option<Value>,
    pub updated_at: DateTime<Utc>,
}

impl Settings {
    pub fn has_location(&self) -> bool {
        !self.city.trim().is_empty()
    }
}

impl TryFrom<DbSettings> for Settings {
    type Error = AdhanError;

    fn try_from(row: DbSettings) -> Result<Self, Self::Error> {
        let method = CalculationMethod::try_from(row.method).map_err(AdhanError::CorruptSettings)?;
        let notified_prayers: PrayerSet = serde_json::from_str(&row.notified_prayers)
            .map_err(|e| AdhanError::CorruptSettings(format!("notified_prayers: {e}")))?;
        let push_subscription = row
            .push_subscription
            .as_deref()
            .map(serde_json::from_str::<Value>)
            .transpose()
            .map_err(|e| AdhanError::CorruptSettings(format!("push_subscription: {e}")))?;
        let updated_at = DateTime::parse_from_rfc3339(&row.updated_at)
            .map_err(|e| AdhanError::CorruptSettings(format!("updated_at: {e}")))?
            .with_timezone(&Utc);

        Ok(Settings {
            city: row.city,
            country: row.country,
            method,
            notified_prayers,
            push_subscription,
            updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> DbSettings {
        DbSettings {
            id: 1,
            city: "Sydney".to_string(),
            country: "Australia".to_string(),
            method: 1,
            notified_prayers: r#"["fajr","isha"]"#.to_string(),
            push_subscription: None,
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn decodes_valid_row() {
        let settings = Settings::try_from(row()).unwrap();
        assert_eq!(settings.method, CalculationMethod::MuslimWorldLeague);
        assert!(settings.notified_prayers.contains("Fajr"));
        assert_eq!(settings.push_subscription, None);
    }

    #[test]
    fn malformed_json_fails_closed() {
        let mut bad = row();
        bad.notified_prayers = "fajr,isha".to_string();
        assert!(matches!(
            Settings::try_from(bad),
            Err(AdhanError::CorruptSettings(_))
        ));

        let mut bad = row();
        bad.push_subscription = Some("{not json".to_string());
        assert!(matches!(
            Settings::try_from(bad),
            Err(AdhanError::CorruptSettings(_))
        ));
    }

    #[test]
    fn unknown_method_code_is_corrupt() {
        let mut bad = row();
        bad.method = 9;
        assert!(matches!(
            Settings::try_from(bad),
            Err(AdhanError::CorruptSettings(_))
        ));
    }
}
