use crate::db::models::{DbSettings, Settings};
use crate::db::schema::{SETTINGS_ROW_ID, SQLITE_INIT};
use crate::error::AdhanError;
use crate::types::{CalculationMethod, PrayerSet};
use chrono::Utc;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

const SELECT_SETTINGS: &str = r#"SELECT id, city, country, method, notified_prayers,
       push_subscription, updated_at
       FROM settings WHERE id = ?"#;

/// Handle to the settings row. Cheap to clone; every clone shares the pool.
#[derive(Clone)]
pub struct SettingsStorage {
    pool: SqlitePool,
}

impl SettingsStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url` and apply
    /// the schema.
    pub async fn connect(database_url: &str) -> Result<Self, AdhanError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let mut pool_opts = SqlitePoolOptions::new();
        if database_url.contains(":memory:") {
            // each in-memory connection is a separate database
            pool_opts = pool_opts
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = pool_opts.connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), AdhanError> {
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Read the settings row. `Ok(None)` until a location has been set;
    /// `Err(CorruptSettings)` if a stored column does not decode.
    pub async fn load(&self) -> Result<Option<Settings>, AdhanError> {
        let row: Option<DbSettings> = sqlx::query_as(SELECT_SETTINGS)
            .bind(SETTINGS_ROW_ID)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Settings::try_from).transpose()
    }

    /// Create or overwrite the location. The notification selection is
    /// reset; an existing push subscription is kept.
    pub async fn set_location(
        &self,
        city: &str,
        country: &str,
        method: CalculationMethod,
    ) -> Result<Settings, AdhanError> {
        let empty = serde_json::to_string(&PrayerSet::default())?;
        sqlx::query(
            r#"
            INSERT INTO settings (
                id, city, country, method, notified_prayers, push_subscription, updated_at
            ) VALUES (?, ?, ?, ?, ?, NULL, ?)
            ON CONFLICT(id) DO UPDATE SET
                city=excluded.city,
                country=excluded.country,
                method=excluded.method,
                notified_prayers=excluded.notified_prayers,
                updated_at=excluded.updated_at
            "#,
        )
        .bind(SETTINGS_ROW_ID)
        .bind(city)
        .bind(country)
        .bind(method.code())
        .bind(empty)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        self.load().await?.ok_or(AdhanError::LocationNotSet)
    }

    /// Replace the set of prayers to notify for.
    pub async fn set_notified_prayers(&self, prayers: &PrayerSet) -> Result<(), AdhanError> {
        let json = serde_json::to_string(prayers)?;
        let result = sqlx::query(
            "UPDATE settings SET notified_prayers = ?, updated_at = ? WHERE id = ?",
        )
        .bind(json)
        .bind(Utc::now().to_rfc3339())
        .bind(SETTINGS_ROW_ID)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AdhanError::LocationNotSet);
        }
        Ok(())
    }

    /// Replace the stored push subscription with the payload as received.
    pub async fn set_push_subscription(&self, subscription: &Value) -> Result<(), AdhanError> {
        let json = serde_json::to_string(subscription)?;
        let result = sqlx::query(
            "UPDATE settings SET push_subscription = ?, updated_at = ? WHERE id = ?",
        )
        .bind(json)
        .bind(Utc::now().to_rfc3339())
        .bind(SETTINGS_ROW_ID)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AdhanError::LocationNotSet);
        }
        Ok(())
    }
}
