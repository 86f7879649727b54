//! Database module: the single-row settings store.
//!
//! Layout:
//! - `models.rs`: row struct and the validated `Settings` it decodes into
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: `SettingsStorage`, the read/upsert contract

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{DbSettings, Settings};
pub use schema::SQLITE_INIT;
pub use sqlite::{SettingsStorage, SqlitePool};
