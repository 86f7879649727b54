//! SQL DDL for the settings store.

/// SQLite schema:
/// - `id` is pinned to 1, so the table can hold at most one row
/// - `method` holds a calculation method code (1..=5)
/// - `notified_prayers` is a JSON array of lowercase names, serialized as text
/// - `push_subscription` is the browser's subscription JSON, NULL until registered
/// - `updated_at` is RFC3339
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS settings (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    city TEXT NOT NULL,
    country TEXT NOT NULL,
    method INTEGER NOT NULL,
    notified_prayers TEXT NOT NULL DEFAULT '[]',
    push_subscription TEXT NULL,
    updated_at TEXT NOT NULL
);
"#;

/// Primary key of the only settings row.
pub const SETTINGS_ROW_ID: i64 = 1;
