//! SQL schema for the Herald SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision for future migrations.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Dates are stored as `YYYY-MM-DD` text so that string comparison matches
/// calendar order.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS announcements (
    id              TEXT PRIMARY KEY,
    message         TEXT NOT NULL,
    start_date      TEXT,            -- YYYY-MM-DD or NULL
    expiration_date TEXT NOT NULL,   -- YYYY-MM-DD
    created_at      TEXT NOT NULL,   -- RFC 3339 UTC
    created_by      TEXT NOT NULL,
    updated_at      TEXT,            -- RFC 3339 UTC or NULL
    updated_by      TEXT
);

CREATE INDEX IF NOT EXISTS announcements_expiration_idx
    ON announcements(expiration_date);

PRAGMA user_version = 1;
";
