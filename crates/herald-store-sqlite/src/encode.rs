//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, calendar dates `YYYY-MM-DD`, ids
//! hyphenated lowercase UUIDs.

use chrono::{DateTime, NaiveDate, Utc};
use herald_core::{
  announcement::{Announcement, AnnouncementId},
  validate::DATE_FORMAT,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── AnnouncementId ──────────────────────────────────────────────────────────

pub fn encode_id(id: AnnouncementId) -> String { id.as_uuid().hyphenated().to_string() }

pub fn decode_id(s: &str) -> Result<AnnouncementId> {
  Ok(AnnouncementId::from_uuid(Uuid::parse_str(s)?))
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawAnnouncement::from_row`].
pub const COLUMNS: &str =
  "id, message, start_date, expiration_date, created_at, created_by, updated_at, updated_by";

/// Raw strings read directly from an `announcements` row.
pub struct RawAnnouncement {
  pub id:              String,
  pub message:         String,
  pub start_date:      Option<String>,
  pub expiration_date: String,
  pub created_at:      String,
  pub created_by:      String,
  pub updated_at:      Option<String>,
  pub updated_by:      Option<String>,
}

impl RawAnnouncement {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      message:         row.get(1)?,
      start_date:      row.get(2)?,
      expiration_date: row.get(3)?,
      created_at:      row.get(4)?,
      created_by:      row.get(5)?,
      updated_at:      row.get(6)?,
      updated_by:      row.get(7)?,
    })
  }

  pub fn into_announcement(self) -> Result<Announcement> {
    Ok(Announcement {
      id:              decode_id(&self.id)?,
      message:         self.message,
      start_date:      self.start_date.as_deref().map(decode_date).transpose()?,
      expiration_date: decode_date(&self.expiration_date)?,
      created_at:      decode_dt(&self.created_at)?,
      created_by:      self.created_by,
      updated_at:      self.updated_at.as_deref().map(decode_dt).transpose()?,
      updated_by:      self.updated_by,
    })
  }
}
