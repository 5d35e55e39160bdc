//! Announcement types — the single record kind Herald manages.
//!
//! [`Announcement`] is the stored shape. [`NewAnnouncement`] and
//! [`AnnouncementPatch`] are the validated write models handed to a store;
//! [`AnnouncementDraft`] and [`AnnouncementChanges`] are the raw, unvalidated
//! inputs accepted from callers.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

// ─── Identity ────────────────────────────────────────────────────────────────

/// Opaque, store-assigned identifier. Serialised as a hyphenated string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnouncementId(Uuid);

impl AnnouncementId {
  /// Mint a fresh random identifier.
  pub fn generate() -> Self { Self(Uuid::new_v4()) }

  pub fn from_uuid(id: Uuid) -> Self { Self(id) }

  pub fn as_uuid(&self) -> Uuid { self.0 }
}

impl fmt::Display for AnnouncementId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.0.hyphenated(), f)
  }
}

impl FromStr for AnnouncementId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::parse_str(s.trim())
      .map(Self)
      .map_err(|_| Error::invalid("Invalid announcement ID"))
  }
}

// ─── Stored record ───────────────────────────────────────────────────────────

/// A persisted announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
  pub id:              AnnouncementId,
  pub message:         String,
  /// Absent means "active since the beginning of time".
  pub start_date:      Option<NaiveDate>,
  /// Exclusive upper bound of the active window.
  pub expiration_date: NaiveDate,
  pub created_at:      DateTime<Utc>,
  pub created_by:      String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub updated_at:      Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub updated_by:      Option<String>,
}

impl Announcement {
  /// Whether `date` falls inside `[start_date, expiration_date)`.
  pub fn is_active_on(&self, date: NaiveDate) -> bool {
    self.expiration_date > date && self.start_date.is_none_or(|start| start <= date)
  }

  /// Overwrite the fields carried by `patch`, leaving the rest untouched.
  pub fn apply(&mut self, patch: AnnouncementPatch) {
    if let Some(message) = patch.message {
      self.message = message;
    }
    if let Some(start_date) = patch.start_date {
      self.start_date = start_date;
    }
    if let Some(expiration_date) = patch.expiration_date {
      self.expiration_date = expiration_date;
    }
    self.updated_at = Some(patch.updated_at);
    self.updated_by = Some(patch.updated_by);
  }
}

// ─── Write models ────────────────────────────────────────────────────────────

/// A validated announcement ready to be inserted. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
  pub message:         String,
  pub start_date:      Option<NaiveDate>,
  pub expiration_date: NaiveDate,
  pub created_at:      DateTime<Utc>,
  pub created_by:      String,
}

impl NewAnnouncement {
  pub fn into_announcement(self, id: AnnouncementId) -> Announcement {
    Announcement {
      id,
      message: self.message,
      start_date: self.start_date,
      expiration_date: self.expiration_date,
      created_at: self.created_at,
      created_by: self.created_by,
      updated_at: None,
      updated_by: None,
    }
  }
}

/// A validated partial update. `None` fields are left as they are.
#[derive(Debug, Clone)]
pub struct AnnouncementPatch {
  pub message:         Option<String>,
  /// `Some(None)` clears the start date.
  pub start_date:      Option<Option<NaiveDate>>,
  pub expiration_date: Option<NaiveDate>,
  pub updated_at:      DateTime<Utc>,
  pub updated_by:      String,
}

// ─── Caller input ────────────────────────────────────────────────────────────

/// Raw input for creating an announcement. Dates are `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnouncementDraft {
  #[serde(default)]
  pub message:         String,
  pub start_date:      Option<String>,
  pub expiration_date: Option<String>,
}

/// Raw input for a partial update. Omitted (or `null`) fields are unchanged;
/// an empty `start_date` string clears the start date.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnouncementChanges {
  pub message:         Option<String>,
  pub start_date:      Option<String>,
  pub expiration_date: Option<String>,
}

impl AnnouncementChanges {
  pub fn is_empty(&self) -> bool {
    self.message.is_none() && self.start_date.is_none() && self.expiration_date.is_none()
  }

  /// Whether the update touches either end of the active window.
  pub fn touches_dates(&self) -> bool {
    self.start_date.is_some() || self.expiration_date.is_some()
  }
}
