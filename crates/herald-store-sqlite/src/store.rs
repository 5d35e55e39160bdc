//! [`SqliteStore`] — the SQLite implementation of [`AnnouncementStore`].

use std::path::Path;

use herald_core::{
  announcement::{Announcement, AnnouncementId, AnnouncementPatch, NewAnnouncement},
  store::{AnnouncementQuery, AnnouncementStore},
};
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{COLUMNS, RawAnnouncement, encode_date, encode_dt, encode_id},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An announcement store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("announcement schema ready");
    Ok(())
  }
}

/// Build the `SELECT` for `query`. The active-on date, when present, is bound
/// as `?1`.
fn list_sql(query: &AnnouncementQuery) -> String {
  let where_clause = if query.active_on.is_some() {
    "WHERE expiration_date > ?1 AND (start_date IS NULL OR start_date <= ?1)"
  } else {
    ""
  };
  let order_clause =
    if query.latest_expiration_first { "ORDER BY expiration_date DESC" } else { "" };
  format!("SELECT {COLUMNS} FROM announcements {where_clause} {order_clause}")
}

// ─── AnnouncementStore impl ──────────────────────────────────────────────────

impl AnnouncementStore for SqliteStore {
  type Error = crate::Error;

  async fn insert(&self, input: NewAnnouncement) -> Result<Announcement> {
    let announcement = input.into_announcement(AnnouncementId::generate());

    let id_str         = encode_id(announcement.id);
    let message        = announcement.message.clone();
    let start_str      = announcement.start_date.map(encode_date);
    let expiration_str = encode_date(announcement.expiration_date);
    let created_at_str = encode_dt(announcement.created_at);
    let created_by     = announcement.created_by.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO announcements (
             id, message, start_date, expiration_date, created_at, created_by
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            id_str,
            message,
            start_str,
            expiration_str,
            created_at_str,
            created_by,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(announcement)
  }

  async fn get(&self, id: AnnouncementId) -> Result<Option<Announcement>> {
    let id_str = encode_id(id);

    let raw: Option<RawAnnouncement> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {COLUMNS} FROM announcements WHERE id = ?1"),
            rusqlite::params![id_str],
            RawAnnouncement::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawAnnouncement::into_announcement).transpose()
  }

  async fn list(&self, query: &AnnouncementQuery) -> Result<Vec<Announcement>> {
    let sql      = list_sql(query);
    let date_str = query.active_on.map(encode_date);

    let raws: Vec<RawAnnouncement> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = match date_str {
          Some(d) => stmt
            .query_map(rusqlite::params![d], RawAnnouncement::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
          None => stmt
            .query_map([], RawAnnouncement::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAnnouncement::into_announcement).collect()
  }

  async fn update(&self, id: AnnouncementId, patch: AnnouncementPatch) -> Result<bool> {
    let id_str         = encode_id(id);
    let set_start      = patch.start_date.is_some();
    let start_str      = patch.start_date.flatten().map(encode_date);
    let expiration_str = patch.expiration_date.map(encode_date);
    let updated_at_str = encode_dt(patch.updated_at);
    let message        = patch.message;
    let updated_by     = patch.updated_by;

    // A single statement, so a concurrent delete either lands before it
    // (zero rows matched) or after it.
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE announcements SET
             message         = COALESCE(?2, message),
             start_date      = CASE WHEN ?3 THEN ?4 ELSE start_date END,
             expiration_date = COALESCE(?5, expiration_date),
             updated_at      = ?6,
             updated_by      = ?7
           WHERE id = ?1",
          rusqlite::params![
            id_str,
            message,
            set_start,
            start_str,
            expiration_str,
            updated_at_str,
            updated_by,
          ],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn delete(&self, id: AnnouncementId) -> Result<bool> {
    let id_str = encode_id(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM announcements WHERE id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }
}
