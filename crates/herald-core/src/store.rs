//! The `AnnouncementStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `herald-store-sqlite`,
//! or [`MemoryStore`](crate::memory::MemoryStore) for tests). The service and
//! HTTP layers depend on this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::NaiveDate;

use crate::announcement::{Announcement, AnnouncementId, AnnouncementPatch, NewAnnouncement};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`AnnouncementStore::list`]. The default query returns every
/// record in the store's natural order.
#[derive(Debug, Clone, Default)]
pub struct AnnouncementQuery {
  /// Only return announcements active on this date
  /// (`start_date <= date < expiration_date`, missing start matches).
  pub active_on:               Option<NaiveDate>,
  /// Order by `expiration_date`, latest first.
  pub latest_expiration_first: bool,
}

impl AnnouncementQuery {
  pub fn active_on(date: NaiveDate) -> Self {
    Self { active_on: Some(date), ..Self::default() }
  }

  pub fn latest_expiration_first() -> Self {
    Self { latest_expiration_first: true, ..Self::default() }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an announcement collection.
///
/// Every method is a single, atomic store operation. All methods return `Send`
/// futures so the trait can be used from axum handlers.
pub trait AnnouncementStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new announcement, assigning its id.
  fn insert(
    &self,
    input: NewAnnouncement,
  ) -> impl Future<Output = Result<Announcement, Self::Error>> + Send + '_;

  /// Retrieve an announcement by id. Returns `None` if not found.
  fn get(
    &self,
    id: AnnouncementId,
  ) -> impl Future<Output = Result<Option<Announcement>, Self::Error>> + Send + '_;

  fn list<'a>(
    &'a self,
    query: &'a AnnouncementQuery,
  ) -> impl Future<Output = Result<Vec<Announcement>, Self::Error>> + Send + 'a;

  /// Apply `patch` to the record with `id`. Returns `false` if nothing matched.
  fn update(
    &self,
    id: AnnouncementId,
    patch: AnnouncementPatch,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Hard-delete the record with `id`. Returns `false` if nothing matched.
  fn delete(
    &self,
    id: AnnouncementId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
