//! [`MemoryStore`] — an in-process [`AnnouncementStore`] for tests and demos.

use std::{
  convert::Infallible,
  sync::{Mutex, MutexGuard, PoisonError},
};

use crate::{
  announcement::{Announcement, AnnouncementId, AnnouncementPatch, NewAnnouncement},
  store::{AnnouncementQuery, AnnouncementStore},
};

/// Keeps announcements in insertion order behind a mutex.
#[derive(Debug, Default)]
pub struct MemoryStore {
  records: Mutex<Vec<Announcement>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  pub fn len(&self) -> usize { self.records().len() }

  pub fn is_empty(&self) -> bool { self.records().is_empty() }

  fn records(&self) -> MutexGuard<'_, Vec<Announcement>> {
    self.records.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl AnnouncementStore for MemoryStore {
  type Error = Infallible;

  async fn insert(&self, input: NewAnnouncement) -> Result<Announcement, Infallible> {
    let announcement = input.into_announcement(AnnouncementId::generate());
    self.records().push(announcement.clone());
    Ok(announcement)
  }

  async fn get(&self, id: AnnouncementId) -> Result<Option<Announcement>, Infallible> {
    Ok(self.records().iter().find(|a| a.id == id).cloned())
  }

  async fn list(&self, query: &AnnouncementQuery) -> Result<Vec<Announcement>, Infallible> {
    let mut matches: Vec<Announcement> = self
      .records()
      .iter()
      .filter(|a| query.active_on.is_none_or(|date| a.is_active_on(date)))
      .cloned()
      .collect();

    if query.latest_expiration_first {
      matches.sort_by(|a, b| b.expiration_date.cmp(&a.expiration_date));
    }

    Ok(matches)
  }

  async fn update(
    &self,
    id: AnnouncementId,
    patch: AnnouncementPatch,
  ) -> Result<bool, Infallible> {
    let mut records = self.records();
    match records.iter_mut().find(|a| a.id == id) {
      Some(existing) => {
        existing.apply(patch);
        Ok(true)
      }
      None => Ok(false),
    }
  }

  async fn delete(&self, id: AnnouncementId) -> Result<bool, Infallible> {
    let mut records = self.records();
    let before = records.len();
    records.retain(|a| a.id != id);
    Ok(records.len() != before)
  }
}
