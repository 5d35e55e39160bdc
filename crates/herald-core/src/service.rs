//! [`AnnouncementService`] — validation and persistence for announcements.
//!
//! Every caller-facing operation runs in the same order: verify the caller,
//! validate the input, then touch the store. Nothing is written unless all
//! validation has passed.

use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use tracing::{error, info, warn};

use crate::{
  Error, Result,
  announcement::{
    Announcement, AnnouncementChanges, AnnouncementDraft, AnnouncementId, AnnouncementPatch,
    NewAnnouncement,
  },
  auth::{AuthContext, CallerVerifier, NonEmptyCaller},
  store::{AnnouncementQuery, AnnouncementStore},
  validate,
};

/// The announcement operations, over an injected store and caller verifier.
#[derive(Debug)]
pub struct AnnouncementService<S, V = NonEmptyCaller> {
  store:    Arc<S>,
  verifier: V,
}

impl<S, V: Clone> Clone for AnnouncementService<S, V> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), verifier: self.verifier.clone() }
  }
}

impl<S: AnnouncementStore> AnnouncementService<S> {
  /// A service that accepts any non-empty caller identifier.
  pub fn new(store: Arc<S>) -> Self { Self::with_verifier(store, NonEmptyCaller) }
}

impl<S, V> AnnouncementService<S, V>
where
  S: AnnouncementStore,
  V: CallerVerifier,
{
  pub fn with_verifier(store: Arc<S>, verifier: V) -> Self { Self { store, verifier } }

  #[cfg(test)]
  pub(crate) fn store(&self) -> &Arc<S> { &self.store }

  /// Run the configured verifier over `caller`.
  pub fn authenticate(&self, caller: Option<&str>) -> Result<AuthContext> {
    self.verifier.verify(caller).inspect_err(|_| warn!("rejected unauthenticated caller"))
  }

  // ── Public read path ──────────────────────────────────────────────────────

  /// Announcements active today, in the store's natural order.
  ///
  /// Never fails: a store error is logged and an empty list returned, so the
  /// public display keeps working through a store outage.
  pub async fn list_active(&self) -> Vec<Announcement> {
    self.list_active_on(Local::now().date_naive()).await
  }

  /// Announcements active on `date`. Same fail-open policy as
  /// [`list_active`](Self::list_active).
  pub async fn list_active_on(&self, date: NaiveDate) -> Vec<Announcement> {
    match self.store.list(&AnnouncementQuery::active_on(date)).await {
      Ok(announcements) => announcements,
      Err(e) => {
        error!(error = %e, %date, "failed to fetch active announcements");
        Vec::new()
      }
    }
  }

  // ── Management operations ─────────────────────────────────────────────────

  /// Every announcement, latest expiration first.
  pub async fn list_all(&self, caller: Option<&str>) -> Result<Vec<Announcement>> {
    self.authenticate(caller)?;
    self
      .store
      .list(&AnnouncementQuery::latest_expiration_first())
      .await
      .map_err(Error::internal)
  }

  pub async fn create(
    &self,
    caller: Option<&str>,
    draft: AnnouncementDraft,
  ) -> Result<Announcement> {
    let auth = self.authenticate(caller)?;

    validate::message(&draft.message)?;
    let expiration_date = draft
      .expiration_date
      .as_deref()
      .ok_or_else(|| Error::invalid("Expiration date is required"))
      .and_then(validate::date)?;
    let start_date = draft
      .start_date
      .as_deref()
      .map(validate::start_date)
      .transpose()?
      .flatten();
    validate::date_order(start_date, expiration_date)?;

    let created = self
      .store
      .insert(NewAnnouncement {
        message: draft.message,
        start_date,
        expiration_date,
        created_at: Utc::now(),
        created_by: auth.principal().to_owned(),
      })
      .await
      .map_err(Error::internal)?;

    info!(id = %created.id, by = auth.principal(), "announcement created");
    Ok(created)
  }

  /// Apply a partial update and return the record as stored afterwards.
  pub async fn update(
    &self,
    caller: Option<&str>,
    id: &str,
    changes: AnnouncementChanges,
  ) -> Result<Announcement> {
    let auth = self.authenticate(caller)?;
    let id: AnnouncementId = id.parse()?;

    if changes.is_empty() {
      return Err(Error::invalid("No fields to update"));
    }
    if let Some(message) = &changes.message {
      validate::message(message)?;
    }
    let start_date = changes.start_date.as_deref().map(validate::start_date).transpose()?;
    let expiration_date = changes.expiration_date.as_deref().map(validate::date).transpose()?;

    if changes.touches_dates() {
      let existing = self.fetch(id).await?;
      validate::date_order(
        start_date.unwrap_or(existing.start_date),
        expiration_date.unwrap_or(existing.expiration_date),
      )?;
    }

    let patch = AnnouncementPatch {
      message: changes.message,
      start_date,
      expiration_date,
      updated_at: Utc::now(),
      updated_by: auth.principal().to_owned(),
    };

    // The record may have been deleted since the fetch above.
    let matched = self.store.update(id, patch).await.map_err(Error::internal)?;
    if !matched {
      return Err(Error::announcement_not_found());
    }

    info!(%id, by = auth.principal(), "announcement updated");
    self.fetch(id).await
  }

  pub async fn delete(&self, caller: Option<&str>, id: &str) -> Result<()> {
    let auth = self.authenticate(caller)?;
    let id: AnnouncementId = id.parse()?;

    let deleted = self.store.delete(id).await.map_err(Error::internal)?;
    if !deleted {
      return Err(Error::announcement_not_found());
    }

    info!(%id, by = auth.principal(), "announcement deleted");
    Ok(())
  }

  async fn fetch(&self, id: AnnouncementId) -> Result<Announcement> {
    self
      .store
      .get(id)
      .await
      .map_err(Error::internal)?
      .ok_or_else(Error::announcement_not_found)
  }
}
