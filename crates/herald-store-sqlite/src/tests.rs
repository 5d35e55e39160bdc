//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{NaiveDate, TimeZone, Utc};
use herald_core::{
  announcement::{AnnouncementId, AnnouncementPatch, NewAnnouncement},
  store::{AnnouncementQuery, AnnouncementStore},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

fn new_announcement(message: &str, start: Option<&str>, expiration: &str) -> NewAnnouncement {
  NewAnnouncement {
    message:         message.into(),
    start_date:      start.map(date),
    expiration_date: date(expiration),
    created_at:      Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap(),
    created_by:      "alice".into(),
  }
}

fn patch() -> AnnouncementPatch {
  AnnouncementPatch {
    message:         None,
    start_date:      None,
    expiration_date: None,
    updated_at:      Utc.with_ymd_and_hms(2025, 6, 2, 17, 0, 0).unwrap(),
    updated_by:      "bob".into(),
  }
}

// ─── Insert / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get() {
  let s = store().await;

  let created = s
    .insert(new_announcement("Library closed", Some("2025-06-01"), "2025-06-08"))
    .await
    .unwrap();

  let fetched = s.get(created.id).await.unwrap().expect("stored record");
  assert_eq!(fetched, created);
  assert_eq!(fetched.start_date, Some(date("2025-06-01")));
  assert_eq!(fetched.created_by, "alice");
  assert!(fetched.updated_at.is_none());
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(AnnouncementId::generate()).await.unwrap().is_none());
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_active_on_applies_window() {
  let s = store().await;
  let today = date("2025-06-15");

  let open = s.insert(new_announcement("open", None, "2025-06-16")).await.unwrap();
  let starts_today = s
    .insert(new_announcement("starts", Some("2025-06-15"), "2025-07-01"))
    .await
    .unwrap();
  s.insert(new_announcement("expires", None, "2025-06-15")).await.unwrap();
  s.insert(new_announcement("future", Some("2025-06-16"), "2025-07-01")).await.unwrap();

  let active = s.list(&AnnouncementQuery::active_on(today)).await.unwrap();
  let ids: Vec<_> = active.iter().map(|a| a.id).collect();
  assert_eq!(ids.len(), 2);
  assert!(ids.contains(&open.id));
  assert!(ids.contains(&starts_today.id));
}

#[tokio::test]
async fn list_sorted_by_expiration() {
  let s = store().await;
  s.insert(new_announcement("b", None, "2025-03-01")).await.unwrap();
  s.insert(new_announcement("c", None, "2025-12-01")).await.unwrap();
  s.insert(new_announcement("a", None, "2025-01-01")).await.unwrap();

  let desc = s.list(&AnnouncementQuery::latest_expiration_first()).await.unwrap();
  let messages: Vec<_> = desc.iter().map(|a| a.message.as_str()).collect();
  assert_eq!(messages, ["c", "b", "a"]);
}

#[tokio::test]
async fn list_default_query_returns_everything() {
  let s = store().await;
  s.insert(new_announcement("a", None, "2000-01-01")).await.unwrap();
  s.insert(new_announcement("b", Some("2999-01-01"), "2999-02-01")).await.unwrap();

  assert_eq!(s.list(&AnnouncementQuery::default()).await.unwrap().len(), 2);
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_applies_only_supplied_fields() {
  let s = store().await;
  let created = s
    .insert(new_announcement("old", Some("2025-06-01"), "2025-06-08"))
    .await
    .unwrap();

  let matched = s
    .update(created.id, AnnouncementPatch { message: Some("new".into()), ..patch() })
    .await
    .unwrap();
  assert!(matched);

  let fetched = s.get(created.id).await.unwrap().unwrap();
  assert_eq!(fetched.message, "new");
  assert_eq!(fetched.start_date, created.start_date);
  assert_eq!(fetched.expiration_date, created.expiration_date);
  assert_eq!(fetched.created_at, created.created_at);
  assert_eq!(fetched.updated_by.as_deref(), Some("bob"));
  assert_eq!(fetched.updated_at, Some(patch().updated_at));
}

#[tokio::test]
async fn update_can_set_and_clear_start_date() {
  let s = store().await;
  let created = s.insert(new_announcement("x", None, "2025-06-08")).await.unwrap();

  s.update(created.id, AnnouncementPatch { start_date: Some(Some(date("2025-06-02"))), ..patch() })
    .await
    .unwrap();
  let set = s.get(created.id).await.unwrap().unwrap();
  assert_eq!(set.start_date, Some(date("2025-06-02")));

  s.update(created.id, AnnouncementPatch { start_date: Some(None), ..patch() })
    .await
    .unwrap();
  let cleared = s.get(created.id).await.unwrap().unwrap();
  assert_eq!(cleared.start_date, None);
}

#[tokio::test]
async fn update_missing_returns_false() {
  let s = store().await;
  assert!(!s.update(AnnouncementId::generate(), patch()).await.unwrap());
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_is_hard_and_reports_matches() {
  let s = store().await;
  let created = s.insert(new_announcement("x", None, "2025-06-08")).await.unwrap();

  assert!(s.delete(created.id).await.unwrap());
  assert!(!s.delete(created.id).await.unwrap());
  assert!(s.get(created.id).await.unwrap().is_none());
  assert!(s.list(&AnnouncementQuery::default()).await.unwrap().is_empty());
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_a_file_keeps_records() {
  let path = std::env::temp_dir().join(format!("herald-{}.db", AnnouncementId::generate()));

  let id = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.insert(new_announcement("durable", None, "2025-06-08")).await.unwrap().id
  };

  let reopened = SqliteStore::open(&path).await.unwrap();
  let fetched = reopened.get(id).await.unwrap().unwrap();
  assert_eq!(fetched.message, "durable");

  drop(reopened);
  let _ = std::fs::remove_file(&path);
}
