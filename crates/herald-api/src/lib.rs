//! JSON REST API for Herald.
//!
//! Exposes an axum [`Router`] backed by an [`AnnouncementService`] over any
//! [`herald_core::store::AnnouncementStore`]. TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = herald_api::api_router(AnnouncementService::new(store));
//! ```

pub mod announcements;
pub mod error;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use herald_core::{AnnouncementService, auth::CallerVerifier, store::AnnouncementStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be merged or nested into any parent router
/// regardless of its own state type.
pub fn api_router<S, V>(service: AnnouncementService<S, V>) -> Router<()>
where
  S: AnnouncementStore + 'static,
  V: CallerVerifier + 'static,
{
  Router::new()
    .route("/announcements/active", get(announcements::list_active::<S, V>))
    .route("/announcements/all", get(announcements::list_all::<S, V>))
    .route("/announcements", post(announcements::create::<S, V>))
    .route("/announcements/", post(announcements::create::<S, V>))
    .route(
      "/announcements/{id}",
      put(announcements::update::<S, V>).delete(announcements::delete::<S, V>),
    )
    .with_state(Arc::new(service))
}
