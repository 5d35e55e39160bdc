//! Core types, rules, and the announcement service for Herald.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! store is an injected [`store::AnnouncementStore`]; callers are checked by an
//! injected [`auth::CallerVerifier`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod announcement;
pub mod auth;
pub mod error;
pub mod memory;
pub mod service;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
pub use service::AnnouncementService;
