//! Core operations exposed to callers.
//!
//! Each function takes primitive, caller-validated values, converts them into
//! domain types, talks to the store through repository traits and returns a
//! typed result or a classified [`ServiceError`]. Identities are explicit
//! arguments; nothing is read from ambient session state.

pub mod accounts;
pub mod errors;
pub mod groups;
pub mod locations;
pub mod matchups;
pub mod reconcile;
pub mod users;

pub use errors::{ServiceError, ServiceResult};
