//! Core library exports for the tasteranker store.
//!
//! This crate exposes the domain types, Diesel models and schema, repositories,
//! forms and service layers behind geospatial restaurant matching, pairwise
//! matchup persistence, group membership and place-data reconciliation.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "data")]
pub mod services;
