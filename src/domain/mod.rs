//! Domain entities independent from any persistence representation.

pub mod account;
pub mod chain;
pub mod geo;
pub mod group;
pub mod location;
pub mod matchup;
pub mod types;
pub mod user;
