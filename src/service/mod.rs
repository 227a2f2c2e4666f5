//! Business logic services.
//!
//! Services sit between the controllers and the repositories: they enforce
//! uniqueness and choice validation, resolve related records by name, apply
//! ownership rules, and assemble response DTOs with version-aware
//! hyperlinks.

pub mod auth;
pub mod category;
pub mod competition;
pub mod drone;
pub mod pilot;
