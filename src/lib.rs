//! Casting agency API: Actors / Movies CRUD behind permission-scoped JWT authorization.
//!
//! Exposes the building blocks (config, state, store, verifier, router) so the
//! binary and the integration tests assemble the same application.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
