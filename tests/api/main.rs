//! HTTP tests against the real route configuration.
//!
//! Endpoints that need the store run over SeaORM's mock connection; no
//! PostgreSQL instance is needed.
//!
//! Run with: cargo test --test api

mod test_helpers;

mod test_auth_gating;
mod test_calculators;
mod test_checklists;
mod test_health;
mod test_login;
mod test_logistics;
