//! Field service server library.
//!
//! Assignment workflow, calendar, startup checklists, service reports, the
//! technical library and field calculators, exposed over an actix-web API
//! backed by PostgreSQL through SeaORM.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
