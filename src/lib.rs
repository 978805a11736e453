//! Solar panel savings estimator.
//!
//! A read-only lookup API over regional production and energy tariffs, plus a
//! pure monthly savings calculation (`services::estimator`).

pub mod api_docs;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod shared_state;
