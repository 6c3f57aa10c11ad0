//! Patient record update relay.
//!
//! Accepts `PUT /edit/{id}` requests, validates the JSON payload, and forwards
//! a parameterized SQL update to the external query execution service. The
//! relay holds no state of its own; the outcome reported to the caller is
//! derived entirely from the query service's HTTP status.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;

pub use error::{Error, Result};
