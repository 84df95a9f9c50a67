//! Portaria front-desk console
//!
//! Client side of the asset loan service: a typed HTTP client for the
//! service's JSON API and one state controller per console screen (badge
//! desk, item and user catalogs, loan history, dashboard, bulk reset).
//! Every business rule lives in the service; this crate keeps local copies
//! of what the service returns and reconciles them after each action.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod notice;
pub mod render;
pub mod screens;

pub use client::{ApiClient, PortariaApi};
pub use config::AppConfig;
pub use error::{ConsoleError, ConsoleResult};
