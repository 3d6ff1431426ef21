//! HTTP client for the food-truck schedule service.
//!
//! Provides the registrant lookup, the meal-avail mutation and the
//! profile lookup over [`reqwest`], plus the environment-driven client
//! configuration. Every response is classified into the typed outcomes of
//! `mealcheck_core` at this boundary.

pub mod api;
pub mod config;

pub use api::{ApiError, ScheduleApi};
pub use config::ClientConfig;
