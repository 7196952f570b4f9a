//! Core library for the `weather-dashboard` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider abstraction and its WeatherAPI.com client
//! - The `WeatherRecord` domain model
//! - Rendering of the four-panel dashboard image
//!
//! It is used by `dashboard-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod provider;

pub use config::{Config, DashboardConfig, ProviderConfig};
pub use dashboard::render;
pub use error::{DashboardError, FetchError, RenderError};
pub use model::WeatherRecord;
pub use pipeline::generate_dashboard;
pub use provider::{WeatherProvider, provider_from_config, weatherapi::WeatherApiProvider};
