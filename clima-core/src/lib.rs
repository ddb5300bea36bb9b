//! Core library for the `clima` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather and geocoding API clients
//! - The location-provider abstraction
//! - View state and the session that orchestrates a query
//!
//! It is used by `clima-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod geocode;
pub mod location;
pub mod model;
pub mod normalize;
pub mod session;
pub mod state;
pub mod weather;

pub use config::{Config, GeocodeConfig, PinnedLocation, WeatherApiConfig};
pub use error::{LocationError, WeatherError};
pub use geocode::GeocodeClient;
pub use location::{ConfiguredLocation, LocationProvider};
pub use model::{GeoCity, Position, WeatherReport};
pub use normalize::strip_diacritics;
pub use session::Session;
pub use state::{QueryToken, ViewState};
pub use weather::WeatherClient;
