use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::config::GeocodeConfig;
use crate::model::{GeoCity, Position};

pub const DEFAULT_BASE_URL: &str = "https://geocodeapi.p.rapidapi.com";

const HEADER_API_KEY: &str = "X-RapidAPI-Key";
const HEADER_API_HOST: &str = "X-RapidAPI-Host";

/// Client for the RapidAPI nearest-cities geocoding service.
///
/// Credentials travel as two fixed request headers rather than query
/// parameters.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    credentials: GeocodeConfig,
    base_url: String,
    http: Client,
}

impl GeocodeClient {
    pub fn new(credentials: GeocodeConfig) -> Self {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(credentials: GeocodeConfig, base_url: impl Into<String>) -> Self {
        Self {
            credentials,
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    /// Cities nearest to the given position, closest first. A search radius
    /// of zero asks only for the city the position falls in.
    ///
    /// The caller treats any error here as a silent abort, so failures stay
    /// plain `anyhow` errors instead of a user-visible taxonomy.
    pub async fn nearest_cities(&self, position: Position) -> Result<Vec<GeoCity>> {
        let url = format!("{}/GetNearestCities", self.base_url);

        let res = self
            .http
            .get(&url)
            .headers(self.auth_headers()?)
            .query(&[
                ("latitude", position.latitude.to_string()),
                ("longitude", position.longitude.to_string()),
                ("range", "0".to_string()),
            ])
            .send()
            .await
            .context("Failed to send nearest-cities request")?;

        let status = res.status();
        if !status.is_success() {
            return Err(anyhow!("Nearest-cities request failed with status {status}"));
        }

        let cities: Vec<GeoCity> =
            res.json().await.context("Failed to parse nearest-cities response")?;

        Ok(cities)
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HEADER_API_KEY,
            HeaderValue::from_str(&self.credentials.api_key)
                .context("Geocoding API key contains invalid header characters")?,
        );
        headers.insert(
            HEADER_API_HOST,
            HeaderValue::from_str(&self.credentials.api_host)
                .context("Geocoding API host contains invalid header characters")?,
        );
        Ok(headers)
    }
}
