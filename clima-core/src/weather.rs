use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::WeatherError;
use crate::model::WeatherReport;
use crate::normalize::strip_diacritics;

pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com";

/// Client for the current-conditions endpoint of WeatherAPI.com.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the client at a different host. Tests use this to talk to a
    /// local mock server.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    /// Fetch current conditions for a city.
    ///
    /// Empty (or whitespace-only) input fails with `EmptyInput` before any
    /// request is made. The city name is stripped of diacritics before it
    /// goes on the wire. No retry: a failed call is classified and returned.
    pub async fn fetch(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        if city.trim().is_empty() {
            return Err(WeatherError::EmptyInput);
        }

        let query = strip_diacritics(city);
        let url = format!("{}/v1/forecast.json", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query.as_str()),
                ("days", "1"),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if status == StatusCode::FORBIDDEN {
            return Err(WeatherError::AccessDenied);
        }
        if !status.is_success() {
            return Err(WeatherError::Upstream { status, body: truncate_body(&body) });
        }

        let parsed: ForecastResponse = serde_json::from_str(&body)?;

        Ok(WeatherReport {
            location_name: parsed.location.name,
            temperature_c: parsed.current.temp_c,
            condition_text: parsed.current.condition.text,
            condition_icon_url: absolute_icon_url(&parsed.current.condition.icon),
        })
    }
}

/// The API returns icon paths without a scheme ("//cdn.../icon.png").
fn absolute_icon_url(icon: &str) -> String {
    if icon.starts_with("//") {
        format!("https:{icon}")
    } else {
        icon.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct ForecastLocation {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ForecastCondition {
    icon: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct ForecastCurrent {
    temp_c: f64,
    condition: ForecastCondition,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    location: ForecastLocation,
    current: ForecastCurrent,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Back off to a char boundary; a multibyte character may straddle MAX.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &body[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_relative_icon_gets_https_prefix() {
        assert_eq!(absolute_icon_url("//cdn/icon.png"), "https://cdn/icon.png");
    }

    #[test]
    fn absolute_icon_is_left_alone() {
        assert_eq!(
            absolute_icon_url("https://cdn/icon.png"),
            "https://cdn/icon.png"
        );
    }

    #[test]
    fn forecast_response_parses_fixed_shape() {
        let body = r#"{
            "location": { "name": "Curitiba", "country": "Brazil" },
            "current": {
                "temp_c": 18.5,
                "condition": { "icon": "//cdn/icon.png", "text": "Partly cloudy", "code": 1003 }
            }
        }"#;

        let parsed: ForecastResponse = serde_json::from_str(body).expect("valid shape");
        assert_eq!(parsed.location.name, "Curitiba");
        assert_eq!(parsed.current.temp_c, 18.5);
        assert_eq!(parsed.current.condition.text, "Partly cloudy");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // 'é' is two bytes and straddles the 200-byte cutoff.
        let body = format!("{}é and more", "a".repeat(199));
        let truncated = truncate_body(&body);

        assert_eq!(truncated, format!("{}...", "a".repeat(199)));
    }

    #[test]
    fn short_bodies_are_untouched() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn missing_current_section_is_rejected() {
        let body = r#"{ "location": { "name": "Curitiba" } }"#;
        assert!(serde_json::from_str::<ForecastResponse>(body).is_err());
    }
}
