use reqwest::StatusCode;
use thiserror::Error;

/// Failure taxonomy for a single weather query.
///
/// Every variant maps to exactly one fixed user-facing string; nothing more
/// structured than that string ever reaches the presentation layer.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The query text was empty; no request was made.
    #[error("no city name was provided")]
    EmptyInput,

    /// The weather API answered 403.
    #[error("weather API access denied (HTTP 403)")]
    AccessDenied,

    /// The weather API answered with a non-403 error status.
    #[error("weather API request failed with status {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    /// The request never produced an HTTP response.
    #[error("failed to reach the weather API: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("failed to parse weather API response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl WeatherError {
    /// The single string shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::EmptyInput => "Please enter a city name.",
            WeatherError::AccessDenied => "API access denied. Check your API key.",
            WeatherError::Upstream { .. } | WeatherError::Transport(_) => {
                "An error occurred fetching weather data. Please try again later."
            }
            WeatherError::MalformedResponse(_) => {
                "The weather service returned an unexpected response. Please try again later."
            }
        }
    }
}

/// Why the location resolver could not produce coordinates.
///
/// These paths are logged but never surfaced to the user.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("permission to access location was denied")]
    PermissionDenied,

    #[error("location service is unavailable")]
    Unavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_and_transient_map_to_distinct_messages() {
        let denied = WeatherError::AccessDenied;
        let upstream = WeatherError::Upstream {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".into(),
        };

        assert_eq!(denied.user_message(), "API access denied. Check your API key.");
        assert_eq!(
            upstream.user_message(),
            "An error occurred fetching weather data. Please try again later."
        );
        assert_ne!(denied.user_message(), upstream.user_message());
    }

    #[test]
    fn empty_input_has_its_own_message() {
        assert_eq!(WeatherError::EmptyInput.user_message(), "Please enter a city name.");
    }
}
