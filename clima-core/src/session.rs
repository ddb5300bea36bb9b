use crate::config::Config;
use crate::geocode::GeocodeClient;
use crate::location::{ConfiguredLocation, LocationProvider};
use crate::state::ViewState;
use crate::weather::WeatherClient;

/// Owner of the view state and the clients that feed it.
///
/// Control flow is linear: location resolver → weather fetcher → view
/// state. Every state transition goes through [`ViewState`]'s methods, on a
/// single logical task, so no outcome can race another past the token
/// check.
#[derive(Debug)]
pub struct Session {
    state: ViewState,
    weather: WeatherClient,
    geocode: Option<GeocodeClient>,
    location: Box<dyn LocationProvider>,
}

impl Session {
    pub fn new(
        weather: WeatherClient,
        geocode: Option<GeocodeClient>,
        location: Box<dyn LocationProvider>,
    ) -> Self {
        Self {
            state: ViewState::new(),
            weather,
            geocode,
            location,
        }
    }

    /// Build a session from configuration. A weather API key is mandatory;
    /// geocoding credentials and a pinned location are only needed for the
    /// location-based path and may be absent.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let weather = WeatherClient::new(config.weather_api_key()?.to_owned());
        let geocode = config.geocode.clone().map(GeocodeClient::new);
        let location = Box::new(ConfiguredLocation::new(config.location));

        Ok(Self::new(weather, geocode, location))
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn set_query_text(&mut self, text: impl Into<String>) {
        self.state.query_text = text.into();
    }

    /// Run one weather query and settle the view state with its outcome.
    pub async fn submit(&mut self, city: &str) {
        let token = self.state.begin_query();

        match self.weather.fetch(city).await {
            Ok(report) => {
                tracing::debug!(city, location = %report.location_name, "weather query succeeded");
                self.state.apply_success(token, report);
            }
            Err(err) => {
                tracing::warn!(city, error = %err, "weather query failed");
                self.state.apply_failure(token, &err);
            }
        }
    }

    /// Resolve the current city from the location provider and query its
    /// weather. Permission denial and geocoding failures abort silently:
    /// they are logged, nothing is surfaced, and the view state is left
    /// untouched.
    pub async fn resolve_current_city(&mut self) {
        let Some(city) = self.lookup_nearest_city().await else {
            return;
        };

        self.state.query_text = city.clone();
        self.submit(&city).await;
    }

    /// Refresh trigger: re-run the location resolver with the loading flag
    /// raised for the whole round trip. The flag stays up until the
    /// re-triggered fetch settles, or is lowered when the resolver aborts
    /// without an outcome. The displayed outcome is cleared only once the
    /// fetch actually starts; an abort leaves it in place.
    pub async fn refresh(&mut self) {
        let token = self.state.begin_refresh();

        match self.lookup_nearest_city().await {
            Some(city) => {
                self.state.query_text = city.clone();
                self.submit(&city).await;
            }
            None => self.state.settle_without_outcome(token),
        }
    }

    async fn lookup_nearest_city(&self) -> Option<String> {
        if let Err(err) = self.location.request_permission().await {
            tracing::warn!(error = %err, "location permission not granted");
            return None;
        }

        let position = match self.location.current_position().await {
            Ok(position) => position,
            Err(err) => {
                tracing::warn!(error = %err, "could not obtain a position fix");
                return None;
            }
        };

        let Some(geocode) = &self.geocode else {
            tracing::warn!("no geocoding credentials configured");
            return None;
        };

        let cities = match geocode.nearest_cities(position).await {
            Ok(cities) => cities,
            Err(err) => {
                tracing::warn!(error = %err, "nearest-cities lookup failed");
                return None;
            }
        };

        match cities.into_iter().next() {
            Some(first) => Some(first.city),
            None => {
                tracing::debug!("geocoding returned no cities for the position");
                None
            }
        }
    }
}
