use serde::{Deserialize, Serialize};

/// Parsed outcome of one successful weather query.
///
/// Replaced wholesale on every new query; there is no identity beyond
/// "latest result".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location_name: String,
    pub temperature_c: f64,
    pub condition_text: String,
    /// Absolute icon URL. The API sends a protocol-relative path; the
    /// client prefixes it with `https:` before it lands here.
    pub condition_icon_url: String,
}

/// One entry of the geocoding API's nearest-cities array.
///
/// Only the first element is ever used, and only its city name.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoCity {
    #[serde(rename = "City")]
    pub city: String,
}

/// A one-shot position fix from a location provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo_city_deserializes_capitalized_field() {
        let cities: Vec<GeoCity> =
            serde_json::from_str(r#"[{"City":"Curitiba","Country":"BR"},{"City":"Colombo"}]"#)
                .expect("valid nearest-cities payload");

        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].city, "Curitiba");
    }
}
