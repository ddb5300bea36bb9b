use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

/// Credentials for the weather API.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WeatherApiConfig {
    pub api_key: String,
}

/// Credentials for the nearest-cities geocoding API.
///
/// The service authenticates via two request headers, so both the key and
/// the host name are configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeocodeConfig {
    pub api_key: String,
    pub api_host: String,
}

/// Coordinates pinned in configuration, standing in for a device GPS fix.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PinnedLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [weather]
/// api_key = "..."
///
/// [geocode]
/// api_key = "..."
/// api_host = "geocodeapi.p.rapidapi.com"
///
/// [location]
/// latitude = -25.43
/// longitude = -49.27
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub weather: Option<WeatherApiConfig>,
    pub geocode: Option<GeocodeConfig>,
    pub location: Option<PinnedLocation>,
}

/// Environment variables that override file values. Credentials never live
/// in source; they are injected here at startup.
pub const ENV_WEATHER_API_KEY: &str = "CLIMA_WEATHER_API_KEY";
pub const ENV_GEOCODE_API_KEY: &str = "CLIMA_GEOCODE_API_KEY";
pub const ENV_GEOCODE_API_HOST: &str = "CLIMA_GEOCODE_API_HOST";
pub const ENV_LATITUDE: &str = "CLIMA_LATITUDE";
pub const ENV_LONGITUDE: &str = "CLIMA_LONGITUDE";

impl Config {
    /// Load config from disk and apply environment overrides.
    ///
    /// Missing file is not an error on first run; an empty default is
    /// returned and the environment alone may still provide credentials.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file(&Self::config_file_path()?)?;
        cfg.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    /// Load config from an explicit path, without environment overrides.
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "clima", "clima")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay environment values on top of whatever the file provided.
    /// `lookup` is injected so tests don't touch the process environment.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(ENV_WEATHER_API_KEY) {
            self.weather = Some(WeatherApiConfig { api_key: key });
        }

        match (lookup(ENV_GEOCODE_API_KEY), lookup(ENV_GEOCODE_API_HOST)) {
            (None, None) => {}
            (key, host) => {
                let mut geocode = self.geocode.clone().unwrap_or_default();
                if let Some(key) = key {
                    geocode.api_key = key;
                }
                if let Some(host) = host {
                    geocode.api_host = host;
                }
                self.geocode = Some(geocode);
            }
        }

        let lat = lookup(ENV_LATITUDE).and_then(|v| v.parse::<f64>().ok());
        let lon = lookup(ENV_LONGITUDE).and_then(|v| v.parse::<f64>().ok());
        if let (Some(latitude), Some(longitude)) = (lat, lon) {
            self.location = Some(PinnedLocation { latitude, longitude });
        }
    }

    /// Weather API key, required for every query.
    pub fn weather_api_key(&self) -> Result<&str> {
        self.weather.as_ref().map(|w| w.api_key.as_str()).ok_or_else(|| {
            anyhow!(
                "No weather API key configured.\n\
                 Hint: run `clima configure` or set {ENV_WEATHER_API_KEY}."
            )
        })
    }

    /// Geocoding credentials, required only for the location-based path.
    pub fn geocode_credentials(&self) -> Result<&GeocodeConfig> {
        self.geocode.as_ref().ok_or_else(|| {
            anyhow!(
                "No geocoding API credentials configured.\n\
                 Hint: run `clima configure` or set {ENV_GEOCODE_API_KEY} and {ENV_GEOCODE_API_HOST}."
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn weather_api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.weather_api_key().unwrap_err();

        assert!(err.to_string().contains("No weather API key configured"));
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut cfg = Config {
            weather: Some(WeatherApiConfig { api_key: "from-file".into() }),
            ..Config::default()
        };

        let vars = env(&[(ENV_WEATHER_API_KEY, "from-env")]);
        cfg.apply_env_overrides(|name| vars.get(name).cloned());

        assert_eq!(cfg.weather_api_key().unwrap(), "from-env");
    }

    #[test]
    fn geocode_host_override_keeps_file_key() {
        let mut cfg = Config {
            geocode: Some(GeocodeConfig {
                api_key: "file-key".into(),
                api_host: "file-host".into(),
            }),
            ..Config::default()
        };

        let vars = env(&[(ENV_GEOCODE_API_HOST, "env-host")]);
        cfg.apply_env_overrides(|name| vars.get(name).cloned());

        let geocode = cfg.geocode_credentials().unwrap();
        assert_eq!(geocode.api_key, "file-key");
        assert_eq!(geocode.api_host, "env-host");
    }

    #[test]
    fn pinned_location_requires_both_coordinates() {
        let mut cfg = Config::default();

        let vars = env(&[(ENV_LATITUDE, "-25.43")]);
        cfg.apply_env_overrides(|name| vars.get(name).cloned());
        assert!(cfg.location.is_none());

        let vars = env(&[(ENV_LATITUDE, "-25.43"), (ENV_LONGITUDE, "-49.27")]);
        cfg.apply_env_overrides(|name| vars.get(name).cloned());

        let pinned = cfg.location.expect("both coordinates set");
        assert_eq!(pinned.latitude, -25.43);
        assert_eq!(pinned.longitude, -49.27);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            weather: Some(WeatherApiConfig { api_key: "KEY".into() }),
            geocode: Some(GeocodeConfig {
                api_key: "GEO".into(),
                api_host: "geocodeapi.p.rapidapi.com".into(),
            }),
            location: Some(PinnedLocation { latitude: 1.5, longitude: -2.5 }),
        };

        cfg.save_to(&path).expect("save");
        let loaded = Config::load_file(&path).expect("load");

        assert_eq!(loaded.weather_api_key().unwrap(), "KEY");
        assert_eq!(loaded.geocode_credentials().unwrap().api_host, "geocodeapi.p.rapidapi.com");
        assert_eq!(loaded.location.unwrap().latitude, 1.5);
    }

    #[test]
    fn missing_file_loads_as_default() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cfg = Config::load_file(&dir.path().join("absent.toml")).expect("load");

        assert!(cfg.weather.is_none());
        assert!(cfg.geocode.is_none());
    }
}
