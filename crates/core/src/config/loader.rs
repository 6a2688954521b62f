//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use vatavaran_geo::Coordinate;

/// Environment variable overriding `api.base_url`
pub const ENV_API_URL: &str = "VATAVARAN_API_URL";
/// Environment variable overriding `map.fallback_latitude`
pub const ENV_FALLBACK_LAT: &str = "VATAVARAN_FALLBACK_LAT";
/// Environment variable overriding `map.fallback_longitude`
pub const ENV_FALLBACK_LNG: &str = "VATAVARAN_FALLBACK_LNG";

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    /// Loaded settings
    pub schema: ConfigSchema,
    /// File they came from, if any
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or the standard locations,
    /// apply environment overrides and validate the result.
    ///
    /// An explicit path that does not exist is an error; when no path is
    /// given and no file is found, defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let mut schema = if let Some(ref p) = config_path {
            debug!(path = %p.display(), "loading configuration file");
            load_config_file(p)?
        } else {
            debug!("no configuration file found, using defaults");
            ConfigSchema::default()
        };

        apply_env_overrides(&mut schema, |key| std::env::var(key).ok())?;

        let config = Self {
            schema,
            path: config_path,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load with defaults only (no file)
    pub fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }

    /// Check values the geo helpers would otherwise reject later.
    pub fn validate(&self) -> Result<()> {
        let map = &self.schema.map;

        Coordinate::try_new(map.fallback_latitude, map.fallback_longitude)
            .map_err(|e| Error::config_invalid(format!("map fallback location: {}", e)))?;

        if map.route_steps == 0 {
            return Err(Error::config_invalid("map.route_steps must be at least 1"));
        }
        if !map.curve_offset.is_finite() {
            return Err(Error::config_invalid("map.curve_offset must be a finite number"));
        }
        if !map.viewport_padding.is_finite() || map.viewport_padding < 0.0 {
            return Err(Error::config_invalid("map.viewport_padding must be zero or positive"));
        }
        if let Some(radius) = self.schema.zones.radius_km {
            if !radius.is_finite() || radius < 0.0 {
                return Err(Error::config_invalid("zones.radius_km must be zero or positive"));
            }
        }

        Ok(())
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = [
        ".vatavaran.toml",
        "vatavaran.toml",
        ".config/vatavaran.toml",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();

    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("vatavaran").join("config.toml"));
    }

    candidates.into_iter().find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}: {}", path.display(), e)).with_source(e)
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::from(e).with_context(format!("While parsing {}", path.display()))
    })
}

/// Apply `VATAVARAN_*` overrides using `lookup` to read variables.
pub(crate) fn apply_env_overrides<F>(schema: &mut ConfigSchema, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_URL) {
        debug!(%url, "api.base_url overridden from environment");
        schema.api.base_url = url;
    }
    if let Some(lat) = lookup(ENV_FALLBACK_LAT) {
        schema.map.fallback_latitude = parse_env_f64(ENV_FALLBACK_LAT, &lat)?;
    }
    if let Some(lng) = lookup(ENV_FALLBACK_LNG) {
        schema.map.fallback_longitude = parse_env_f64(ENV_FALLBACK_LNG, &lng)?;
    }
    Ok(())
}

fn parse_env_f64(key: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::config_invalid(format!("{} is not a number: {:?}", key, value)))
}
