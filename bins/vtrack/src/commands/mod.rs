//! CLI command implementations

pub mod geo;
pub mod impact;
pub mod route;
pub mod session;
pub mod zones;

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use tracing::debug;
use vatavaran_core::catalog::ZoneCatalog;
use vatavaran_core::config::Config;
use vatavaran_core::Error;
use vatavaran_geo::Coordinate;

/// Shared state for every command.
pub struct Context {
    pub config: Config,
    format: String,
}

impl Context {
    pub fn new(config: Config, format: &str) -> Self {
        Self {
            config,
            format: format.to_string(),
        }
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }

    /// The given position, or the configured fallback when none was given.
    pub fn position(&self, given: Option<(f64, f64)>) -> Result<Coordinate> {
        match given {
            Some((lat, lng)) => Ok(Coordinate::try_new(lat, lng).map_err(Error::from)?),
            None => {
                let fallback = self.config.schema.map.fallback_location();
                debug!(?fallback, "no position given, using fallback location");
                Ok(fallback)
            }
        }
    }

    /// Zone catalog from the configured file, or the built-in one.
    pub fn catalog(&self) -> Result<ZoneCatalog> {
        match &self.config.schema.zones.catalog_path {
            Some(path) => Ok(ZoneCatalog::from_file(Path::new(path))?),
            None => Ok(ZoneCatalog::delhi_ncr()),
        }
    }
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
