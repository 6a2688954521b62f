//! Configuration loading and schema definitions
//!
//! Settings come from a TOML file, then `VATAVARAN_*` environment variables.

mod loader;
mod schema;

pub use loader::{Config, ENV_API_URL, ENV_FALLBACK_LAT, ENV_FALLBACK_LNG};
pub use schema::*;
