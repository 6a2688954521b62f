//! Core logic for VatavaranTrack tools
//!
//! This crate provides the domain pieces shared by the command line and the
//! web client bindings:
//!
//! - **Error handling**: Errors with codes, context and recovery suggestions
//! - **Configuration**: TOML-based configuration with environment overrides
//! - **Zone catalog**: Drop-off zones and the fallback map position
//! - **Impact**: Environmental impact of collected waste
//! - **Stats**: Review counts and leaderboards for the dashboards
//! - **Sessions**: Explicit login sessions and role checks
//!
//! # Example
//!
//! ```rust
//! use vatavaran_core::catalog::{ZoneCatalog, FALLBACK_LOCATION};
//! use vatavaran_geo::rank_by_distance;
//!
//! let catalog = ZoneCatalog::delhi_ncr();
//! let ranked = rank_by_distance(catalog.zones(), &FALLBACK_LOCATION);
//! assert_eq!(ranked[0].item.name, "Connaught Place Eco-bins");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod impact;
pub mod session;
pub mod stats;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::catalog::{DumpZone, ZoneCatalog, ZoneKind, ZoneStatus, FALLBACK_LOCATION};
    pub use crate::config::Config;
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::impact::{
        calculate_impact, impact_message, total_impact, Impact, Pickup, PickupStatus, WasteCategory,
    };
    pub use crate::session::{AccessDenied, Role, Session, SessionStore};
    pub use crate::stats::{dashboard_stats, DashboardStats};
}
