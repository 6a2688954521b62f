//! Structured errors with codes, context and recovery suggestions
//!
//! This module provides structured error types with:
//! - Detailed error context
//! - Recovery suggestions
//! - Error codes for programmatic handling
//! - Serializable error reports

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use vatavaran_geo::{GeoError, GeoErrorCode};

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // General errors (1xxx)
    /// Unclassified failure
    Unknown = 1000,
    /// Bug in vatavaran itself
    Internal = 1001,

    // IO errors (2xxx)
    /// Other I/O failure
    IoError = 2000,
    /// A file does not exist
    FileNotFound = 2001,
    /// A file could not be accessed
    PermissionDenied = 2002,

    // Configuration errors (3xxx)
    /// Other configuration problem
    ConfigError = 3000,
    /// Explicit config path does not exist
    ConfigNotFound = 3001,
    /// Config file is not valid TOML
    ConfigParseError = 3002,
    /// Config value out of range
    ConfigValidationError = 3003,

    // Data errors (4xxx)
    /// Other data problem
    DataError = 4000,
    /// No zone with the requested id
    ZoneNotFound = 4001,
    /// Catalog, pickup or session JSON is malformed
    ParseError = 4002,

    // Validation errors (6xxx)
    /// Input failed validation
    ValidationError = 6000,
    /// Input has the wrong shape
    InvalidInput = 6001,

    // Auth errors (7xxx)
    /// Other auth problem
    AuthError = 7000,
    /// No session
    NotAuthenticated = 7001,
    /// Session role may not do this
    UnauthorizedAccess = 7002,

    // Geo errors (10xxx)
    /// Other geo failure
    GeoError = 10000,
    /// Latitude or longitude out of range
    InvalidCoordinate = 10001,
    /// Distance cannot be displayed
    InvalidDistance = 10002,
    /// Route needs at least one step
    InvalidRouteSteps = 10003,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "General",
            2 => "IO",
            3 => "Configuration",
            4 => "Data",
            6 => "Validation",
            7 => "Auth",
            10 => "Geo",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {}", ctx)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Convert to a serializable report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code,
            code_str: self.code.to_string(),
            category: self.code.category().to_string(),
            message: self.message.clone(),
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(|e| e.to_string()),
        }
    }

    // Convenience constructors

    /// I/O failure
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IoError, message)
    }

    /// Configuration problem
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Explicit config path is missing
    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create a .vatavaran.toml file or use --config to specify a path")
    }

    /// Config value out of range
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigValidationError, message)
    }

    /// Unknown zone id
    pub fn zone_not_found(id: i64) -> Self {
        Self::new(ErrorCode::ZoneNotFound, format!("No drop-off zone with id {}", id))
            .with_suggestion("Run `vtrack zones` to list the known zones")
    }

    /// Rejected input
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// No session
    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated, "No active session")
            .with_suggestion("Log in again to start a new session")
    }

    /// Signed in with the wrong role
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnauthorizedAccess, message)
    }
}

/// Serializable error report for logging and API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Error code
    pub code: ErrorCode,
    /// Code as shown to users, e.g. `E4001`
    pub code_str: String,
    /// Category name
    pub category: String,
    /// Human-readable message
    pub message: String,
    /// Additional context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Recovery suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Underlying error, rendered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for CLI commands
pub mod exit_codes {
    /// Command succeeded
    pub const SUCCESS: i32 = 0;
    /// Unclassified failure
    pub const FAILURE: i32 = 1;
    /// Bad input
    pub const VALIDATION_ERROR: i32 = 2;
    /// Bad configuration
    pub const CONFIG_ERROR: i32 = 3;
    /// Missing or malformed data
    pub const DATA_ERROR: i32 = 4;
    /// Not signed in or wrong role
    pub const AUTH_ERROR: i32 = 5;

    /// Maps an error code to the process exit code.
    pub fn for_code(code: super::ErrorCode) -> i32 {
        match code.code() / 1000 {
            3 => CONFIG_ERROR,
            4 => DATA_ERROR,
            6 | 10 => VALIDATION_ERROR,
            7 => AUTH_ERROR,
            _ => FAILURE,
        }
    }
}

// Implement From for common error types

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::ParseError, format!("JSON parse error: {}", err))
            .with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {}", err))
            .with_source(err)
    }
}

impl From<GeoError> for Error {
    fn from(err: GeoError) -> Self {
        let code = match err.code() {
            GeoErrorCode::InvalidCoordinate => ErrorCode::InvalidCoordinate,
            GeoErrorCode::InvalidDistance => ErrorCode::InvalidDistance,
            GeoErrorCode::InvalidRouteSteps => ErrorCode::InvalidRouteSteps,
            GeoErrorCode::JsonParsing => ErrorCode::ParseError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_suggestion(suggestion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::FileNotFound.to_string(), "E2001");
        assert_eq!(ErrorCode::InvalidCoordinate.to_string(), "E10001");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::IoError.category(), "IO");
        assert_eq!(ErrorCode::ZoneNotFound.category(), "Data");
        assert_eq!(ErrorCode::UnauthorizedAccess.category(), "Auth");
        assert_eq!(ErrorCode::InvalidRouteSteps.category(), "Geo");
    }

    #[test]
    fn test_geo_error_keeps_code() {
        let geo = vatavaran_geo::Coordinate::try_new(100.0, 0.0).unwrap_err();
        let err: Error = geo.into();
        assert_eq!(err.code, ErrorCode::InvalidCoordinate);
        assert_eq!(err.code.code(), GeoErrorCode::InvalidCoordinate as u32);
        assert_eq!(exit_codes::for_code(err.code), exit_codes::VALIDATION_ERROR);
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::zone_not_found(42).with_context("While generating a route");

        assert_eq!(err.code, ErrorCode::ZoneNotFound);
        assert!(err.context.is_some());
        assert!(err.suggestion.is_some());
        assert!(err.to_string().contains("E4001"));
    }

    #[test]
    fn test_error_report_serialization() {
        let err = Error::not_authenticated().with_context("Opening the supervisor dashboard");

        let report = err.to_report();
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains("E7001"));
        assert!(json.contains("Auth"));
        assert!(json.contains("NOT_AUTHENTICATED"));
    }

    #[test]
    fn test_result_ext() {
        let result: Result<()> = Err(Error::validation("weight must be positive"));
        let err = result.context("Logging a pickup").unwrap_err();
        assert_eq!(err.context.as_deref(), Some("Logging a pickup"));
    }
}
