//! Airport Weather Library
//!
//! An in-memory weather service for a small set of airports. Ground stations
//! push individual atmospheric readings and clients query current conditions
//! for one airport or for every airport within a radius.
//!
//! This library provides tools for:
//! - Registering airports by IATA code with fixed coordinates
//! - Validating and storing the latest reading per data type per airport
//! - Great-circle (haversine) distance between airports
//! - Point and radius weather queries with usage accounting
//! - Health snapshots built from record freshness and query counters
//! - An HTTP transport, a matching client and an airport feed loader

pub mod client;
pub mod config;
pub mod constants;
pub mod server;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod airport_registry;
        pub mod atmospheric_store;
        pub mod distance;
        pub mod health;
        pub mod query_engine;
        pub mod weather_store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Airport, AtmosphericInformation, DataPoint, DataPointType, UpdateOutcome};
pub use app::services::health::HealthReport;
pub use app::services::weather_store::WeatherStore;
pub use config::Config;

/// Result type alias for the airport weather service
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for airport weather operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Lookup, update or query against an unregistered IATA code
    #[error("Airport not found: {code}")]
    AirportNotFound { code: String },

    /// Add with a code that is already registered
    #[error("Airport already registered: {code}")]
    DuplicateAirport { code: String },

    /// Airport code or coordinates out of range
    #[error("Invalid airport: {message}")]
    InvalidAirport { message: String },

    /// Query parameters out of range
    #[error("Invalid query: {message}")]
    InvalidQuery { message: String },

    /// Unrecognised data point type name
    #[error("Unknown data point type: {name}")]
    UnknownDataPointType { name: String },

    /// Request body is not valid JSON for the expected type
    #[error("Invalid payload: {message}")]
    InvalidPayload {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Configuration file could not be parsed
    #[error("Configuration file '{path}' could not be parsed")]
    ConfigParsing {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Airport feed parsing error
    #[error("Airport feed parsing error in file '{file}': {message}")]
    FeedParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// HTTP client error
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// Operation stopped by a shutdown request before it finished
    #[error("Interrupted: {reason}")]
    Interrupted { reason: String },

    /// HTTP server error
    #[error("Server error: {message}")]
    Server {
        message: String,
        #[source]
        source: warp::Error,
    },
}

impl Error {
    /// Create an airport not found error
    pub fn airport_not_found(code: impl Into<String>) -> Self {
        Self::AirportNotFound { code: code.into() }
    }

    /// Create a duplicate airport error
    pub fn duplicate_airport(code: impl Into<String>) -> Self {
        Self::DuplicateAirport { code: code.into() }
    }

    /// Create an invalid airport error
    pub fn invalid_airport(message: impl Into<String>) -> Self {
        Self::InvalidAirport {
            message: message.into(),
        }
    }

    /// Create an invalid query error
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    /// Create an unknown data point type error
    pub fn unknown_data_point_type(name: impl Into<String>) -> Self {
        Self::UnknownDataPointType { name: name.into() }
    }

    /// Create an invalid payload error
    pub fn invalid_payload(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::InvalidPayload {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an interrupted error
    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }

    /// Create a configuration parsing error
    pub fn config_parsing(path: impl Into<String>, source: toml::de::Error) -> Self {
        Self::ConfigParsing {
            path: path.into(),
            source,
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a feed parsing error
    pub fn feed_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::FeedParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an HTTP client error with context
    pub fn http(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            message: message.into(),
            source,
        }
    }

    /// Create a server error with context
    pub fn server(message: impl Into<String>, source: warp::Error) -> Self {
        Self::Server {
            message: message.into(),
            source,
        }
    }

    /// Whether this error refers to a missing airport
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AirportNotFound { .. })
    }

    /// Whether this error was caused by a malformed request rather than by the service
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAirport { .. }
                | Self::InvalidQuery { .. }
                | Self::UnknownDataPointType { .. }
                | Self::InvalidPayload { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::FeedParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Http {
            message: "HTTP request failed".to_string(),
            source: error,
        }
    }
}
