//! Error types for the climate summary pipeline

use thiserror::Error;

/// Main error type for the climate summary pipeline
#[derive(Error, Debug)]
pub enum ClimateError {
    /// The place could not be geocoded
    #[error("Place not found: {place}")]
    NotFound { place: String },

    /// Transport or HTTP failure from an external service
    #[error("Upstream error from {service}: {message}")]
    Upstream {
        service: String,
        failure: UpstreamFailure,
        message: String,
    },

    /// The archive answered but without the expected fields
    #[error("Archive data unavailable: {message}")]
    DataUnavailable { message: String },

    /// Nothing to average
    #[error("Insufficient data: {message}")]
    InsufficientData { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The caller cancelled the request while it was in flight
    #[error("Request cancelled")]
    Cancelled,

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Why an external service call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamFailure {
    /// Connection refused, reset or timed out
    Unreachable,
    /// The service answered with a non-success HTTP status
    Status(u16),
    /// The body could not be decoded
    InvalidResponse,
}

impl ClimateError {
    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(place: S) -> Self {
        Self::NotFound {
            place: place.into(),
        }
    }

    /// Create a new upstream error for the named service
    pub fn upstream<S: Into<String>, M: Into<String>>(
        service: S,
        failure: UpstreamFailure,
        message: M,
    ) -> Self {
        Self::Upstream {
            service: service.into(),
            failure,
            message: message.into(),
        }
    }

    /// Create a new data-unavailable error
    pub fn data_unavailable<S: Into<String>>(message: S) -> Self {
        Self::DataUnavailable {
            message: message.into(),
        }
    }

    /// Create a new insufficient-data error
    pub fn insufficient_data<S: Into<String>>(message: S) -> Self {
        Self::InsufficientData {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Pipeline stage that produced this error
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            ClimateError::NotFound { .. } => "geocoding",
            ClimateError::Upstream { service, .. } if service == "geocoding" => "geocoding",
            ClimateError::Upstream { .. } | ClimateError::DataUnavailable { .. } => "archive",
            ClimateError::InsufficientData { .. } => "aggregation",
            ClimateError::Validation { .. } => "input",
            ClimateError::Cancelled => "request",
            ClimateError::Config { .. } => "configuration",
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ClimateError::NotFound { place } => {
                format!("Could not find '{place}' on the map. Please check the place name.")
            }
            ClimateError::Upstream {
                service, failure, ..
            } => match failure {
                UpstreamFailure::Unreachable => format!(
                    "The {service} service could not be reached or did not respond in time. Please try again later."
                ),
                UpstreamFailure::Status(code) if *code >= 500 => format!(
                    "The {service} service failed with HTTP {code}. Please try again later."
                ),
                UpstreamFailure::Status(code) => {
                    format!("The {service} service rejected the request with HTTP {code}.")
                }
                UpstreamFailure::InvalidResponse => {
                    format!("The {service} service returned an unexpected response.")
                }
            },
            ClimateError::DataUnavailable { .. } => {
                "No historical climate data is available for this place and period.".to_string()
            }
            ClimateError::InsufficientData { .. } => {
                "The climate archive returned no daily samples for this period.".to_string()
            }
            ClimateError::Validation { message } => format!("Invalid input: {message}"),
            ClimateError::Cancelled => "The request was cancelled.".to_string(),
            ClimateError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file.")
            }
        }
    }
}
