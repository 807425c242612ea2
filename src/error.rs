//! Error types and handling for the itinerary planner

use thiserror::Error;

/// Main error type for the itinerary planner
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Configuration-related errors, such as a missing generative-text API key
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Trip request validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A submission arrived while another one was still being processed
    #[error("Planner busy: a trip is already being planned")]
    Busy,
}

impl PlannerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PlannerError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            PlannerError::Validation { message } => message.clone(),
            PlannerError::Busy => {
                "An itinerary is already being generated. Please wait for it to finish."
                    .to_string()
            }
        }
    }
}
