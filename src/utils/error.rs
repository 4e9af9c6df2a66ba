use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExploreError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error: {field} is not set")]
    MissingConfigError { field: String },

    #[error("Configuration error: invalid {field} '{value}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("API error: {status}{}", detail(.message))]
    ApiError { status: StatusCode, message: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("API error: unreadable response body: {0}")]
    ResponseFormatError(#[from] serde_json::Error),

    #[error("Output error: {0}")]
    OutputError(#[from] std::io::Error),

    #[error("Output error: {0}")]
    CsvError(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Api,
    Network,
    Output,
}

impl ExploreError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::ApiError { .. } | Self::ResponseFormatError(_) => ErrorCategory::Api,
            Self::NetworkError(_) => ErrorCategory::Network,
            Self::OutputError(_) | Self::CsvError(_) => ErrorCategory::Output,
        }
    }

    /// Follow-up advice printed under the diagnostic, if any applies.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::MissingConfigError { field } => {
                Some(format!("Please set it with: export {}='your_api_key'", field))
            }
            Self::ApiError { status, .. } if *status == StatusCode::UNAUTHORIZED => {
                Some(format!("Check your {} is valid", crate::API_KEY_ENV))
            }
            Self::ApiError { status, .. } if *status == StatusCode::TOO_MANY_REQUESTS => {
                Some("Rate limit exceeded. Please wait and try again.".to_string())
            }
            Self::NetworkError(e) if e.is_timeout() => {
                Some("The request timed out. Check your connection.".to_string())
            }
            _ => None,
        }
    }

    /// Every failure ends the invocation with the same status.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

pub type Result<T> = std::result::Result<T, ExploreError>;

fn detail(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(" - {}", message)
    }
}
