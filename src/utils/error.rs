use thiserror::Error;

/// Message shown when the lookup could not be completed at all.
pub const FETCH_FAILED_MESSAGE: &str = "Unable to fetch addresses, please try again";

/// Message shown when the lookup answered with unusable address data.
pub const INVALID_ADDRESS_DATA_MESSAGE: &str =
    "The address service returned incomplete address data";

/// Enrollment form failures. The display strings are shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No address selected, try to select an address or find one if you haven't")]
    NoAddressSelected,

    #[error("First name and last name fields mandatory!")]
    NamesMissing,

    #[error("Selected address not found")]
    SelectedAddressNotFound,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lookup service answered with HTTP {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Invalid lookup response: {message}")]
    InvalidResponse { message: String },

    #[error("Lookup task did not finish: {message}")]
    LookupTask { message: String },

    #[error("{message}")]
    Service { message: String },

    #[error("Address record {index} has a missing or invalid `{field}`")]
    MalformedAddress { index: usize, field: &'static str },

    #[error("Address records {first} and {second} share id `{id}`")]
    DuplicateAddress {
        id: String,
        first: usize,
        second: usize,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Service,
    Transport,
    DataIntegrity,
    Configuration,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Validation(_) => ErrorCategory::Validation,
            AppError::Service { .. } => ErrorCategory::Service,
            AppError::Http(_)
            | AppError::Serialization(_)
            | AppError::UnexpectedStatus { .. }
            | AppError::InvalidResponse { .. }
            | AppError::LookupTask { .. } => ErrorCategory::Transport,
            AppError::MalformedAddress { .. } | AppError::DuplicateAddress { .. } => {
                ErrorCategory::DataIntegrity
            }
            AppError::Io(_) | AppError::Config { .. } | AppError::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    /// The single string that ends up in the error banner.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(err) => err.to_string(),
            AppError::Service { message } => message.clone(),
            AppError::MalformedAddress { .. } | AppError::DuplicateAddress { .. } => {
                INVALID_ADDRESS_DATA_MESSAGE.to_string()
            }
            AppError::Http(_)
            | AppError::Serialization(_)
            | AppError::UnexpectedStatus { .. }
            | AppError::InvalidResponse { .. }
            | AppError::LookupTask { .. } => FETCH_FAILED_MESSAGE.to_string(),
            AppError::Io(_) | AppError::Config { .. } | AppError::InvalidConfigValue { .. } => {
                self.to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
