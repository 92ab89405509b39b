use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Price API error: {price_status} / {update_status}")]
    PriceApiError { price_status: u16, update_status: u16 },

    #[error("Remote API error ({status}): {message}")]
    RemoteApiError { status: u16, message: String },

    #[error("Product not found: {id}")]
    ProductNotFound { id: u64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Unsupported locale: {code}")]
    UnsupportedLocale { code: String },
}

impl StorefrontError {
    /// Short message suitable for showing to an end user.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) | Self::PriceApiError { .. } => {
                "Live prices are unavailable right now, please try again later".to_string()
            }
            Self::RemoteApiError { message, .. } => message.clone(),
            Self::ProductNotFound { .. } => "Product not found".to_string(),
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => format!("Configuration problem: {}", self),
            Self::UnsupportedLocale { code } => {
                format!("Language '{}' is not available (use ID or EN)", code)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_api_error_embeds_both_statuses() {
        let err = StorefrontError::PriceApiError {
            price_status: 500,
            update_status: 200,
        };
        assert_eq!(err.to_string(), "Price API error: 500 / 200");
    }

    #[test]
    fn test_user_friendly_message() {
        let err = StorefrontError::ProductNotFound { id: 7 };
        assert_eq!(err.user_friendly_message(), "Product not found");

        let err = StorefrontError::RemoteApiError {
            status: 400,
            message: "bad id".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "bad id");
    }
}
