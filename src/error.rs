//! Error types and handling for the weather dashboard

use crate::i18n::Language;
use thiserror::Error;

/// Main error type for the `mezeg` application
#[derive(Error, Debug)]
pub enum MezegError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream weather provider errors (non-2xx, transport failure)
    #[error("Weather provider error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// City name not present in the reference table
    #[error("Unknown city: {city}")]
    UnknownCity { city: String },

    /// Session store errors (missing or expired session)
    #[error("Session error: {message}")]
    Session { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl MezegError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new provider error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new session error
    pub fn session<S: Into<String>>(message: S) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message in the requested language.
    ///
    /// All upstream failure modes collapse into one banner string; the
    /// detailed cause stays in the `Display` impl for logs.
    #[must_use]
    pub fn user_message(&self, lang: Language) -> String {
        match (self, lang) {
            (MezegError::Config { .. }, Language::English) => {
                "Configuration error. Please check your API keys.".to_string()
            }
            (MezegError::Config { .. }, Language::Hebrew) => {
                "שגיאת תצורה. בדקו את מפתחות ה-API.".to_string()
            }
            (MezegError::Api { .. }, Language::English) => {
                "Error fetching weather data. Please try again later.".to_string()
            }
            (MezegError::Api { .. }, Language::Hebrew) => {
                "שגיאה בטעינת נתוני מזג האוויר. נסו שוב מאוחר יותר.".to_string()
            }
            (MezegError::Validation { message }, Language::English) => {
                format!("Invalid input: {message}")
            }
            (MezegError::Validation { message }, Language::Hebrew) => {
                format!("קלט לא תקין: {message}")
            }
            (MezegError::UnknownCity { city }, Language::English) => {
                format!("No matching city found: {city}")
            }
            (MezegError::UnknownCity { city }, Language::Hebrew) => {
                format!("לא נמצאה עיר מתאימה: {city}")
            }
            (MezegError::Session { .. }, Language::English) => {
                "Session not found or expired.".to_string()
            }
            (MezegError::Session { .. }, Language::Hebrew) => {
                "ההפעלה לא נמצאה או שפג תוקפה.".to_string()
            }
            (MezegError::Io { .. }, Language::English) => "File operation failed.".to_string(),
            (MezegError::Io { .. }, Language::Hebrew) => "פעולת קובץ נכשלה.".to_string(),
            (MezegError::General { message }, _) => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = MezegError::config("missing API key");
        assert!(matches!(config_err, MezegError::Config { .. }));

        let api_err = MezegError::api("upstream returned 503");
        assert!(matches!(api_err, MezegError::Api { .. }));

        let validation_err = MezegError::validation("empty city name");
        assert!(matches!(validation_err, MezegError::Validation { .. }));
    }

    #[test]
    fn test_user_messages_collapse_upstream_detail() {
        let api_err = MezegError::api("HTTP 503 from api.weatherapi.com");
        let msg = api_err.user_message(Language::English);
        assert!(msg.contains("Error fetching weather"));
        assert!(!msg.contains("503"));
    }

    #[test]
    fn test_user_messages_hebrew() {
        let api_err = MezegError::api("boom");
        assert!(
            api_err
                .user_message(Language::Hebrew)
                .contains("שגיאה בטעינת נתוני מזג האוויר")
        );

        let validation_err = MezegError::validation("x");
        assert!(validation_err.user_message(Language::Hebrew).contains("x"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MezegError = io_err.into();
        assert!(matches!(err, MezegError::Io { .. }));
    }
}
