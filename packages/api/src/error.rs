use thiserror::Error;

/// Message shown when nothing more specific is known.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Authentication failed and could not be refreshed. The stored session
    /// has already been cleared.
    #[error("session expired")]
    SessionExpired,

    #[error("could not decode response: {0}")]
    Decode(String),

    /// Rejected on the client before any request was sent.
    #[error("{0}")]
    Invalid(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<store::StoreError> for ApiError {
    fn from(e: store::StoreError) -> Self {
        ApiError::Storage(e.to_string())
    }
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The backend refuses answer changes on finished attempts with a message
    /// containing "already submitted".
    pub fn is_already_submitted(&self) -> bool {
        match self {
            ApiError::Status { message, .. } => {
                message.to_lowercase().contains("already submitted")
            }
            _ => false,
        }
    }

    /// Text for a toast. `fallback` is used when the error carries nothing a
    /// user can act on.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { message, .. } if !message.trim().is_empty() => message.clone(),
            ApiError::Invalid(message) => message.clone(),
            ApiError::SessionExpired => "Your session has expired. Please sign in again.".into(),
            ApiError::Network(_) => {
                "Unable to connect to server. Please check your connection.".into()
            }
            ApiError::Timeout => "The server took too long to respond.".into(),
            _ => fallback.to_string(),
        }
    }
}

/// Message for a failed login, by status.
pub fn login_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Status { status: 401, .. } | ApiError::SessionExpired => {
            "Invalid username or password".to_string()
        }
        ApiError::Status {
            status: 403,
            message,
        } => {
            if message.trim().is_empty() {
                "Account is not active or verified".to_string()
            } else {
                message.clone()
            }
        }
        ApiError::Status { status: 429, .. } => {
            "Too many login attempts. Please try again later".to_string()
        }
        ApiError::Status { status, .. } if *status >= 500 => {
            "Server error. Please try again later".to_string()
        }
        ApiError::Network(_) | ApiError::Timeout => {
            "Unable to connect to server. Please check your connection".to_string()
        }
        ApiError::Status { message, .. } if !message.trim().is_empty() => message.clone(),
        ApiError::Status { .. } => "Login failed. Please try again".to_string(),
        _ => "An unexpected error occurred".to_string(),
    }
}

/// Message for a failed guest sign-in.
pub fn guest_login_error_message(error: &ApiError) -> &'static str {
    if error.status() == Some(401) {
        "Guest account not available"
    } else {
        "Failed to login as guest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16, message: &str) -> ApiError {
        ApiError::Status {
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_user_message_prefers_backend_text() {
        assert_eq!(status(400, "Title taken").user_message("x"), "Title taken");
        assert_eq!(status(500, "").user_message("Failed to load"), "Failed to load");
        assert_eq!(
            ApiError::Decode("eof".into()).user_message("Failed to load"),
            "Failed to load"
        );
    }

    #[test]
    fn test_login_messages() {
        assert_eq!(login_error_message(&status(401, "Bad credentials")), "Invalid username or password");
        assert_eq!(login_error_message(&status(403, "Account locked")), "Account locked");
        assert_eq!(
            login_error_message(&status(403, "")),
            "Account is not active or verified"
        );
        assert!(login_error_message(&status(429, "")).starts_with("Too many"));
        assert!(login_error_message(&status(503, "")).starts_with("Server error"));
        assert!(login_error_message(&ApiError::Network("refused".into())).starts_with("Unable to connect"));
        assert_eq!(login_error_message(&status(400, "")), "Login failed. Please try again");
        assert_eq!(guest_login_error_message(&status(401, "")), "Guest account not available");
        assert_eq!(guest_login_error_message(&ApiError::Timeout), "Failed to login as guest");
    }

    #[test]
    fn test_already_submitted_detection() {
        assert!(status(400, "Quiz attempt already submitted").is_already_submitted());
        assert!(status(409, "Attempt ALREADY SUBMITTED").is_already_submitted());
        assert!(!status(400, "Invalid answer").is_already_submitted());
        assert!(!ApiError::Timeout.is_already_submitted());
    }

    #[test]
    fn test_not_found() {
        assert!(status(404, "").is_not_found());
        assert!(!ApiError::SessionExpired.is_not_found());
    }
}
