use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Not available: {0}")]
    Unavailable(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl AppError {
    /// Message shown to the person driving the console. Every variant ends the
    /// triggering action and nothing else.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(e) if e.is_timeout() => "The booking server did not answer in time".to_string(),
            AppError::Network(_) => "Could not reach the booking server".to_string(),
            AppError::Rejected { status: 409, message } => format!("Conflict: {}", message),
            AppError::Rejected { message, .. } => format!("Error: {}", message),
            AppError::NotFound(what) => format!("{} not found", what),
            AppError::Unavailable(reason) => format!("Not available: {}", reason),
            AppError::Validation(msg) => msg.clone(),
            AppError::Config(msg) => format!("Configuration error: {}", msg),
            AppError::Decode(_) => "The booking server sent an unexpected response".to_string(),
        }
    }
}
