use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Error during file I/O operations
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Error during JSON serialization or deserialization
    #[error("json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    /// Error while parsing the config file
    #[error("config error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Error when user input fails.
    #[error("inquire error: {0}")]
    Inquire(#[from] inquire::InquireError),
    /// Error while building the HTTP client
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// Error during input validation.
    #[error("validation error: {0}")]
    Validation(String),
    /// Login is already in the favorites.
    #[error("user already in favorites: '{0}'")]
    AlreadyExists(String),
    /// Lookup returned no profile for the username.
    #[error("github user not found: '{0}'")]
    NotFound(String),
}
