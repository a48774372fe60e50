use colored::Colorize;
use inquire::Text;
use validator::ValidateUrl;

use crate::{config::Config, error::AppError};

/// Maximum length GitHub allows for a username
const MAX_USERNAME_LENGTH: usize = 39;

/// Prompts user for input until valid input is provided
pub fn prompt_until_valid<F>(prompt_message: &str, input_validation: F) -> Result<String, AppError>
where
    F: Fn(&str) -> Result<(), AppError>,
{
    loop {
        let input: String = Text::new(prompt_message).prompt()?;
        let input: String = input.trim().to_string();
        match input_validation(&input) {
            Ok(_) => break Ok(input),
            Err(AppError::Validation(msg)) => println!("{}", msg.red()),
            Err(e) => return Err(e),
        }
    }
}

/// Validates a GitHub username before it is looked up
///
/// Only checks that the name is safe in a `/users/{username}` path. Hyphen
/// placement is not checked, since some older accounts have leading,
/// trailing or doubled hyphens.
pub fn validate_input_username(name: &str) -> Result<(), AppError> {
    if name.is_empty() {
        Err(AppError::Validation("Username cannot be empty".to_string()))
    } else if name.len() > MAX_USERNAME_LENGTH {
        Err(AppError::Validation(format!("username too long, max {} characters", MAX_USERNAME_LENGTH)))
    } else if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        Err(AppError::Validation("Username may only contain letters, digits and hyphens".to_string()))
    } else {
        Ok(())
    }
}

/// Validates loaded configuration values
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    if !config.api_base_url.as_str().validate_url() {
        Err(AppError::Validation(format!("invalid api_base_url: '{}'", config.api_base_url)))
    } else if config.timeout_secs == 0 {
        Err(AppError::Validation("timeout_secs must be greater than 0".to_string()))
    } else if config.user_agent.trim().is_empty() {
        Err(AppError::Validation("user_agent cannot be empty".to_string()))
    } else {
        Ok(())
    }
}
