//! Input validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Regex for validating usernames
static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+$").unwrap());

/// Validate a username
pub fn validate_username(name: &str) -> bool {
    !name.is_empty() && name.len() <= 255 && USERNAME_REGEX.is_match(name)
}

/// Validate an SSO correlation id
pub fn validate_request_id(request_id: &str) -> bool {
    !request_id.is_empty() && request_id.len() <= 255 && !request_id.contains(char::is_whitespace)
}
