//! Input validation for user registration

use regex::Regex;
use std::sync::OnceLock;

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password of a registered user
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !has_letter || !has_digit {
        return Err("Password must contain letters and digits".to_string());
    }

    Ok(())
}

/// Validate a payments provider customer URI such as `/v1/customers/CU123`
pub fn validate_customer_uri(uri: &str) -> Result<(), String> {
    static CUSTOMER_URI_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = CUSTOMER_URI_REGEX.get_or_init(|| {
        Regex::new(r"^/v1/(marketplaces/[A-Za-z0-9]+/)?customers/[A-Za-z0-9]+$")
            .expect("Failed to compile customer URI regex")
    });

    if !regex.is_match(uri) {
        return Err("Invalid customer URI".to_string());
    }

    Ok(())
}
