//! Input validation for form submissions.
//!
//! Validators return `Err(message)` for a single field. To report several
//! fields at once as an ApiError, collect them with `ValidationErrorBuilder`
//! from the `error` module.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::db::roles;

lazy_static! {
    /// Loose email shape check: something@something.tld
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[^@\s]+@[^@\s]+\.[^@\s]+$"
    ).unwrap();
}

/// Date format accepted for sessions
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Return the trimmed value of a form field, treating blank as missing
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Validate a required free-text field (team names, venue, sport name)
pub fn validate_text(value: &Option<String>, field: &str) -> Result<String, String> {
    let value = present(value).ok_or_else(|| format!("{} is required", field))?;

    if value.len() > 100 {
        return Err(format!("{} is too long (max 100 characters)", field));
    }

    Ok(value.to_string())
}

/// Validate a required numeric identifier
pub fn validate_id(value: &Option<String>, field: &str) -> Result<i64, String> {
    let value = present(value).ok_or_else(|| format!("{} is required", field))?;
    parse_id(value, field)
}

/// Parse a positive numeric identifier, such as a path segment
pub fn parse_id(value: &str, field: &str) -> Result<i64, String> {
    match value.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(format!("Invalid {} format", field)),
    }
}

/// Validate a required calendar date, normalized to YYYY-MM-DD
pub fn validate_date(value: &Option<String>) -> Result<String, String> {
    let value = present(value).ok_or_else(|| "date is required".to_string())?;

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .map_err(|_| "date must be in YYYY-MM-DD format".to_string())
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email is too long (max 254 characters)".to_string());
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err("Invalid email address".to_string());
    }

    Ok(())
}

/// Validate a role value
pub fn validate_role(role: &str) -> Result<(), String> {
    if !roles::ALL.contains(&role) {
        return Err(format!("Invalid role. Must be one of: {}", roles::ALL.join(", ")));
    }
    Ok(())
}
