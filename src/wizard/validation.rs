//! Validation utilities for wizard fields
//!
//! Each check returns the user-facing message on failure. Shape checks only
//! run on non-empty values; emptiness is the job of the required check.

use crate::wizard::fields::FieldKind;
use chrono::NaiveTime;
use regex::Regex;
use reqwest::Url;
use std::sync::OnceLock;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const MIN_PASSWORD_LEN: usize = 8;

fn compiled(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

fn email_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&PATTERN, r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
}

fn phone_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&PATTERN, r"^\+?[1-9]\d{0,15}$")
}

fn phone_separators() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&PATTERN, r"[\s\-()]")
}

/// Validate that a value is present
pub fn validate_required(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(REQUIRED_MESSAGE.to_string())
    } else {
        Ok(())
    }
}

/// Validate an email address (`local@domain.tld`)
pub fn validate_email(email: &str) -> Result<(), String> {
    if email_pattern().is_some_and(|re| re.is_match(email)) {
        Ok(())
    } else {
        Err("Please enter a valid email address".to_string())
    }
}

/// Validate a phone number after stripping spaces, dashes and parentheses
pub fn validate_phone(phone: &str) -> Result<(), String> {
    let compact = match phone_separators() {
        Some(re) => re.replace_all(phone, "").into_owned(),
        None => phone.to_string(),
    };
    if phone_pattern().is_some_and(|re| re.is_match(&compact)) {
        Ok(())
    } else {
        Err("Please enter a valid phone number".to_string())
    }
}

/// Validate an absolute URL
pub fn validate_url(url: &str) -> Result<(), String> {
    match Url::parse(url) {
        Ok(_) => Ok(()),
        Err(_) => Err("Please enter a valid URL".to_string()),
    }
}

/// Validate password length
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err("Password must be at least 8 characters long".to_string())
    }
}

/// Validate a 24-hour `HH:MM` time
pub fn validate_time(time: &str) -> Result<(), String> {
    match NaiveTime::parse_from_str(time, "%H:%M") {
        Ok(_) => Ok(()),
        Err(_) => Err("Please enter a time as HH:MM".to_string()),
    }
}

/// Validate that a value is one of the offered options
pub fn validate_choice(value: &str, options: &[&str]) -> Result<(), String> {
    if options.contains(&value) {
        Ok(())
    } else {
        Err("Please select one of the listed options".to_string())
    }
}

/// Run the required check and the shape check for a field kind
pub fn validate_value(kind: FieldKind, required: bool, raw: &str) -> Result<(), String> {
    let value = raw.trim();

    if required && value.is_empty() {
        return Err(REQUIRED_MESSAGE.to_string());
    }

    if value.is_empty() {
        return Ok(());
    }

    match kind {
        FieldKind::Text | FieldKind::Toggle => Ok(()),
        FieldKind::Email => validate_email(value),
        FieldKind::Tel => validate_phone(value),
        FieldKind::Url => validate_url(value),
        FieldKind::Password => validate_password(value),
        FieldKind::Time => validate_time(value),
        FieldKind::Choice(options) => validate_choice(value, options),
    }
}
