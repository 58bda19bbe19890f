use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ApiError;
use crate::models::{BookClassRequest, ChangeTimezoneRequest};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+").expect("regex compiles"));

/// A booking request whose fields are all present and well formed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidBooking {
    pub class_id: String,
    pub client_name: String,
    pub client_email: String,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn require(field: &str, value: Option<String>) -> Result<String, ApiError> {
    value.ok_or_else(|| ApiError::BadRequest(format!("Missing required field: {field}")))
}

pub fn validate_booking(request: BookClassRequest) -> Result<ValidBooking, ApiError> {
    let class_id = require("class_id", request.class_id)?;
    let client_name = require("client_name", request.client_name)?;
    let client_email = require("client_email", request.client_email)?;

    if !is_valid_email(&client_email) {
        return Err(ApiError::BadRequest("Invalid client_email format.".into()));
    }
    if client_name.trim().is_empty() {
        return Err(ApiError::BadRequest("Client name cannot be empty.".into()));
    }

    Ok(ValidBooking {
        class_id,
        client_name,
        client_email,
    })
}

pub fn validate_timezone_change(request: ChangeTimezoneRequest) -> Result<String, ApiError> {
    require("new_timezone", request.new_timezone)
}

/// Validates the `email` query parameter of a bookings lookup. Empty counts as missing.
pub fn validate_email_query(email: Option<&str>) -> Result<&str, ApiError> {
    match email {
        None | Some("") => Err(ApiError::BadRequest(
            "Missing 'email' query parameter.".into(),
        )),
        Some(email) if !is_valid_email(email) => Err(ApiError::BadRequest(
            "Invalid email format for query parameter.".into(),
        )),
        Some(email) => Ok(email),
    }
}
