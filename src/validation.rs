//! Request payload validation

use std::fmt;
use url::Url;

pub const EMAIL_MIN_LEN: usize = 5;
pub const EMAIL_MAX_LEN: usize = 254;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 100;
pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 50;
pub const CURRENCY_LEN: usize = 3;
pub const BOOKING_STATUSES: &[&str] = &["pending", "confirmed", "cancelled", "completed"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<(), ValidationError>;

pub fn validate_required(field: &'static str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }

    Ok(())
}

pub fn validate_max_len(field: &'static str, value: &str, max_len: usize) -> ValidationResult {
    if value.len() > max_len {
        return Err(ValidationError::new(
            field,
            format!("must be at most {} characters", max_len),
        ));
    }

    Ok(())
}

pub fn validate_enum(field: &'static str, value: &str, allowed: &[&str]) -> ValidationResult {
    if allowed.iter().all(|candidate| value != *candidate) {
        return Err(ValidationError::new(
            field,
            format!("must be one of: {}", allowed.join(", ")),
        ));
    }

    Ok(())
}

pub fn validate_email(email: &str) -> ValidationResult {
    let email = email.trim();
    validate_required("email", email)?;

    if email.len() < EMAIL_MIN_LEN {
        return Err(ValidationError::new(
            "email",
            format!("must be at least {} characters", EMAIL_MIN_LEN),
        ));
    }

    validate_max_len("email", email, EMAIL_MAX_LEN)?;

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(ValidationError::new("email", "must be a valid email address")),
    }
}

/// Minimum bar for a login attempt; full strength rules only apply when a
/// password is being set.
pub fn validate_login_password(password: &str) -> ValidationResult {
    validate_required("password", password)?;

    if password.len() < PASSWORD_MIN_LEN {
        return Err(ValidationError::new(
            "password",
            format!("must be at least {} characters", PASSWORD_MIN_LEN),
        ));
    }

    Ok(())
}

pub fn validate_password_strength(password: &str) -> ValidationResult {
    validate_login_password(password)?;
    validate_max_len("password", password, PASSWORD_MAX_LEN)?;

    if password.chars().any(char::is_whitespace) {
        return Err(ValidationError::new("password", "must not contain spaces"));
    }

    if !password.chars().any(|ch| ch.is_ascii_uppercase()) {
        return Err(ValidationError::new(
            "password",
            "must contain an uppercase letter",
        ));
    }

    if !password.chars().any(|ch| ch.is_ascii_lowercase()) {
        return Err(ValidationError::new(
            "password",
            "must contain a lowercase letter",
        ));
    }

    if !password.chars().any(|ch| ch.is_ascii_digit()) {
        return Err(ValidationError::new("password", "must contain a digit"));
    }

    if password.chars().all(char::is_alphanumeric) {
        return Err(ValidationError::new(
            "password",
            "must contain a special character",
        ));
    }

    Ok(())
}

pub fn validate_passwords_match(password: &str, confirm: &str) -> ValidationResult {
    if password != confirm {
        return Err(ValidationError::new("confirmPassword", "must match password"));
    }

    Ok(())
}

pub fn validate_reset_token(token: &str) -> ValidationResult {
    validate_required("token", token)
}

pub fn validate_name(name: &str) -> ValidationResult {
    let name = name.trim();
    validate_required("name", name)?;

    if name.chars().count() < NAME_MIN_LEN {
        return Err(ValidationError::new(
            "name",
            format!("must be at least {} characters", NAME_MIN_LEN),
        ));
    }

    validate_max_len("name", name, NAME_MAX_LEN)?;

    Ok(())
}

pub fn validate_calendar_date(value: &str) -> ValidationResult {
    validate_required("calendarDate", value)?;

    if chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err(ValidationError::new(
            "calendarDate",
            "must be a date in YYYY-MM-DD form",
        ));
    }

    Ok(())
}

pub fn validate_file_url(value: &str) -> ValidationResult {
    validate_required("fileurl", value)?;

    let url =
        Url::parse(value).map_err(|_| ValidationError::new("fileurl", "must be a valid URL"))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ValidationError::new("fileurl", "must use http or https"));
    }

    Ok(())
}

pub fn validate_order_id(order_id: &str) -> ValidationResult {
    validate_required("orderId", order_id)
}

pub fn validate_amount(amount: f64) -> ValidationResult {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::new("amount", "must be a positive number"));
    }

    Ok(())
}

pub fn validate_currency(currency: &str) -> ValidationResult {
    if currency.len() != CURRENCY_LEN || !currency.chars().all(|ch| ch.is_ascii_uppercase()) {
        return Err(ValidationError::new(
            "currency",
            "must be a 3-letter uppercase code",
        ));
    }

    Ok(())
}

pub fn validate_booking_status(status: &str) -> ValidationResult {
    validate_enum("status", status, BOOKING_STATUSES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_required_field() {
        assert!(validate_required("field", "value").is_ok());
        assert!(validate_required("field", "   ").is_err());
    }

    #[test]
    fn validates_max_len() {
        assert!(validate_max_len("field", "abc", 3).is_ok());
        assert!(validate_max_len("field", "abcd", 3).is_err());
    }

    #[test]
    fn validates_enum_values() {
        assert!(validate_enum("status", "pending", &["pending", "completed"]).is_ok());
        assert!(validate_enum("status", "unknown", &["pending", "completed"]).is_err());
    }

    #[test]
    fn validates_email() {
        assert!(validate_email("user@test.com").is_ok());
        assert!(validate_email("  user@test.com  ").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("@test.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("a@b@c.com").is_err());
        assert!(validate_email(&format!("{}@test.com", "a".repeat(250))).is_err());
    }

    #[test]
    fn validates_login_password() {
        assert!(validate_login_password("Admin@123").is_ok());
        assert!(validate_login_password("short").is_err());
        assert!(validate_login_password("").is_err());
    }

    #[test]
    fn validates_password_strength() {
        assert!(validate_password_strength("Admin@123").is_ok());
        assert!(validate_password_strength("alllowercase1!").is_err());
        assert!(validate_password_strength("ALLUPPERCASE1!").is_err());
        assert!(validate_password_strength("NoDigits!!").is_err());
        assert!(validate_password_strength("NoSpecial123").is_err());
        assert!(validate_password_strength("Has Space1!").is_err());
        assert!(validate_password_strength(&format!("Aa1!{}", "x".repeat(100))).is_err());
    }

    #[test]
    fn validates_passwords_match() {
        assert!(validate_passwords_match("Admin@123", "Admin@123").is_ok());
        assert!(validate_passwords_match("Admin@123", "Admin@124").is_err());
    }

    #[test]
    fn validates_name() {
        assert!(validate_name("Jo").is_ok());
        assert!(validate_name("J").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(51)).is_err());
    }

    #[test]
    fn validates_calendar_date() {
        assert!(validate_calendar_date("2025-03-14").is_ok());
        assert!(validate_calendar_date("2025-13-01").is_err());
        assert!(validate_calendar_date("14-03-2025").is_err());
        assert!(validate_calendar_date("tomorrow").is_err());
    }

    #[test]
    fn validates_file_url() {
        assert!(validate_file_url("https://files.test/doc.pdf").is_ok());
        assert!(validate_file_url("http://files.test/doc.pdf").is_ok());
        assert!(validate_file_url("ftp://files.test/doc.pdf").is_err());
        assert!(validate_file_url("not a url").is_err());
    }

    #[test]
    fn validates_amount() {
        assert!(validate_amount(199.99).is_ok());
        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(-5.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn validates_currency() {
        assert!(validate_currency("INR").is_ok());
        assert!(validate_currency("USD").is_ok());
        assert!(validate_currency("inr").is_err());
        assert!(validate_currency("RUPEES").is_err());
        assert!(validate_currency("").is_err());
    }

    #[test]
    fn validates_booking_status() {
        for status in BOOKING_STATUSES {
            assert!(validate_booking_status(status).is_ok());
        }
        assert!(validate_booking_status("archived").is_err());
        assert!(validate_booking_status("Pending").is_err());
    }
}
