use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\s-]+$").expect("valid phone pattern"));

/// Field-level format checks shared by the row validator.
pub struct Validator;

impl Validator {
    /// `local@domain.tld` shape, no whitespace anywhere.
    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_RE.is_match(email)
    }

    /// Digits, spaces and hyphens only.
    pub fn is_valid_phone(phone: &str) -> bool {
        PHONE_RE.is_match(phone)
    }

    pub fn is_blank(value: &str) -> bool {
        value.trim().is_empty()
    }
}
