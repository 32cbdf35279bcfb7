use std::sync::OnceLock;

use regex::Regex;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Unanchored: any `x@y.z` run inside the value is accepted.
        Regex::new(r"\S+@\S+\.\S+")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new("^[0-9]{10}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

pub(super) fn is_email_shaped(value: &str) -> bool {
    email_regex().is_match(value)
}

pub(super) fn is_ten_digit_phone(value: &str) -> bool {
    phone_regex().is_match(value)
}

pub(super) fn is_positive_number(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|number| number.is_finite() && number > 0.0)
        .unwrap_or(false)
}
