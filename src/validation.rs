//! Sign-up field validation
//!
//! Pure predicates shared by the Admin, Driver and Passenger sign-up forms.
//! Each returns a [`Validation`] so callers can show the reason next to the
//! offending field without any UI framework involved.

use crate::error::{NotifierError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Outcome of validating one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum Validation {
    Valid,
    Invalid(String),
}

impl Validation {
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(reason) => Some(reason),
        }
    }

    fn invalid(reason: &str) -> Self {
        Self::Invalid(reason.to_string())
    }
}

/// Sign-up form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Password,
    Nid,
    Phone,
}

impl Field {
    /// Run the validator for this field
    pub fn validate(self, value: &str) -> Validation {
        match self {
            Self::Name => validate_name(value),
            Self::Email => validate_email(value),
            Self::Password => validate_password(value),
            Self::Nid => validate_nid(value),
            Self::Phone => validate_phone(value),
        }
    }
}

impl FromStr for Field {
    type Err = NotifierError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "password" => Ok(Self::Password),
            "nid" => Ok(Self::Nid),
            "phone" => Ok(Self::Phone),
            _ => Err(NotifierError::InvalidInput(format!(
                "Unknown field: {s}. Must be one of: name, email, password, nid, phone"
            ))),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::Nid => "nid",
            Self::Phone => "phone",
        };
        f.write_str(name)
    }
}

static DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("domain pattern is valid")
});

static MOBILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^01[3-9][0-9]{8}$").expect("mobile pattern is valid"));

/// Full name: 2 to 50 characters of letters, spaces, `.`, `-` or `'`
pub fn validate_name(name: &str) -> Validation {
    let name = name.trim();
    if name.is_empty() {
        return Validation::invalid("Name is required");
    }

    let length = name.chars().count();
    if length < 2 {
        return Validation::invalid("Name must be at least 2 characters");
    }
    if length > 50 {
        return Validation::invalid("Name cannot exceed 50 characters");
    }
    if !name
        .chars()
        .all(|c| c.is_alphabetic() || matches!(c, ' ' | '.' | '-' | '\''))
    {
        return Validation::invalid("Name can only contain letters, spaces, '.', '-' and '''");
    }
    if !name.chars().any(char::is_alphabetic) {
        return Validation::invalid("Name must contain a letter");
    }

    Validation::Valid
}

pub fn validate_email(email: &str) -> Validation {
    if email.is_empty() {
        return Validation::invalid("Email is required");
    }
    if email.chars().any(char::is_whitespace) {
        return Validation::invalid("Email cannot contain spaces");
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Validation::invalid("Email must contain '@'");
    };
    if domain.contains('@') {
        return Validation::invalid("Email must contain a single '@'");
    }
    if local.is_empty() {
        return Validation::invalid("Email is missing the part before '@'");
    }
    if !DOMAIN.is_match(domain) {
        return Validation::invalid("Email domain is not valid");
    }

    Validation::Valid
}

/// Password: at least 8 characters mixing upper, lower, digit and symbol
pub fn validate_password(password: &str) -> Validation {
    if password.chars().count() < 8 {
        return Validation::invalid("Password must be at least 8 characters");
    }
    if !password.chars().any(char::is_uppercase) {
        return Validation::invalid("Password must contain an uppercase letter");
    }
    if !password.chars().any(char::is_lowercase) {
        return Validation::invalid("Password must contain a lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Validation::invalid("Password must contain a digit");
    }
    if password.chars().all(char::is_alphanumeric) {
        return Validation::invalid("Password must contain a special character");
    }

    Validation::Valid
}

/// National id: 10, 13 or 17 digits
pub fn validate_nid(nid: &str) -> Validation {
    let nid = nid.trim();
    if nid.is_empty() {
        return Validation::invalid("NID is required");
    }
    if !nid.chars().all(|c| c.is_ascii_digit()) {
        return Validation::invalid("NID must contain digits only");
    }
    if !matches!(nid.len(), 10 | 13 | 17) {
        return Validation::invalid("NID must be 10, 13 or 17 digits");
    }

    Validation::Valid
}

/// Mobile number `01[3-9]XXXXXXXX`, optionally written with `+880`/`880`
pub fn validate_phone(phone: &str) -> Validation {
    let phone = phone.trim();
    if phone.is_empty() {
        return Validation::invalid("Phone number is required");
    }

    let local = phone
        .strip_prefix("+880")
        .or_else(|| phone.strip_prefix("880"))
        .map_or_else(|| phone.to_string(), |rest| format!("0{rest}"));

    if !local.chars().all(|c| c.is_ascii_digit()) {
        return Validation::invalid("Phone number must contain digits only");
    }
    if !MOBILE.is_match(&local) {
        return Validation::invalid("Phone number must look like 01XXXXXXXXX");
    }

    Validation::Valid
}

/// Values entered on a sign-up form
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub nid: String,
    pub phone: String,
}

/// Validate every field, returning the failures in form order
pub fn validate_signup(form: &SignupForm) -> Vec<(Field, String)> {
    [
        (Field::Name, form.name.as_str()),
        (Field::Email, form.email.as_str()),
        (Field::Password, form.password.as_str()),
        (Field::Nid, form.nid.as_str()),
        (Field::Phone, form.phone.as_str()),
    ]
    .into_iter()
    .filter_map(|(field, value)| match field.validate(value) {
        Validation::Valid => None,
        Validation::Invalid(reason) => Some((field, reason)),
    })
    .collect()
}
