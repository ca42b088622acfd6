use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

pub const COUNTRY_CODES: &[&str] = &["+91", "+1", "+44"];
pub const USER_STATUSES: &[&str] = &["student", "employee"];

const MIN_PASSWORD_LEN: usize = 6;
const MIN_NAME_LEN: usize = 2;

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub fn country_label(code: &str) -> &'static str {
    match code {
        "+91" => "India",
        "+1" => "United States",
        "+44" => "United Kingdom",
        _ => "Unknown",
    }
}

/// Per-field validation messages keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: &'static str, message: &str) {
        self.0.insert(field, message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginInput {
    pub country_code: String,
    pub phone_number: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub country_code: String,
    pub phone_number: String,
    pub status: String,
    pub password: String,
}

fn check_phone(errors: &mut FieldErrors, phone: &str) {
    if phone.is_empty() {
        errors.insert("phone_number", "Phone number is required");
    } else if !PHONE_RE.is_match(phone) {
        errors.insert("phone_number", "Phone number must be 10 digits");
    }
}

fn check_password(errors: &mut FieldErrors, password: &str) {
    if password.is_empty() {
        errors.insert("password", "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert("password", "Password must be at least 6 characters");
    }
}

fn check_country(errors: &mut FieldErrors, code: &str) {
    if code.is_empty() {
        errors.insert("country_code", "Country code is required");
    }
}

pub fn validate_login(input: &LoginInput) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    check_phone(&mut errors, &input.phone_number);
    check_country(&mut errors, &input.country_code);
    check_password(&mut errors, &input.password);
    errors.into_result()
}

pub fn validate_registration(reg: &Registration) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = reg.full_name.trim();
    if name.is_empty() {
        errors.insert("full_name", "Full Name is required");
    } else if name.chars().count() < MIN_NAME_LEN {
        errors.insert("full_name", "Name must be at least 2 characters");
    }

    let email = reg.email.trim();
    if email.is_empty() {
        errors.insert("email", "Email is required");
    } else if !EMAIL_RE.is_match(email) {
        errors.insert("email", "Invalid email address");
    }

    check_phone(&mut errors, &reg.phone_number);
    check_country(&mut errors, &reg.country_code);

    if reg.status.is_empty() {
        errors.insert("status", "Status is required");
    } else if !USER_STATUSES.contains(&reg.status.as_str()) {
        errors.insert("status", "Invalid status");
    }

    check_password(&mut errors, &reg.password);
    errors.into_result()
}
