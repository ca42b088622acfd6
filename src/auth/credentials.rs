use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::validate::{LoginInput, Registration};
use crate::store::json_store::{JsonStore, StoreError};
use crate::store::schema::{Identity, UserRecord};

/// Built-in account that works without any registered users.
pub struct GuestAccount {
    pub id: &'static str,
    pub full_name: &'static str,
    pub email: &'static str,
    pub phone_number: &'static str,
    pub country_code: &'static str,
    pub password: &'static str,
    pub status: &'static str,
}

pub const GUEST: GuestAccount = GuestAccount {
    id: "guest-001",
    full_name: "Guest User",
    email: "guest@example.com",
    phone_number: "0987654321",
    country_code: "+91",
    password: "texol123",
    status: "active",
};

impl GuestAccount {
    fn matches(&self, input: &LoginInput) -> bool {
        input.phone_number == self.phone_number
            && input.password == self.password
            && input.country_code == self.country_code
    }

    fn identity(&self, login_time: DateTime<Utc>) -> Identity {
        Identity {
            id: self.id.to_string(),
            full_name: self.full_name.to_string(),
            email: self.email.to_string(),
            phone_number: self.phone_number.to_string(),
            country_code: self.country_code.to_string(),
            status: self.status.to_string(),
            login_time,
            is_logged_in: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User not found or incorrect password")]
    InvalidCredentials,

    #[error("This phone number is already registered")]
    DuplicateUser,

    #[error("Login failed. Please try again.")]
    Storage(#[from] StoreError),
}

/// Check credentials against the guest account, then the local user list.
pub fn login(store: Option<&JsonStore>, input: &LoginInput) -> Result<Identity, AuthError> {
    let now = Utc::now();
    if GUEST.matches(input) {
        return Ok(GUEST.identity(now));
    }

    let Some(store) = store else {
        return Err(AuthError::InvalidCredentials);
    };
    let users = store.load_users()?;
    users
        .users
        .iter()
        .find(|u| {
            u.country_code == input.country_code
                && u.phone_number == input.phone_number
                && u.password == input.password
        })
        .map(|u| u.to_identity(now))
        .ok_or(AuthError::InvalidCredentials)
}

/// Append a validated registration to the local user list.
pub fn register(store: &JsonStore, reg: &Registration) -> Result<UserRecord, AuthError> {
    let mut users = store.load_users()?;
    let taken = |code: &str, phone: &str| code == reg.country_code && phone == reg.phone_number;
    if taken(GUEST.country_code, GUEST.phone_number)
        || users
            .users
            .iter()
            .any(|u| taken(&u.country_code, &u.phone_number))
    {
        return Err(AuthError::DuplicateUser);
    }

    let record = UserRecord {
        id: Uuid::new_v4().simple().to_string()[..8].to_string(),
        full_name: reg.full_name.trim().to_string(),
        email: reg.email.trim().to_string(),
        phone_number: reg.phone_number.clone(),
        country_code: reg.country_code.clone(),
        status: reg.status.clone(),
        password: reg.password.clone(),
    };
    users.users.push(record.clone());
    store.save_users(&users)?;
    Ok(record)
}
