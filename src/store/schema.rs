use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// The logged-in user, as stored in `current_user.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub country_code: String,
    pub status: String,
    pub login_time: DateTime<Utc>,
    pub is_logged_in: bool,
}

impl Identity {
    /// First letter of the name, used as the avatar in headers.
    pub fn initial(&self) -> char {
        self.full_name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('U')
    }

    pub fn contact_line(&self) -> String {
        format!("{} {}", self.country_code, self.phone_number)
    }
}

/// An entry in the local user list created by registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub country_code: String,
    pub status: String,
    pub password: String,
}

impl UserRecord {
    pub fn to_identity(&self, login_time: DateTime<Utc>) -> Identity {
        Identity {
            id: self.id.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            country_code: self.country_code.clone(),
            status: self.status.clone(),
            login_time,
            is_logged_in: true,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UsersData {
    pub schema_version: u32,
    pub users: Vec<UserRecord>,
}

impl Default for UsersData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            users: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub user_id: String,
    pub rating: u8,
    pub comment: String,
    pub score: usize,
    pub total: usize,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeedbackData {
    pub schema_version: u32,
    pub entries: Vec<FeedbackEntry>,
}

impl Default for FeedbackData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            entries: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str) -> Identity {
        Identity {
            id: "u1".to_string(),
            full_name: name.to_string(),
            email: "a@b.co".to_string(),
            phone_number: "0123456789".to_string(),
            country_code: "+44".to_string(),
            status: "student".to_string(),
            login_time: Utc::now(),
            is_logged_in: true,
        }
    }

    #[test]
    fn test_initial_uppercases_first_letter() {
        assert_eq!(identity("ada lovelace").initial(), 'A');
        assert_eq!(identity("").initial(), 'U');
    }

    #[test]
    fn test_identity_uses_camel_case_keys() {
        let json = serde_json::to_string(&identity("Ada")).unwrap();
        assert!(json.contains("\"fullName\""));
        assert!(json.contains("\"isLoggedIn\""));
        assert_eq!(identity("Ada").contact_line(), "+44 0123456789");
    }
}
