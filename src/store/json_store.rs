use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::store::schema::{FeedbackData, FeedbackEntry, Identity, UsersData};

const IDENTITY_FILE: &str = "current_user.json";
const USERS_FILE: &str = "users.json";
const FEEDBACK_FILE: &str = "feedback.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("stored data is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self, StoreError> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quizbox");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Missing file yields the default; a malformed file is an error so the
    /// caller never silently overwrites user data it could not read.
    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T, StoreError> {
        let path = self.file_path(name);
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<(), StoreError> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// `Ok(None)` when nobody is logged in; `Err` when the stored record
    /// exists but cannot be parsed.
    pub fn load_identity(&self) -> Result<Option<Identity>, StoreError> {
        let path = self.file_path(IDENTITY_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn save_identity(&self, identity: &Identity) -> Result<(), StoreError> {
        self.save(IDENTITY_FILE, identity)
    }

    pub fn clear_identity(&self) -> Result<(), StoreError> {
        match fs::remove_file(self.file_path(IDENTITY_FILE)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn load_users(&self) -> Result<UsersData, StoreError> {
        self.load(USERS_FILE)
    }

    pub fn save_users(&self, data: &UsersData) -> Result<(), StoreError> {
        self.save(USERS_FILE, data)
    }

    pub fn append_feedback(&self, entry: FeedbackEntry) -> Result<(), StoreError> {
        let mut data: FeedbackData = self.load(FEEDBACK_FILE)?;
        data.entries.push(entry);
        self.save(FEEDBACK_FILE, &data)
    }

    pub fn load_feedback(&self) -> Result<FeedbackData, StoreError> {
        self.load(FEEDBACK_FILE)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tempfile::TempDir;

    use super::*;
    use crate::store::schema::UserRecord;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    fn guest_identity() -> Identity {
        Identity {
            id: "guest-001".to_string(),
            full_name: "Guest User".to_string(),
            email: "guest@example.com".to_string(),
            phone_number: "0987654321".to_string(),
            country_code: "+91".to_string(),
            status: "active".to_string(),
            login_time: Utc::now(),
            is_logged_in: true,
        }
    }

    #[test]
    fn test_identity_save_load_clear() {
        let (_dir, store) = make_test_store();
        assert_eq!(store.load_identity().unwrap(), None);

        let identity = guest_identity();
        store.save_identity(&identity).unwrap();
        assert_eq!(store.load_identity().unwrap(), Some(identity));

        store.clear_identity().unwrap();
        assert_eq!(store.load_identity().unwrap(), None);
        // clearing twice is fine
        store.clear_identity().unwrap();
    }

    #[test]
    fn test_malformed_identity_is_error() {
        let (_dir, store) = make_test_store();
        fs::write(store.file_path(IDENTITY_FILE), "{not json").unwrap();
        assert!(matches!(store.load_identity(), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_users_round_trip() {
        let (_dir, store) = make_test_store();
        assert!(store.load_users().unwrap().users.is_empty());

        let mut data = UsersData::default();
        data.users.push(UserRecord {
            id: "u-1".to_string(),
            full_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "1234567890".to_string(),
            country_code: "+44".to_string(),
            status: "student".to_string(),
            password: "secret1".to_string(),
        });
        store.save_users(&data).unwrap();

        let loaded = store.load_users().unwrap();
        assert_eq!(loaded.users, data.users);
    }

    #[test]
    fn test_save_leaves_no_tmp_files() {
        let (dir, store) = make_test_store();
        store.save_users(&UsersData::default()).unwrap();
        let tmp_files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(tmp_files.is_empty(), "no residual .tmp files");
    }

    #[test]
    fn test_feedback_appends() {
        let (_dir, store) = make_test_store();
        for rating in [3, 5] {
            store
                .append_feedback(FeedbackEntry {
                    user_id: "guest-001".to_string(),
                    rating,
                    comment: String::new(),
                    score: 4,
                    total: 10,
                    submitted_at: Utc::now(),
                })
                .unwrap();
        }
        let data = store.load_feedback().unwrap();
        assert_eq!(data.entries.len(), 2);
        assert_eq!(data.entries[1].rating, 5);
    }
}
