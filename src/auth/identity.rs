use crate::store::json_store::{JsonStore, StoreError};
use crate::store::schema::Identity;

/// Holds the logged-in identity for the views that need it, with explicit
/// load / save / clear calls against the store.
#[derive(Clone, Debug, Default)]
pub struct IdentityContext {
    current: Option<Identity>,
}

impl IdentityContext {
    pub fn new(current: Option<Identity>) -> Self {
        Self { current }
    }

    /// Read the stored identity. A malformed record is treated the same as a
    /// missing one.
    pub fn load(store: &JsonStore) -> Self {
        match store.load_identity() {
            Ok(current) => Self { current },
            Err(e) => {
                tracing::warn!("ignoring unreadable stored identity: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&mut self, store: Option<&JsonStore>, identity: Identity) -> Result<(), StoreError> {
        if let Some(store) = store {
            store.save_identity(&identity)?;
        }
        self.current = Some(identity);
        Ok(())
    }

    /// Forget the identity in memory first so a failed delete still logs the
    /// user out of this process.
    pub fn clear(&mut self, store: Option<&JsonStore>) -> Result<(), StoreError> {
        self.current = None;
        if let Some(store) = store {
            store.clear_identity()?;
        }
        Ok(())
    }

    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    /// The identity the auth gate admits, if any.
    pub fn admitted(&self) -> Option<&Identity> {
        self.current.as_ref().filter(|id| id.is_logged_in)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::Utc;
    use tempfile::TempDir;

    use super::*;

    fn identity(logged_in: bool) -> Identity {
        Identity {
            id: "u-9".to_string(),
            full_name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
            phone_number: "5555555555".to_string(),
            country_code: "+1".to_string(),
            status: "employee".to_string(),
            login_time: Utc::now(),
            is_logged_in: logged_in,
        }
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();

        let mut ctx = IdentityContext::load(&store);
        assert!(ctx.admitted().is_none());
        ctx.save(Some(&store), identity(true)).unwrap();

        let reloaded = IdentityContext::load(&store);
        assert_eq!(reloaded.admitted().map(|i| i.id.as_str()), Some("u-9"));
    }

    #[test]
    fn test_clear_removes_stored_identity() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut ctx = IdentityContext::default();
        ctx.save(Some(&store), identity(true)).unwrap();
        ctx.clear(Some(&store)).unwrap();
        assert!(ctx.current().is_none());
        assert!(IdentityContext::load(&store).current().is_none());
    }

    #[test]
    fn test_malformed_identity_treated_as_absent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("current_user.json"), "[]").unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert!(IdentityContext::load(&store).current().is_none());
    }

    #[test]
    fn test_logged_out_identity_not_admitted() {
        let ctx = IdentityContext::new(Some(identity(false)));
        assert!(ctx.current().is_some());
        assert!(ctx.admitted().is_none());
    }

    #[test]
    fn test_context_without_store() {
        let mut ctx = IdentityContext::default();
        ctx.save(None, identity(true)).unwrap();
        assert!(ctx.admitted().is_some());
        ctx.clear(None).unwrap();
        assert!(ctx.admitted().is_none());
    }
}
