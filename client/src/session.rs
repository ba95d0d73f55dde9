//! Read-only access to the logged-in user.
//!
//! The login page writes a JSON `{type, email}` record under the `user` key
//! of the browser's local storage, and the API token under `jwt`. Components
//! receive the session at construction instead of reaching for the global.

use shared::SessionUser;

use crate::error::SessionError;

pub const USER_KEY: &str = "user";
pub const JWT_KEY: &str = "jwt";

/// Minimal view of a string key-value store such as `localStorage`
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
}

pub trait SessionContext {
    fn current_user(&self) -> Result<SessionUser, SessionError>;

    /// Bearer token for the bills API, when the user has one
    fn token(&self) -> Option<String>;
}

/// Session backed by a key-value store
#[derive(Debug, Clone)]
pub struct StoredSession<K> {
    storage: K,
}

impl<K: KeyValueStore> StoredSession<K> {
    pub fn new(storage: K) -> Self {
        Self { storage }
    }
}

impl<K: KeyValueStore> SessionContext for StoredSession<K> {
    fn current_user(&self) -> Result<SessionUser, SessionError> {
        let raw = self.storage.get_item(USER_KEY).ok_or(SessionError::Missing)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn token(&self) -> Option<String> {
        self.storage.get_item(JWT_KEY).filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MemoryStorage;

    #[test]
    fn test_reads_user_record() {
        let storage = MemoryStorage::default();
        storage.set_item(USER_KEY, r#"{"type":"Employee","email":"e@e"}"#);
        let session = StoredSession::new(storage);

        let user = session.current_user().unwrap();
        assert!(user.is_employee());
        assert_eq!(user.email, "e@e");
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_missing_and_malformed_user() {
        let storage = MemoryStorage::default();
        let session = StoredSession::new(storage.clone());
        assert_eq!(session.current_user(), Err(SessionError::Missing));

        storage.set_item(USER_KEY, "not json");
        assert!(matches!(session.current_user(), Err(SessionError::Malformed(_))));
    }

    #[test]
    fn test_token() {
        let storage = MemoryStorage::default();
        let session = StoredSession::new(storage.clone());

        storage.set_item(JWT_KEY, "");
        assert_eq!(session.token(), None);

        storage.set_item(JWT_KEY, "abc.def");
        assert_eq!(session.token().as_deref(), Some("abc.def"));
    }
}
