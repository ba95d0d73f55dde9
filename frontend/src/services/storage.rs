use billed_client::KeyValueStore;
use gloo::storage::{LocalStorage, Storage};

/// The browser's `localStorage`, read as raw strings
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }
}
