//! Browser `localStorage` backend (hydrate-only).
//!
//! SYSTEM CONTEXT
//! ==============
//! The storage handle is looked up from `window` on every call instead of
//! being cached, which keeps the type `Send + Sync` and lets a disabled or
//! revoked storage surface as an error on the call that hits it.

use super::{KeyValueStore, StoreError};

/// `KeyValueStore` over the origin's `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

fn local_storage() -> Result<web_sys::Storage, StoreError> {
    let window = web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".to_owned()))?;
    window
        .local_storage()
        .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
        .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_owned()))
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        local_storage()?
            .get_item(key)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|_| StoreError::QuotaExceeded { key: key.to_owned() })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        local_storage()?
            .remove_item(key)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }
}
