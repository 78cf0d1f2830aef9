//! Key/value persistence for small JSON documents
//!
//! Backed by `window.localStorage` in the browser. Native builds have no
//! backing store: reads miss and writes are dropped.

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Read and decode the document stored under `key`.
///
/// A document that no longer decodes is logged and treated as missing.
#[cfg(target_arch = "wasm32")]
pub fn load<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = local_storage()?.get_item(key).ok().flatten()?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Discarding unreadable {:?}: {}", key, e);
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn save<T: Serialize>(key: &str, value: &T) -> bool {
    let Some(storage) = local_storage() else {
        return false;
    };
    match serde_json::to_string(value) {
        Ok(json) => storage.set_item(key, &json).is_ok(),
        Err(e) => {
            log::warn!("Could not encode {:?}: {}", key, e);
            false
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load<T: DeserializeOwned>(_key: &str) -> Option<T> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save<T: Serialize>(_key: &str, _value: &T) -> bool {
    false
}
