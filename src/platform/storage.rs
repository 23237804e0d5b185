//! LocalStorage access

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Read a stored string
pub fn get(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

/// Store a string; failures (quota, private mode) are logged and dropped
pub fn set(key: &str, value: &str) {
    match local_storage() {
        Some(storage) => {
            if let Err(e) = storage.set_item(key, value) {
                log::warn!("Could not store '{}': {:?}", key, e);
            }
        }
        None => log::warn!("LocalStorage unavailable, '{}' not stored", key),
    }
}
