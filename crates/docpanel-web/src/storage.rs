//! `window.localStorage` as a [`PreferenceStore`].

use docpanel_core::{PreferenceError, PreferenceStore};
use wasm_bindgen::JsValue;
use web_sys::Storage;

fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Origin-scoped browser storage. Reads and writes fail soft when the browser
/// denies storage access (private modes, disabled cookies).
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    #[must_use]
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        Self { storage }
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn storage(&self) -> Result<&Storage, PreferenceError> {
        self.storage
            .as_ref()
            .ok_or_else(|| PreferenceError::Unavailable("localStorage is not accessible".into()))
    }
}

impl PreferenceStore for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| PreferenceError::Unavailable(js_message(&err)))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| PreferenceError::WriteRejected {
                key: key.to_owned(),
                reason: js_message(&err),
            })
    }
}
