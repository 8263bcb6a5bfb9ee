#![forbid(unsafe_code)]

//! Typed preference access over a string key/value store.
//!
//! Stores hold plain scalar strings. [`Preferences`] layers typed reads with a
//! default fallback on top: a missing key, an unreadable backend, or a value
//! that fails to decode all produce the caller's default, never an error.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, warn};

/// Failure reported by a preference backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferenceError {
    /// The backend could not be reached (e.g. storage disabled by the browser).
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),
    /// The backend refused the write (e.g. quota exceeded).
    #[error("preference write rejected for {key}: {reason}")]
    WriteRejected { key: String, reason: String },
}

/// Raw key/value persistence scoped to one origin.
pub trait PreferenceStore {
    /// Read the raw value for `key`, `Ok(None)` when unset.
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Durably write `value` under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        (**self).write(key, value)
    }
}

/// A scalar that can live in a [`PreferenceStore`].
pub trait PreferenceValue: Sized {
    /// Decode a stored string, `None` when it is not a valid value.
    fn decode(raw: &str) -> Option<Self>;

    /// Encode for storage.
    fn encode(&self) -> String;
}

impl PreferenceValue for String {
    fn decode(raw: &str) -> Option<Self> {
        Some(raw.to_owned())
    }

    fn encode(&self) -> String {
        self.clone()
    }
}

impl PreferenceValue for i64 {
    fn decode(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}

/// Typed, never-failing facade over a [`PreferenceStore`].
#[derive(Debug, Clone, Default)]
pub struct Preferences<S> {
    store: S,
}

impl<S: PreferenceStore> Preferences<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Typed value for `key`, or `None` when unset, unreadable, or corrupt.
    #[must_use]
    pub fn get_opt<T: PreferenceValue>(&self, key: &str) -> Option<T> {
        let raw = match self.store.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(error) => {
                debug!(key, %error, "preference read failed; using default");
                return None;
            }
        };
        let decoded = T::decode(&raw);
        if decoded.is_none() {
            debug!(key, raw = %raw, "stored preference not decodable; using default");
        }
        decoded
    }

    /// Typed value for `key`, falling back to `default`.
    #[must_use]
    pub fn get<T: PreferenceValue>(&self, key: &str, default: T) -> T {
        self.get_opt(key).unwrap_or(default)
    }

    /// Persist `value` under `key`. Backend failures are logged and dropped.
    pub fn set<T: PreferenceValue>(&mut self, key: &str, value: &T) {
        let encoded = value.encode();
        if let Err(error) = self.store.write(key, &encoded) {
            warn!(key, %error, "preference write failed");
        }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}

/// In-memory store used on native hosts and in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPreferenceStore {
    entries: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing encoding.
    #[must_use]
    pub fn with_raw(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_owned(), value.to_owned());
        self
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
