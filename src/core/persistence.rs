//! Durable key/value slots holding the serialized session marker and
//! record collection.
//!
//! The adapter never fails its caller: corrupt or unreadable data falls back
//! to the supplied default and a failed write leaves the in-memory state as
//! the only copy. Both cases are recorded as [`PersistenceWarning`]s and
//! logged through `tracing`.

use crate::errors::{AppError, AppResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Slot holding the logged-in user marker (`null` when logged out).
pub const SESSION_SLOT: &str = "haircut_tracker_user";

/// Slot holding the full list of haircut records.
pub const RECORDS_SLOT: &str = "haircut_tracker_data";

/// Storage that can read and write named text slots.
pub trait SlotBackend {
    fn read_slot(&self, key: &str) -> AppResult<Option<String>>;

    fn write_slot(&mut self, key: &str, value: &str) -> AppResult<()>;

    /// Append an entry to the backend's audit trail, if it keeps one.
    fn audit(&self, _operation: &str, _target: &str, _message: &str) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceWarning {
    #[error("slot '{key}' holds unreadable data, using default ({reason})")]
    Corrupt { key: String, reason: String },

    #[error("slot '{key}' could not be read, using default ({reason})")]
    ReadFailed { key: String, reason: String },

    #[error("slot '{key}' could not be written, keeping in-memory state ({reason})")]
    WriteFailed { key: String, reason: String },
}

impl PersistenceWarning {
    pub fn key(&self) -> &str {
        match self {
            Self::Corrupt { key, .. } | Self::ReadFailed { key, .. } | Self::WriteFailed { key, .. } => {
                key
            }
        }
    }
}

/// JSON (de)serialization on top of a [`SlotBackend`].
pub struct Persistence<B: SlotBackend> {
    backend: B,
    warnings: Vec<PersistenceWarning>,
}

impl<B: SlotBackend> Persistence<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            warnings: Vec::new(),
        }
    }

    /// Read `key` and decode it, or return `default` when the slot is empty,
    /// unreadable or corrupt. Nothing is written back.
    pub fn load<T: DeserializeOwned>(&mut self, key: &str, default: T) -> T {
        let text = match self.backend.read_slot(key) {
            Ok(Some(text)) => text,
            Ok(None) => return default,
            Err(e) => {
                self.warn(PersistenceWarning::ReadFailed {
                    key: key.to_string(),
                    reason: e.to_string(),
                });
                return default;
            }
        };

        match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                self.warn(PersistenceWarning::Corrupt {
                    key: key.to_string(),
                    reason: e.to_string(),
                });
                default
            }
        }
    }

    /// Serialize `value` into `key`. Returns whether the write succeeded.
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        let result = serde_json::to_string(value)
            .map_err(AppError::from)
            .and_then(|text| self.backend.write_slot(key, &text));

        match result {
            Ok(()) => {
                debug!(slot = key, "slot saved");
                true
            }
            Err(e) => {
                self.warn(PersistenceWarning::WriteFailed {
                    key: key.to_string(),
                    reason: e.to_string(),
                });
                false
            }
        }
    }

    /// Write an audit entry. Failures are logged and otherwise ignored.
    pub fn audit(&self, operation: &str, target: &str, message: &str) {
        if let Err(e) = self.backend.audit(operation, target, message) {
            warn!(operation, error = %e, "failed to write internal log");
        }
    }

    /// Warnings collected since the adapter was created.
    pub fn warnings(&self) -> &[PersistenceWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<PersistenceWarning> {
        std::mem::take(&mut self.warnings)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn warn(&mut self, warning: PersistenceWarning) {
        warn!(slot = warning.key(), "{warning}");
        self.warnings.push(warning);
    }
}

/// In-memory slots, optionally limited to a total number of bytes to
/// mimic a storage quota.
#[derive(Debug, Default, Clone)]
pub struct MemorySlots {
    slots: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(bytes: usize) -> Self {
        Self {
            slots: HashMap::new(),
            quota: Some(bytes),
        }
    }

    /// Put raw text in a slot, bypassing serialization and the quota.
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.slots.insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    fn used_without(&self, key: &str) -> usize {
        self.slots
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl SlotBackend for MemorySlots {
    fn read_slot(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write_slot(&mut self, key: &str, value: &str) -> AppResult<()> {
        if let Some(quota) = self.quota {
            let needed = self.used_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(AppError::Other(format!(
                    "storage quota exceeded ({needed} > {quota} bytes)"
                )));
            }
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
