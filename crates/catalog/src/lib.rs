//! Viewer clearance persistence.
//!
//! The tier is self-selected and stored as a bare lowercase string under a
//! single key, shared with the rest of the site. Nothing here verifies it.

use scene::ClearanceTier;

pub const DEFAULT_CLEARANCE_KEY: &str = "clearance";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    StorageUnavailable,
    Io(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::StorageUnavailable => write!(f, "browser storage unavailable"),
            StoreError::Io(msg) => write!(f, "clearance storage error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

pub trait ClearanceStore {
    /// Raw stored value, if any. Not validated.
    fn load(&self) -> Result<Option<String>, StoreError>;
    fn save(&mut self, value: &str) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Stored tier, or guest when the value is missing, unreadable or unknown.
pub fn read_clearance(store: &dyn ClearanceStore) -> ClearanceTier {
    let raw = store.load().ok().flatten();
    ClearanceTier::from_untrusted(raw.as_deref())
}

pub fn write_clearance(
    store: &mut dyn ClearanceStore,
    tier: ClearanceTier,
) -> Result<(), StoreError> {
    store.save(tier.as_str())
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryClearanceStore {
    value: Option<String>,
}

impl InMemoryClearanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }
}

impl ClearanceStore for InMemoryClearanceStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.value.clone())
    }

    fn save(&mut self, value: &str) -> Result<(), StoreError> {
        self.value = Some(value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.value = None;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_storage {
    use super::{ClearanceStore, StoreError};

    #[derive(Debug)]
    pub struct LocalStorageClearanceStore {
        key: String,
    }

    impl LocalStorageClearanceStore {
        pub fn new(key: impl Into<String>) -> Result<Self, StoreError> {
            // Fail at construction rather than on first use.
            window_local_storage()?;
            Ok(Self { key: key.into() })
        }
    }

    impl ClearanceStore for LocalStorageClearanceStore {
        fn load(&self) -> Result<Option<String>, StoreError> {
            window_local_storage()?
                .get_item(&self.key)
                .map_err(|e| StoreError::Io(format!("localStorage get failed: {:?}", e)))
        }

        fn save(&mut self, value: &str) -> Result<(), StoreError> {
            window_local_storage()?
                .set_item(&self.key, value)
                .map_err(|e| StoreError::Io(format!("localStorage set failed: {:?}", e)))
        }

        fn clear(&mut self) -> Result<(), StoreError> {
            window_local_storage()?
                .remove_item(&self.key)
                .map_err(|e| StoreError::Io(format!("localStorage remove failed: {:?}", e)))
        }
    }

    fn window_local_storage() -> Result<web_sys::Storage, StoreError> {
        let win = web_sys::window().ok_or(StoreError::StorageUnavailable)?;
        win.local_storage()
            .map_err(|e| StoreError::Io(format!("localStorage error: {:?}", e)))?
            .ok_or(StoreError::StorageUnavailable)
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_storage::LocalStorageClearanceStore;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct LocalStorageClearanceStore;

#[cfg(not(target_arch = "wasm32"))]
impl LocalStorageClearanceStore {
    pub fn new(_key: impl Into<String>) -> Result<Self, StoreError> {
        Err(StoreError::StorageUnavailable)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ClearanceStore for LocalStorageClearanceStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Err(StoreError::StorageUnavailable)
    }

    fn save(&mut self, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::StorageUnavailable)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        Err(StoreError::StorageUnavailable)
    }
}
