use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use web_sys::Storage;

use crate::error::SetupError;

/// Minimal key/value persistence used by the widgets.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), SetupError>;
}

/// `window.localStorage`.
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    /// `None` when storage is unavailable (disabled by the browser, or a
    /// sandboxed frame).
    pub fn open(window: &web_sys::Window) -> Option<Self> {
        match window.local_storage() {
            Ok(Some(storage)) => Some(Self { storage }),
            _ => None,
        }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SetupError> {
        self.storage.set_item(key, value)?;
        Ok(())
    }
}

/// Stand-in when `localStorage` is unavailable. Values last for the current
/// page view only.
#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SetupError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Local storage when the browser offers it, otherwise an in-memory store.
pub fn open(window: &web_sys::Window) -> Rc<dyn KeyValueStore> {
    match LocalStore::open(window) {
        Some(store) => Rc::new(store),
        None => {
            log::warn!("localStorage unavailable, choices will not persist");
            Rc::new(MemoryStore::default())
        }
    }
}
