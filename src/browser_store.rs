use svg_studio_core::KeyValueStore;
use web_sys::Storage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StorageArea {
    /// Cleared with the tab; holds the generation history.
    Session,
    /// Survives reloads; holds UI preferences.
    Local,
}

/// `KeyValueStore` over Web Storage. A missing or blocked storage area
/// reads as empty and drops writes.
#[derive(Clone, Copy, Debug)]
pub(crate) struct WebStore {
    area: StorageArea,
}

impl WebStore {
    pub(crate) fn new(area: StorageArea) -> Self {
        Self { area }
    }

    fn storage(&self) -> Option<Storage> {
        let window = web_sys::window()?;
        let storage = match self.area {
            StorageArea::Session => window.session_storage(),
            StorageArea::Local => window.local_storage(),
        };
        storage.ok().flatten()
    }
}

impl KeyValueStore for WebStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = self.storage() else {
            gloo::console::warn!("storage unavailable", key.to_string());
            return;
        };
        if let Err(err) = storage.set_item(key, value) {
            gloo::console::warn!("storage write failed", key.to_string(), err);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn session_store_round_trips() {
        let store = WebStore::new(StorageArea::Session);
        store.set("svg-studio.test", "value");
        assert_eq!(store.get("svg-studio.test").as_deref(), Some("value"));
        store.remove("svg-studio.test");
        assert_eq!(store.get("svg-studio.test"), None);
    }
}
