//! LocalStorageアダプタ
//!
//! 読み書きは同期的でロックなし（後勝ち）。値が無い・壊れている場合は
//! None を返し、呼び出し側が既定値を決める。

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::rc::Rc;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;

/// 文字列キー・文字列値の永続ストア
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);

    /// JSONとして読み込む（解析失敗は None）
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_item(key)?;
        serde_json::from_str(&raw).ok()
    }

    /// JSONとして保存
    fn set_json<T: Serialize>(&self, key: &str, value: &T) {
        if let Ok(raw) = serde_json::to_string(value) {
            self.set_item(key, &raw);
        }
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) {
        (**self).remove_item(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) {
        (**self).remove_item(key)
    }
}

// ============================================
// ブラウザのlocalStorage
// ============================================

/// `window.localStorage` を使うストア。使えない環境では何もしない
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

impl BrowserStore {
    fn storage() -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        window.local_storage().ok()?
    }
}

impl KeyValueStore for BrowserStore {
    fn get_item(&self, key: &str) -> Option<String> {
        let storage = Self::storage()?;
        storage.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

// ============================================
// メモリ上のストア（テスト用）
// ============================================

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_roundtrip_and_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("tcc-theme"), None);
        store.set_item("tcc-theme", "dark");
        assert_eq!(store.get_item("tcc-theme").as_deref(), Some("dark"));
        store.set_item("tcc-theme", "light");
        assert_eq!(store.get_item("tcc-theme").as_deref(), Some("light"));
        store.remove_item("tcc-theme");
        assert!(store.is_empty());
    }

    #[test]
    fn test_json_list() {
        let store = MemoryStore::new();
        store.set_json("ht-favorites", &vec!["a".to_string(), "b".to_string()]);
        assert_eq!(store.get_item("ht-favorites").as_deref(), Some(r#"["a","b"]"#));
        let ids: Option<Vec<String>> = store.get_json("ht-favorites");
        assert_eq!(ids, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_corrupt_json_is_none() {
        let store = MemoryStore::new();
        store.set_item("ht-favorites", "not json");
        assert_eq!(store.get_json::<Vec<String>>("ht-favorites"), None);
    }

    #[test]
    fn test_shared_through_rc() {
        let store = Rc::new(MemoryStore::new());
        let other = Rc::clone(&store);
        other.set_item("directoryView", "list");
        assert_eq!(store.get_item("directoryView").as_deref(), Some("list"));
        assert_eq!(store.len(), 1);
    }
}
