//! お気に入り（選択状態）
//!
//! IDの集合をJSON配列として1キーに保存する。トグルのたびに即保存し、
//! 通知の仕組みは持たない。表示側はトグル後に `is_selected` を引き直す。

use crate::utils::storage::KeyValueStore;

pub struct Favorites<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> Favorites<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    /// 保存済みID（未保存・破損時は空）
    pub fn ids(&self) -> Vec<String> {
        self.store.get_json::<Vec<String>>(&self.key).unwrap_or_default()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids().iter().any(|saved| saved == id)
    }

    /// 無ければ追加、あれば削除。変更後の状態を返す
    pub fn toggle(&self, id: &str) -> bool {
        let mut ids = self.ids();
        let selected = match ids.iter().position(|saved| saved == id) {
            Some(index) => {
                ids.remove(index);
                false
            }
            None => {
                ids.push(id.to_string());
                true
            }
        };
        self.store.set_json(&self.key, &ids);
        selected
    }
}

/// チェックされたIDをカンマ区切りにする（予約フォームの hidden 値）
pub fn checked_value<S: AsRef<str>>(checked: &[S]) -> String {
    checked
        .iter()
        .map(|id| id.as_ref().trim())
        .filter(|id| !id.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}
