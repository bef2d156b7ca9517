//! カードグリッド
//!
//! コンテナの innerHTML を丸ごと描き直す方式。ボタンは
//! `data-view` / `data-fav` 属性を持ち、クリックはコンテナ1か所で受ける。

use std::rc::Rc;

use gloo::events::EventListener;
use leptos::*;
use web_sys::Element;

use crate::components::modal::TrailModal;
use crate::favorites::Favorites;
use crate::models::{Record, Trail};
use crate::render::{message, trail_card, trail_detail, FAV_ATTR, VIEW_ATTR};
use crate::utils::dom::closest_data;
use crate::utils::fetch::RegionState;
use crate::utils::log_trace::log_info;
use crate::utils::storage::KeyValueStore;

/// 状態に応じたHTML。読込中と失敗はメッセージ1行
pub fn region_html<T>(state: &RegionState<T>, loading: &str, render: impl FnOnce(&T) -> String) -> String {
    match state {
        RegionState::Loading => message("meta", loading),
        RegionState::Rendered(value) => render(value),
        RegionState::Failed(text) => message("meta", text),
    }
}

/// お気に入り状態を引き直してトレイルカードを並べる
pub fn trail_cards<S: KeyValueStore>(trails: &[Trail], favorites: &Favorites<S>) -> String {
    trails
        .iter()
        .map(|t| trail_card(t, t.key().map_or(false, |id| favorites.is_selected(id))))
        .collect()
}

pub fn find_trail<'a>(trails: &'a [Trail], id: &str) -> Option<&'a Trail> {
    trails.iter().find(|t| t.key() == Some(id))
}

/// 詳細ボタンとお気に入りボタンのクリックを受ける
///
/// `lookup` でIDからトレイルを引く。トグル後は `refresh` を進めて再描画させる。
pub fn bind_trail_actions<S, L>(
    container: &Element,
    favorites: Rc<Favorites<S>>,
    modal: Option<TrailModal>,
    lookup: L,
    refresh: WriteSignal<u32>,
) where
    S: KeyValueStore + 'static,
    L: Fn(&str) -> Option<Trail> + 'static,
{
    EventListener::new(container, "click", move |ev| {
        if let Some(id) = closest_data(ev, VIEW_ATTR) {
            if let (Some(modal), Some(trail)) = (modal.as_ref(), lookup(&id)) {
                modal.open(&trail_detail(&trail));
            }
            return;
        }
        if let Some(id) = closest_data(ev, FAV_ATTR) {
            let saved = favorites.toggle(&id);
            log_info("favorites", &format!("{} {}", id, if saved { "saved" } else { "removed" }));
            refresh.update(|version| *version = version.wrapping_add(1));
        }
    })
    .forget();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SAVED_LABEL;
    use crate::utils::storage::MemoryStore;

    fn trail(id: &str, name: &str) -> Trail {
        Trail { id: Some(id.into()), name: name.into(), ..Default::default() }
    }

    #[test]
    fn test_region_html_states() {
        let loading: RegionState<Vec<u8>> = RegionState::Loading;
        assert_eq!(region_html(&loading, "Loading...", |_| unreachable!()), message("meta", "Loading..."));

        let failed: RegionState<Vec<u8>> = RegionState::Failed("Sorry <oops>".into());
        assert!(region_html(&failed, "", |_| String::new()).contains("Sorry &lt;oops&gt;"));

        let ready = RegionState::Rendered(vec![1u8, 2]);
        assert_eq!(region_html(&ready, "", |v| v.len().to_string()), "2");
    }

    #[test]
    fn test_trail_cards_reflect_favorites() {
        let store = MemoryStore::new();
        let favorites = Favorites::new(&store, "ht-favorites");
        let trails = vec![trail("a", "Alpha"), trail("b", "Beta")];

        assert!(!trail_cards(&trails, &favorites).contains(SAVED_LABEL));
        favorites.toggle("b");
        let html = trail_cards(&trails, &favorites);
        assert_eq!(html.matches(SAVED_LABEL).count(), 1);
    }

    #[test]
    fn test_find_trail() {
        let trails = vec![trail("a", "Alpha"), trail("b", "Beta")];
        assert_eq!(find_trail(&trails, "b").map(|t| t.name.as_str()), Some("Beta"));
        assert!(find_trail(&trails, "c").is_none());
    }
}
