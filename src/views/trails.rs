//! トレイル一覧
//!
//! トップページのおすすめ（ランダム抽出）と、トレイルページの
//! 難易度フィルタ付き一覧。

use std::rc::Rc;

use gloo::events::EventListener;
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlSelectElement};

use crate::components::card_grid::{bind_trail_actions, find_trail, region_html, trail_cards};
use crate::error::PageError;
use crate::models::Trail;
use crate::selection::{filter_by_field, pick_featured};
use crate::utils::dom::{element, optional_element, replace_html, set_text};
use crate::utils::fetch::{fetch_json, BrowserTransport, RegionState};
use crate::views::Region;
use crate::PageContext;

pub const TRAILS_FALLBACK: &str = "Sorry, we couldn't load trail data right now.";
pub const COUNT_FAILURE: &str = "Unable to load trails.";
const LOADING: &str = "Loading trails...";
const ALL: &str = "all";

/// "4 of 12 trails • Filter: Moderate"。"all" と空はフィルタ無し扱い
pub fn results_count(shown: usize, total: usize, filter: &str) -> String {
    if filter.is_empty() || filter == ALL {
        format!("{} of {} trails", shown, total)
    } else {
        format!("{} of {} trails • Filter: {}", shown, total, filter)
    }
}

/// セレクトの値（無い・空なら "all"）
pub fn initial_filter(selected: Option<String>) -> String {
    selected
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| ALL.to_string())
}

// ============================================
// おすすめトレイル
// ============================================

/// 抽出結果と、詳細表示用の全件
#[derive(Debug, Clone, PartialEq)]
pub struct Featured {
    pub all: Vec<Trail>,
    pub picks: Vec<Trail>,
}

impl Featured {
    pub fn pick(all: Vec<Trail>, total: usize) -> Self {
        let picks = pick_featured(&all, total, |t| t.safe_route);
        Self { all, picks }
    }
}

pub struct FeaturedTrails {
    container: Element,
}

impl Region for FeaturedTrails {
    const NAME: &'static str = "featured-trails";

    fn attach(doc: &Document) -> Result<Self, PageError> {
        Ok(Self { container: element(doc, "featuredTrails")? })
    }

    fn run(self, ctx: &PageContext) {
        let state = create_rw_signal(RegionState::<Featured>::Loading);
        let (version, set_version) = create_signal(0u32);
        let favorites = Rc::new(ctx.favorites());

        let container = self.container.clone();
        let favs = Rc::clone(&favorites);
        create_effect(move |_| {
            version.get();
            state.with(|s| {
                replace_html(&container, &region_html(s, LOADING, |f| trail_cards(&f.picks, &*favs)));
            });
        });

        bind_trail_actions(
            &self.container,
            favorites,
            ctx.modal.clone(),
            move |id| state.with_untracked(|s| s.rendered().and_then(|f| find_trail(&f.all, id).cloned())),
            set_version,
        );

        let path = ctx.config.data.trails.clone();
        let total = ctx.config.featured_total;
        spawn_local(async move {
            let result = fetch_json::<Vec<Trail>, _>(&BrowserTransport, &path)
                .await
                .map(|all| Featured::pick(all, total));
            state.set(RegionState::settle(result, "trails", TRAILS_FALLBACK));
        });
    }
}

// ============================================
// トレイル一覧（難易度フィルタ）
// ============================================

pub struct TrailsBrowser {
    grid: Element,
    filter: Option<HtmlSelectElement>,
    count: Option<Element>,
}

impl Region for TrailsBrowser {
    const NAME: &'static str = "trails-browser";

    fn attach(doc: &Document) -> Result<Self, PageError> {
        Ok(Self {
            grid: element(doc, "allTrails")?,
            filter: optional_element(doc, "difficultyFilter").and_then(|el| el.dyn_into().ok()),
            count: optional_element(doc, "resultsCount"),
        })
    }

    fn run(self, ctx: &PageContext) {
        let state = create_rw_signal(RegionState::<Vec<Trail>>::Loading);
        // フォーム状態が復元されている場合があるので、セレクトの現在値から始める
        let filter = create_rw_signal(initial_filter(self.filter.as_ref().map(|s| s.value())));
        let (version, set_version) = create_signal(0u32);
        let favorites = Rc::new(ctx.favorites());

        let grid = self.grid.clone();
        let count = self.count.clone();
        let favs = Rc::clone(&favorites);
        create_effect(move |_| {
            version.get();
            let value = filter.get();
            state.with(|s| match s {
                RegionState::Rendered(all) => {
                    let shown = filter_by_field(all, "difficulty", &value);
                    replace_html(&grid, &trail_cards(&shown, &*favs));
                    if let Some(el) = &count {
                        set_text(el, &results_count(shown.len(), all.len(), &value));
                    }
                }
                other => {
                    replace_html(&grid, &region_html(other, LOADING, |_| String::new()));
                    if let (Some(el), RegionState::Failed(_)) = (&count, other) {
                        set_text(el, COUNT_FAILURE);
                    }
                }
            });
        });

        if let Some(select) = self.filter.clone() {
            let target = select.clone();
            EventListener::new(&target, "change", move |_| {
                filter.set(select.value());
            })
            .forget();
        }

        bind_trail_actions(
            &self.grid,
            favorites,
            ctx.modal.clone(),
            move |id| state.with_untracked(|s| s.rendered().and_then(|all| find_trail(all, id).cloned())),
            set_version,
        );

        let path = ctx.config.data.trails.clone();
        spawn_local(async move {
            let result = fetch_json::<Vec<Trail>, _>(&BrowserTransport, &path).await;
            state.set(RegionState::settle(result, "trails", TRAILS_FALLBACK));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_count_text() {
        assert_eq!(results_count(12, 12, "all"), "12 of 12 trails");
        assert_eq!(results_count(4, 12, "Moderate"), "4 of 12 trails • Filter: Moderate");
        assert_eq!(results_count(0, 12, ""), "0 of 12 trails");
    }

    #[test]
    fn test_initial_filter_follows_select() {
        assert_eq!(initial_filter(Some("Hard".to_string())), "Hard");
        assert_eq!(initial_filter(Some(String::new())), "all");
        assert_eq!(initial_filter(None), "all");
    }

    #[test]
    fn test_featured_keeps_all_for_details() {
        let all: Vec<Trail> = (0..8)
            .map(|i| Trail {
                id: Some(format!("t{}", i)),
                name: format!("Trail {}", i),
                safe_route: i < 3,
                ..Default::default()
            })
            .collect();
        let featured = Featured::pick(all.clone(), 6);
        assert_eq!(featured.all, all);
        assert_eq!(featured.picks.len(), 6);
        assert_eq!(featured.picks.iter().filter(|t| t.safe_route).count(), 3);
        // 抽出から外れたトレイルも詳細は引ける
        for trail in &all {
            assert!(find_trail(&featured.all, trail.id.as_deref().unwrap()).is_some());
        }
    }
}
