//! 予約フォームの保存ルート
//!
//! お気に入りのトレイルをチェックボックスで並べ、チェック済みIDを
//! hidden 項目 `#savedRoutes` にカンマ区切りで入れる。

use gloo::events::EventListener;
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

use crate::error::PageError;
use crate::favorites::checked_value;
use crate::models::{Record, Trail};
use crate::render::{message, render_list, saved_route_option};
use crate::utils::dom::{element, element_as, replace_html};
use crate::utils::fetch::{fetch_json, BrowserTransport, RegionState};
use crate::views::Region;
use crate::PageContext;

pub const SAVED_ROUTES_FALLBACK: &str = "Sorry, we couldn't load your saved routes right now.";

const NO_SAVED_ROUTES: &str = r#"<p class="meta">You don't have any saved routes yet. <a class="link" href="trails.html">Browse trails</a> and click “☆ Save”.</p>"#;
const SAVED_ROUTES_GONE: &str = r#"<p class="meta">Your saved list is empty or unavailable right now. <a class="link" href="trails.html">Browse trails</a>.</p>"#;

/// お気に入りIDに該当するトレイル（データの並び順）
pub fn saved_trails(trails: Vec<Trail>, ids: &[String]) -> Vec<Trail> {
    trails
        .into_iter()
        .filter(|t| t.key().map_or(false, |key| ids.iter().any(|id| id == key)))
        .collect()
}

pub struct SavedRoutes {
    options: Element,
    hidden: HtmlInputElement,
}

/// チェック済みの値を hidden 項目へ
fn sync_hidden(options: &Element, hidden: &HtmlInputElement) {
    let mut checked = Vec::new();
    if let Ok(nodes) = options.query_selector_all(".saved-route:checked") {
        for i in 0..nodes.length() {
            if let Some(input) = nodes.get(i).and_then(|n| n.dyn_into::<HtmlInputElement>().ok()) {
                checked.push(input.value());
            }
        }
    }
    hidden.set_value(&checked_value(&checked));
}

impl Region for SavedRoutes {
    const NAME: &'static str = "saved-routes";

    fn attach(doc: &Document) -> Result<Self, PageError> {
        // 枠が無いページでは動かさない
        element(doc, "savedRoutesBox")?;
        Ok(Self {
            options: element(doc, "savedRoutesOptions")?,
            hidden: element_as::<HtmlInputElement>(doc, "savedRoutes")?,
        })
    }

    fn run(self, ctx: &PageContext) {
        let ids = ctx.favorites().ids();
        if ids.is_empty() {
            replace_html(&self.options, NO_SAVED_ROUTES);
            self.hidden.set_value("");
            return;
        }

        let path = ctx.config.data.trails.clone();
        spawn_local(async move {
            let result = fetch_json::<Vec<Trail>, _>(&BrowserTransport, &path).await;
            let Self { options, hidden } = self;
            match RegionState::settle(result, "reservations", SAVED_ROUTES_FALLBACK) {
                RegionState::Rendered(trails) => {
                    let saved = saved_trails(trails, &ids);
                    if saved.is_empty() {
                        replace_html(&options, SAVED_ROUTES_GONE);
                        hidden.set_value("");
                        return;
                    }
                    replace_html(&options, &render_list(&saved, saved_route_option));
                    sync_hidden(&options, &hidden);

                    let target = options.clone();
                    EventListener::new(&target, "change", move |_| sync_hidden(&options, &hidden)).forget();
                }
                RegionState::Failed(text) => {
                    replace_html(&options, &message("meta", &text));
                    hidden.set_value("");
                }
                RegionState::Loading => {}
            }
        });
    }
}
