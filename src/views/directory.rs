//! 会員名簿とスポットライト
//!
//! 名簿はグリッド／リスト表示を切り替えられ、選択は保存される。

use gloo::events::EventListener;
use leptos::*;
use web_sys::{Document, Element};

use crate::components::card_grid::region_html;
use crate::error::PageError;
use crate::models::{DirectoryView, Member};
use crate::render::{member_card, message, render_list};
use crate::selection::pick_spotlights;
use crate::utils::dom::{element, replace_html, toggle_class};
use crate::utils::fetch::{fetch_json, BrowserTransport, RegionState};
use crate::views::Region;
use crate::PageContext;

pub const DIRECTORY_FALLBACK: &str = "Sorry, we couldn't load the directory data.";
pub const SPOTLIGHTS_FALLBACK: &str = "Sorry, we couldn't load spotlights.";
const LOADING: &str = "Loading members...";

fn pressed(on: bool) -> &'static str {
    if on { "true" } else { "false" }
}

fn member_html(state: &RegionState<Vec<Member>>) -> String {
    match state {
        RegionState::Failed(text) => message("member-meta", text),
        other => region_html(other, LOADING, |members| render_list(members, member_card)),
    }
}

// ============================================
// 名簿
// ============================================

pub struct Directory {
    members: Element,
    grid_btn: Element,
    list_btn: Element,
}

impl Region for Directory {
    const NAME: &'static str = "directory";

    fn attach(doc: &Document) -> Result<Self, PageError> {
        Ok(Self {
            members: element(doc, "members")?,
            grid_btn: element(doc, "gridBtn")?,
            list_btn: element(doc, "listBtn")?,
        })
    }

    fn run(self, ctx: &PageContext) {
        let view = create_rw_signal(ctx.preferences().directory_view());

        let members = self.members.clone();
        let grid_btn = self.grid_btn.clone();
        let list_btn = self.list_btn.clone();
        let prefs = ctx.preferences();
        create_effect(move |_| {
            let current = view.get();
            let is_grid = current == DirectoryView::Grid;
            toggle_class(&members, "grid", is_grid);
            toggle_class(&members, "list", !is_grid);
            let _ = grid_btn.set_attribute("aria-pressed", pressed(is_grid));
            let _ = list_btn.set_attribute("aria-pressed", pressed(!is_grid));
            prefs.set_directory_view(current);
        });

        EventListener::new(&self.grid_btn, "click", move |_| view.set(DirectoryView::Grid)).forget();
        EventListener::new(&self.list_btn, "click", move |_| view.set(DirectoryView::List)).forget();

        let state = create_rw_signal(RegionState::<Vec<Member>>::Loading);
        let container = self.members.clone();
        create_effect(move |_| state.with(|s| replace_html(&container, &member_html(s))));

        let path = ctx.config.data.members.clone();
        spawn_local(async move {
            let result = fetch_json::<Vec<Member>, _>(&BrowserTransport, &path).await;
            state.set(RegionState::settle(result, "directory", DIRECTORY_FALLBACK));
        });
    }
}

// ============================================
// スポットライト（トップページ）
// ============================================

pub struct Spotlights {
    container: Element,
}

impl Region for Spotlights {
    const NAME: &'static str = "spotlights";

    fn attach(doc: &Document) -> Result<Self, PageError> {
        Ok(Self { container: element(doc, "spotlights")? })
    }

    fn run(self, ctx: &PageContext) {
        let state = create_rw_signal(RegionState::<Vec<Member>>::Loading);
        let container = self.container.clone();
        create_effect(move |_| state.with(|s| replace_html(&container, &member_html(s))));

        let path = ctx.config.data.members.clone();
        spawn_local(async move {
            let result = fetch_json::<Vec<Member>, _>(&BrowserTransport, &path)
                .await
                .map(|members| pick_spotlights(&members));
            state.set(RegionState::settle(result, "spotlights", SPOTLIGHTS_FALLBACK));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_html_failure_uses_member_meta() {
        let failed = RegionState::<Vec<Member>>::Failed(DIRECTORY_FALLBACK.to_string());
        assert_eq!(
            member_html(&failed),
            r#"<p class="member-meta">Sorry, we couldn&#039;t load the directory data.</p>"#
        );
    }

    #[test]
    fn test_member_html_renders_cards() {
        let members: Vec<Member> = serde_json::from_str(
            r#"[{"name":"Casa Vieja","membership":3},{"name":"El Molino","membership":"Silver"}]"#,
        )
        .unwrap();
        let html = member_html(&RegionState::Rendered(members));
        assert_eq!(html.matches(r#"<article class="member-card">"#).count(), 2);
        assert!(html.contains("SILVER"));
    }
}
