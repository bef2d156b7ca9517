//! 観光スポットページ
//!
//! 前回訪問からの日数メッセージと、スポットのカード一覧。

use chrono::Utc;
use leptos::*;
use web_sys::{Document, Element};

use crate::components::card_grid::region_html;
use crate::error::PageError;
use crate::models::Place;
use crate::render::{place_card, render_list};
use crate::utils::dom::{optional_element, replace_html, set_text};
use crate::utils::fetch::{fetch_json, BrowserTransport, RegionState};
use crate::views::Region;
use crate::PageContext;

pub const PLACES_FALLBACK: &str = "Sorry, we couldn't load places right now.";
const LOADING: &str = "Loading places...";

pub struct Discover {
    grid: Option<Element>,
    message: Option<Element>,
}

impl Region for Discover {
    const NAME: &'static str = "discover";

    fn attach(doc: &Document) -> Result<Self, PageError> {
        let grid = optional_element(doc, "discoverGrid");
        // 日別カウンタのあるページではメッセージはカウンタ側が書く
        let message = optional_element(doc, "visitMessage")
            .filter(|_| optional_element(doc, "visitsToday").is_none());
        if grid.is_none() && message.is_none() {
            return Err(PageError::MissingElement("discoverGrid"));
        }
        Ok(Self { grid, message })
    }

    fn run(self, ctx: &PageContext) {
        if let Some(el) = &self.message {
            let text = ctx.preferences().record_visit(Utc::now().timestamp_millis());
            set_text(el, &text);
        }

        let Some(grid) = self.grid else {
            return;
        };
        let state = create_rw_signal(RegionState::<Vec<Place>>::Loading);
        create_effect(move |_| {
            state.with(|s| replace_html(&grid, &region_html(s, LOADING, |places| render_list(places, place_card))))
        });

        let path = ctx.config.data.places.clone();
        spawn_local(async move {
            let result = fetch_json::<Vec<Place>, _>(&BrowserTransport, &path).await;
            state.set(RegionState::settle(result, "discover", PLACES_FALLBACK));
        });
    }
}
