//! サンクスページ
//!
//! フォームの送信内容をクエリから表示し、選んだ保存ルートを
//! トレイル名にして「Interests」に並べる。

use leptos::*;
use web_sys::{Document, Element};

use crate::error::PageError;
use crate::models::Trail;
use crate::query::{resolve_trail_names, QueryParams, SAVED_ROUTES_PARAM};
use crate::render::{list_items, list_message, summary_rows};
use crate::utils::dom::{element, optional_element, replace_html, set_visible};
use crate::utils::fetch::{fetch_json, BrowserTransport, RegionState};
use crate::views::Region;
use crate::PageContext;

pub const INTERESTS_FALLBACK: &str = "Sorry, we couldn't load your interests.";
const INTERESTS_LOADING: &str = "Loading interests...";

pub struct ThankYou {
    data: Element,
    block: Option<Element>,
    list: Option<Element>,
}

impl Region for ThankYou {
    const NAME: &'static str = "thank-you";

    fn attach(doc: &Document) -> Result<Self, PageError> {
        Ok(Self {
            data: element(doc, "thanksData")?,
            block: optional_element(doc, "interestsBlock"),
            list: optional_element(doc, "interestsList"),
        })
    }

    fn run(self, ctx: &PageContext) {
        let params = QueryParams::from_location();
        replace_html(&self.data, &summary_rows(&params.thank_you_rows()));

        let ids = params.id_list(SAVED_ROUTES_PARAM);
        let (block, list) = match (self.block, self.list) {
            (Some(block), Some(list)) if !ids.is_empty() => (block, list),
            (block, _) => {
                if let Some(block) = block {
                    set_visible(&block, false);
                }
                return;
            }
        };

        replace_html(&list, &list_message(INTERESTS_LOADING));
        let path = ctx.config.data.trails.clone();
        spawn_local(async move {
            let result = fetch_json::<Vec<Trail>, _>(&BrowserTransport, &path).await;
            match RegionState::settle(result, "thank-you", INTERESTS_FALLBACK) {
                RegionState::Rendered(trails) => {
                    let names = resolve_trail_names(&ids, &trails);
                    if names.is_empty() {
                        set_visible(&block, false);
                    } else {
                        replace_html(&list, &list_items(&names));
                    }
                }
                RegionState::Failed(text) => replace_html(&list, &list_message(&text)),
                RegionState::Loading => {}
            }
        });
    }
}
