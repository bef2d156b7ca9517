//! ページ領域
//!
//! 全ページで同じバンドルが動く。各領域は必要な要素が揃っていれば
//! 組み立てて動かし、無ければ何もしない。

pub mod directory;
pub mod discover;
pub mod header;
pub mod reservations;
pub mod thank_you;
pub mod trails;
pub mod weather_widget;

use web_sys::Document;

use crate::error::PageError;
use crate::utils::log_trace::{log_info, log_warn};
use crate::PageContext;

/// ページ上の1領域
pub trait Region: Sized {
    const NAME: &'static str;

    /// 必要な要素を集める。無ければ `PageError::MissingElement`
    fn attach(doc: &Document) -> Result<Self, PageError>;

    fn run(self, ctx: &PageContext);
}

pub fn mount<R: Region>(doc: &Document, ctx: &PageContext) {
    match R::attach(doc) {
        Ok(region) => {
            log_info("page", &format!("{} を開始", R::NAME));
            region.run(ctx);
        }
        Err(PageError::MissingElement(_)) => {}
        Err(e) => log_warn("page", &format!("{}: {}", R::NAME, e)),
    }
}

/// ページ上の全領域を組み立てる
pub fn mount_all(doc: &Document, ctx: &PageContext) {
    mount::<header::MenuToggle>(doc, ctx);
    mount::<header::NavMenu>(doc, ctx);
    mount::<header::ThemeToggle>(doc, ctx);
    mount::<header::Footer>(doc, ctx);
    mount::<header::FormTimestamp>(doc, ctx);
    mount::<header::VisitCounter>(doc, ctx);
    mount::<trails::FeaturedTrails>(doc, ctx);
    mount::<trails::TrailsBrowser>(doc, ctx);
    mount::<reservations::SavedRoutes>(doc, ctx);
    mount::<thank_you::ThankYou>(doc, ctx);
    mount::<directory::Directory>(doc, ctx);
    mount::<directory::Spotlights>(doc, ctx);
    mount::<weather_widget::WeatherWidget>(doc, ctx);
    mount::<discover::Discover>(doc, ctx);
}
