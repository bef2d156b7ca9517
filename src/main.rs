use std::rc::Rc;

use leptos::*;

mod components;
mod config;
mod error;
mod favorites;
mod models;
mod preferences;
mod query;
mod render;
mod selection;
mod utils;
mod views;
mod weather;

use components::modal::TrailModal;
use config::SiteConfig;
use favorites::Favorites;
use preferences::Preferences;
use utils::log_trace::log_info;
use utils::storage::BrowserStore;

// ============================================
// ページ共通コンテキスト
// ============================================

/// 全領域で共有する設定とモーダル
#[derive(Clone)]
pub struct PageContext {
    pub config: Rc<SiteConfig>,
    pub modal: Option<TrailModal>,
}

impl PageContext {
    pub fn new(config: SiteConfig, modal: Option<TrailModal>) -> Self {
        Self { config: Rc::new(config), modal }
    }

    pub fn favorites(&self) -> Favorites<BrowserStore> {
        Favorites::new(BrowserStore, self.config.keys.favorites.clone())
    }

    pub fn preferences(&self) -> Preferences<BrowserStore> {
        Preferences::new(BrowserStore, self.config.keys.clone())
    }
}

// ============================================
// アプリ
// ============================================

/// 静的HTMLの既存要素に振る舞いを付ける。描画するノードは持たない
#[component]
fn App() -> impl IntoView {
    let Some(document) = utils::dom::document() else {
        return;
    };

    let config = SiteConfig::from_document(&document);
    log_info("page", &format!("サイト: {:?}", config.site));

    let modal = TrailModal::attach(&document).ok();
    let ctx = PageContext::new(config, modal);

    views::mount_all(&document, &ctx);
}

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
