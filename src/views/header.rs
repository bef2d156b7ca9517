//! ヘッダーとフッター
//!
//! モバイルメニュー（body切替型とnav切替型）、テーマ切替、
//! フッターの年と最終更新日、フォームの送信時刻、日別訪問カウンタ。

use chrono::{Datelike, Local, SecondsFormat, Utc};
use gloo::events::EventListener;
use leptos::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use crate::error::PageError;
use crate::models::Theme;
use crate::preferences::{daily_visit_message, last_seen_label};
use crate::utils::dom::{element, element_as, optional_element, set_text, toggle_class};
use crate::views::Region;
use crate::PageContext;

const NAV_OPEN_CLASS: &str = "nav-open";
const OPEN_CLASS: &str = "open";
const DARK_CLASS: &str = "dark";

fn body(doc: &Document) -> Result<HtmlElement, PageError> {
    doc.body().ok_or(PageError::MissingElement("body"))
}

/// メニューボタンの aria-label
pub fn menu_label(open: bool) -> &'static str {
    if open { "Close menu" } else { "Open menu" }
}

/// この幅以上ならメニューを閉じる
pub fn should_close_menu(width: f64, breakpoint: f64) -> bool {
    width >= breakpoint
}

// ============================================
// モバイルメニュー
// ============================================

pub struct MenuToggle {
    button: Element,
    body: HtmlElement,
}

impl Region for MenuToggle {
    const NAME: &'static str = "menu";

    fn attach(doc: &Document) -> Result<Self, PageError> {
        Ok(Self {
            button: element(doc, "menuToggle")?,
            body: body(doc)?,
        })
    }

    fn run(self, ctx: &PageContext) {
        let open = create_rw_signal(false);

        let button = self.button.clone();
        let body = self.body.clone();
        create_effect(move |_| {
            let is_open = open.get();
            toggle_class(&body, NAV_OPEN_CLASS, is_open);
            let _ = button.set_attribute("aria-expanded", if is_open { "true" } else { "false" });
            let _ = button.set_attribute("aria-label", menu_label(is_open));
        });

        EventListener::new(&self.button, "click", move |_| open.update(|o| *o = !*o)).forget();

        let Some(window) = web_sys::window() else {
            return;
        };
        let breakpoint = ctx.config.nav_breakpoint;
        let win = window.clone();
        EventListener::new(&window, "resize", move |_| {
            let width = win.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(0.0);
            if should_close_menu(width, breakpoint) && open.get_untracked() {
                open.set(false);
            }
        })
        .forget();
    }
}

// ============================================
// ナビ切替型メニュー（#menuButton / #primaryNav）
// ============================================

/// ボタンでナビ要素の `open` を切り替える。リサイズでは閉じない
pub struct NavMenu {
    button: Element,
    nav: Element,
}

impl Region for NavMenu {
    const NAME: &'static str = "nav-menu";

    fn attach(doc: &Document) -> Result<Self, PageError> {
        Ok(Self {
            button: element(doc, "menuButton")?,
            nav: element(doc, "primaryNav")?,
        })
    }

    fn run(self, _ctx: &PageContext) {
        let open = create_rw_signal(false);

        let button = self.button.clone();
        let nav = self.nav.clone();
        create_effect(move |_| {
            let is_open = open.get();
            toggle_class(&nav, OPEN_CLASS, is_open);
            let _ = button.set_attribute("aria-expanded", if is_open { "true" } else { "false" });
            let _ = button.set_attribute("aria-label", menu_label(is_open));
        });

        EventListener::new(&self.button, "click", move |_| open.update(|o| *o = !*o)).forget();
    }
}

// ============================================
// テーマ切替
// ============================================

pub struct ThemeToggle {
    button: Element,
    body: HtmlElement,
}

impl Region for ThemeToggle {
    const NAME: &'static str = "theme";

    fn attach(doc: &Document) -> Result<Self, PageError> {
        Ok(Self {
            button: element(doc, "themeToggle")?,
            body: body(doc)?,
        })
    }

    fn run(self, ctx: &PageContext) {
        // 未保存ならページの既定のまま
        let theme = create_rw_signal(ctx.preferences().theme());

        let button = self.button.clone();
        let body = self.body.clone();
        let prefs = ctx.preferences();
        create_effect(move |_| {
            if let Some(t) = theme.get() {
                toggle_class(&body, DARK_CLASS, t == Theme::Dark);
                let _ = button.set_attribute("aria-pressed", if t == Theme::Dark { "true" } else { "false" });
                prefs.set_theme(t);
            }
        });

        let body = self.body.clone();
        EventListener::new(&self.button, "click", move |_| {
            let current = if body.class_list().contains(DARK_CLASS) { Theme::Dark } else { Theme::Light };
            theme.set(Some(current.toggled()));
        })
        .forget();
    }
}

// ============================================
// フッター
// ============================================

pub struct Footer {
    year: Option<Element>,
    last_modified: Option<Element>,
    document: Document,
}

impl Region for Footer {
    const NAME: &'static str = "footer";

    fn attach(doc: &Document) -> Result<Self, PageError> {
        let year = optional_element(doc, "year");
        let last_modified = optional_element(doc, "lastModified");
        if year.is_none() && last_modified.is_none() {
            return Err(PageError::MissingElement("year"));
        }
        Ok(Self { year, last_modified, document: doc.clone() })
    }

    fn run(self, _ctx: &PageContext) {
        if let Some(el) = &self.year {
            set_text(el, &Local::now().year().to_string());
        }
        if let Some(el) = &self.last_modified {
            set_text(el, &self.document.last_modified());
        }
    }
}

// ============================================
// フォーム送信時刻
// ============================================

pub struct FormTimestamp {
    input: HtmlInputElement,
}

/// hidden 項目に入れる現在時刻（ISO 8601、UTC）
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Region for FormTimestamp {
    const NAME: &'static str = "timestamp";

    fn attach(doc: &Document) -> Result<Self, PageError> {
        Ok(Self { input: element_as::<HtmlInputElement>(doc, "timestamp")? })
    }

    fn run(self, _ctx: &PageContext) {
        self.input.set_value(&timestamp_now());
    }
}

// ============================================
// 日別訪問カウンタ
// ============================================

pub struct VisitCounter {
    visits_today: Element,
    last_visit: Element,
    message: Option<Element>,
}

impl Region for VisitCounter {
    const NAME: &'static str = "visit-counter";

    fn attach(doc: &Document) -> Result<Self, PageError> {
        Ok(Self {
            visits_today: element(doc, "visitsToday")?,
            last_visit: element(doc, "lastVisit")?,
            message: optional_element(doc, "visitMessage"),
        })
    }

    fn run(self, ctx: &PageContext) {
        let now = Utc::now();
        let visit = ctx.preferences().record_daily_visit(now);
        set_text(&self.visits_today, &visit.count.to_string());
        set_text(&self.last_visit, &last_seen_label(visit.last_seen, &Local));
        if let Some(el) = &self.message {
            set_text(el, &daily_visit_message(visit.last_seen, now));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_label() {
        assert_eq!(menu_label(true), "Close menu");
        assert_eq!(menu_label(false), "Open menu");
    }

    #[test]
    fn test_close_on_wide_viewport() {
        assert!(should_close_menu(850.0, 850.0));
        assert!(should_close_menu(1200.0, 769.0));
        assert!(!should_close_menu(768.0, 769.0));
    }

    #[test]
    fn test_timestamp_is_utc_iso() {
        let ts = timestamp_now();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
