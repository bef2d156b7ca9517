//! DOM操作ヘルパー
//!
//! 同じバンドルが全ページで動くので、要素が無いことは
//! `PageError::MissingElement` として返し、呼び出し側は黙って何もしない。

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement};

use crate::error::PageError;

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// IDで要素を取得
pub fn element(doc: &Document, id: &'static str) -> Result<Element, PageError> {
    doc.get_element_by_id(id).ok_or(PageError::MissingElement(id))
}

/// IDで要素を取得して型変換
pub fn element_as<T: JsCast>(doc: &Document, id: &'static str) -> Result<T, PageError> {
    element(doc, id)?
        .dyn_into::<T>()
        .map_err(|_| PageError::MissingElement(id))
}

/// 任意要素（無ければ None）
pub fn optional_element(doc: &Document, id: &'static str) -> Option<Element> {
    doc.get_element_by_id(id)
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

/// コンテナの中身を丸ごと置き換える
pub fn replace_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

/// style.display で表示・非表示
pub fn set_visible(el: &Element, visible: bool) {
    if let Some(html_el) = el.dyn_ref::<HtmlElement>() {
        let style = html_el.style();
        let _ = if visible {
            style.remove_property("display").map(|_| ())
        } else {
            style.set_property("display", "none")
        };
    }
}

/// クリック元から `[attr]` を持つ最も近い要素を探し、その属性値を返す
pub fn closest_data(ev: &Event, attr: &str) -> Option<String> {
    let target = ev.target()?.dyn_into::<Element>().ok()?;
    let holder = target.closest(&format!("[{}]", attr)).ok()??;
    holder.get_attribute(attr)
}

/// クラスの付け外し
pub fn toggle_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}
