//! 詳細モーダル
//!
//! `<dialog id="trailModal">` を包む。閉じる → 開く → 閉じる の2状態で、
//! 閉じるボタンかダイアログ外のクリックで閉じる。

use gloo::events::EventListener;
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, DomRect, Element, HtmlDialogElement, MouseEvent};

use crate::error::PageError;
use crate::utils::dom::{element, element_as, optional_element, replace_html};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// ダイアログの表示矩形
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    /// 境界上は内側扱い
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.top <= y && y <= self.bottom && self.left <= x && x <= self.right
    }
}

impl From<&DomRect> for Bounds {
    fn from(rect: &DomRect) -> Self {
        Self {
            left: rect.left(),
            top: rect.top(),
            right: rect.right(),
            bottom: rect.bottom(),
        }
    }
}

#[derive(Clone)]
pub struct TrailModal {
    dialog: HtmlDialogElement,
    content: Element,
    state: RwSignal<ModalState>,
}

impl TrailModal {
    pub fn attach(doc: &Document) -> Result<Self, PageError> {
        let modal = Self {
            dialog: element_as::<HtmlDialogElement>(doc, "trailModal")?,
            content: element(doc, "modalContent")?,
            state: create_rw_signal(ModalState::Closed),
        };
        modal.bind(optional_element(doc, "modalClose"));
        Ok(modal)
    }

    fn bind(&self, close_button: Option<Element>) {
        if let Some(button) = close_button {
            let modal = self.clone();
            EventListener::new(&button, "click", move |_| modal.close()).forget();
        }

        // ダイアログ外（背景）のクリックで閉じる
        let modal = self.clone();
        EventListener::new(&self.dialog, "click", move |ev| {
            let Some(mouse) = ev.dyn_ref::<MouseEvent>() else {
                return;
            };
            let bounds = Bounds::from(&modal.dialog.get_bounding_client_rect());
            if !bounds.contains(f64::from(mouse.client_x()), f64::from(mouse.client_y())) {
                modal.close();
            }
        })
        .forget();

        // Escキーなどブラウザ側で閉じた場合
        let state = self.state;
        EventListener::new(&self.dialog, "close", move |_| state.set(ModalState::Closed)).forget();
    }

    pub fn open(&self, html: &str) {
        replace_html(&self.content, html);
        if self.state.get_untracked() == ModalState::Open {
            return;
        }
        if self.dialog.show_modal().is_ok() {
            self.state.set(ModalState::Open);
        }
    }

    pub fn close(&self) {
        if self.state.get_untracked() == ModalState::Closed {
            return;
        }
        self.dialog.close();
        self.state.set(ModalState::Closed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds { left: 100.0, top: 50.0, right: 500.0, bottom: 450.0 };
        assert!(bounds.contains(300.0, 200.0));
        assert!(bounds.contains(100.0, 50.0));
        assert!(bounds.contains(500.0, 450.0));
        assert!(!bounds.contains(99.0, 200.0));
        assert!(!bounds.contains(300.0, 451.0));
        // 背景クリックは座標(0,0)付近になる
        assert!(!bounds.contains(0.0, 0.0));
    }
}
