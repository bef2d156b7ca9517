//! JSON取得
//!
//! ブラウザのfetchは `Transport` 越しに呼び、ステータス判定とJSON解析は
//! `decode_response` にまとめる。

use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::error::FetchError;
use crate::utils::log_trace::log_error_with_data;

/// ステータスと本文だけを持つレスポンス
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// GETリクエストの送信口
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError>;
}

// ============================================
// ブラウザ実装
// ============================================

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTransport;

impl Transport for BrowserTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let request = Request::new_with_str_and_init(url, &opts)
            .map_err(|e| FetchError::Request(format!("Request作成失敗: {:?}", e)))?;

        let window = web_sys::window().ok_or_else(|| FetchError::Request("windowがありません".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| FetchError::Request(format!("fetch失敗: {:?}", e)))?;

        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| FetchError::Request("Responseへの変換失敗".to_string()))?;

        let text = JsFuture::from(resp.text().map_err(|e| FetchError::Parse(format!("text()失敗: {:?}", e)))?)
            .await
            .map_err(|e| FetchError::Parse(format!("本文取得失敗: {:?}", e)))?;

        Ok(RawResponse {
            status: resp.status(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}

// ============================================
// 取得と解析
// ============================================

/// 2xx以外は Network、解析できなければ Parse
pub fn decode_response<T: DeserializeOwned>(url: &str, raw: &RawResponse) -> Result<T, FetchError> {
    if !raw.is_success() {
        return Err(FetchError::Network {
            url: url.to_string(),
            status: raw.status,
        });
    }
    serde_json::from_str(&raw.body).map_err(|e| FetchError::Parse(format!("{}: {}", url, e)))
}

/// 相対パスのJSONを取得して型に変換
pub async fn fetch_json<T, X>(transport: &X, url: &str) -> Result<T, FetchError>
where
    T: DeserializeOwned,
    X: Transport,
{
    let raw = transport.get(url).await?;
    decode_response(url, &raw)
}

// ============================================
// リージョンの状態
// ============================================

/// 読込中 → 表示済み / エラー表示
#[derive(Debug, Clone, PartialEq)]
pub enum RegionState<T> {
    Loading,
    Rendered(T),
    Failed(String),
}

impl<T> RegionState<T> {
    /// 取得結果を確定させる。エラーはログに残して代替メッセージにする
    pub fn settle(result: Result<T, FetchError>, category: &str, fallback: &str) -> Self {
        match result {
            Ok(value) => RegionState::Rendered(value),
            Err(e) => {
                log_error_with_data(category, &e.to_string(), serde_json::json!({ "fallback": fallback }));
                RegionState::Failed(fallback.to_string())
            }
        }
    }

    pub fn rendered(&self) -> Option<&T> {
        match self {
            RegionState::Rendered(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Default for RegionState<T> {
    fn default() -> Self {
        RegionState::Loading
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::Trail;
    use futures::executor::block_on;
    use std::collections::HashMap;

    /// URLごとに固定のレスポンスを返すスタブ
    #[derive(Default)]
    pub(crate) struct StubTransport {
        pub responses: HashMap<String, RawResponse>,
    }

    impl StubTransport {
        pub fn with(mut self, url: &str, status: u16, body: &str) -> Self {
            self.responses.insert(url.to_string(), RawResponse { status, body: body.to_string() });
            self
        }
    }

    impl Transport for StubTransport {
        async fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::Request(format!("no stub for {}", url)))
        }
    }

    #[test]
    fn test_success_parses_records() {
        let transport = StubTransport::default()
            .with("data/trails.json", 200, r#"[{"id":"t1","name":"Jurina"}]"#);
        let trails: Vec<Trail> = block_on(fetch_json(&transport, "data/trails.json")).unwrap();
        assert_eq!(trails.len(), 1);
        assert_eq!(trails[0].name, "Jurina");
    }

    #[test]
    fn test_not_found_is_network_error() {
        let transport = StubTransport::default().with("data/trails.json", 404, "Not Found");
        let result: Result<Vec<Trail>, _> = block_on(fetch_json(&transport, "data/trails.json"));
        assert_eq!(
            result,
            Err(FetchError::Network { url: "data/trails.json".to_string(), status: 404 })
        );
    }

    #[test]
    fn test_malformed_body_is_parse_error() {
        let transport = StubTransport::default().with("data/trails.json", 200, "[{");
        let result: Result<Vec<Trail>, _> = block_on(fetch_json(&transport, "data/trails.json"));
        assert!(matches!(result, Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_failed_fetch_settles_to_fallback() {
        let transport = StubTransport::default().with("data/trails.json", 404, "");
        let result: Result<Vec<Trail>, _> = block_on(fetch_json(&transport, "data/trails.json"));
        let state = RegionState::settle(result, "trails", "Sorry, we couldn't load trail data right now.");
        assert_eq!(
            state,
            RegionState::Failed("Sorry, we couldn't load trail data right now.".to_string())
        );
        assert!(state.rendered().is_none());
    }

    #[test]
    fn test_status_boundaries() {
        assert!(RawResponse { status: 200, body: String::new() }.is_success());
        assert!(RawResponse { status: 204, body: String::new() }.is_success());
        assert!(!RawResponse { status: 304, body: String::new() }.is_success());
        assert_eq!(RegionState::<()>::default(), RegionState::Loading);
    }
}
