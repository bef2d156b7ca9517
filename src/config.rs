//! サイト設定
//!
//! 既定値はコンパイル時に埋め込み、ページ内の
//! `<script id="site-config" type="application/json">` で一部を上書きできる。

use serde::{Deserialize, Serialize};

use crate::error::PageError;

/// 上書き設定を置く要素ID
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// サイト種別（`<body data-site="...">`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SiteVariant {
    Chamber,
    #[default]
    Trails,
}

impl SiteVariant {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("chamber") => SiteVariant::Chamber,
            _ => SiteVariant::Trails,
        }
    }
}

/// 永続化キー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub theme: String,
    pub directory_view: String,
    pub favorites: String,
    pub last_visit: String,
    /// 日別訪問カウンタ（日付・回数・前回訪問のISO時刻）
    pub visit_day: String,
    pub visit_count: String,
    pub visit_last_seen: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            theme: "tcc-theme".to_string(),
            directory_view: "directoryView".to_string(),
            favorites: "ht-favorites".to_string(),
            last_visit: "ht-last-visit".to_string(),
            visit_day: "visitDay".to_string(),
            visit_count: "visitCount".to_string(),
            visit_last_seen: "lastVisit".to_string(),
        }
    }
}

/// JSONデータファイルの相対パス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub trails: String,
    pub members: String,
    pub places: String,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            trails: "data/trails.json".to_string(),
            members: "data/members.json".to_string(),
            places: "data/discover.json".to_string(),
        }
    }
}

/// 天気ウィジェット設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
    pub city_query: String,
    pub units: String,
    /// 空ならウィジェットは案内文を表示するだけ
    pub api_key: String,
    pub forecast_days: usize,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            city_query: "Tarija,BO".to_string(),
            units: "metric".to_string(),
            api_key: option_env!("OPENWEATHER_API_KEY").unwrap_or_default().to_string(),
            forecast_days: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site: SiteVariant,
    pub keys: StorageKeys,
    pub data: DataPaths,
    pub weather: WeatherConfig,
    /// おすすめトレイルの表示件数
    pub featured_total: usize,
    /// この幅以上にリサイズされたらモバイルメニューを閉じる
    pub nav_breakpoint: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::for_site(SiteVariant::default())
    }
}

impl SiteConfig {
    /// サイト種別ごとの既定値
    pub fn for_site(site: SiteVariant) -> Self {
        let nav_breakpoint = match site {
            SiteVariant::Chamber => 850.0,
            SiteVariant::Trails => 769.0,
        };
        Self {
            site,
            keys: StorageKeys::default(),
            data: DataPaths::default(),
            weather: WeatherConfig::default(),
            featured_total: 6,
            nav_breakpoint,
        }
    }

    /// 既定値にJSONの上書きを重ねる
    pub fn with_overrides(self, json: &str) -> Result<Self, PageError> {
        let mut base = serde_json::to_value(&self).map_err(|e| PageError::Config(e.to_string()))?;
        let patch: serde_json::Value =
            serde_json::from_str(json).map_err(|e| PageError::Config(e.to_string()))?;
        if !patch.is_object() {
            return Err(PageError::Config("設定はJSONオブジェクトである必要があります".to_string()));
        }
        merge(&mut base, patch);
        serde_json::from_value(base).map_err(|e| PageError::Config(e.to_string()))
    }

    /// ページのbody属性と設定要素から読み込む
    pub fn from_document(document: &web_sys::Document) -> Self {
        let site = document
            .body()
            .and_then(|body| body.get_attribute("data-site"));
        let config = Self::for_site(SiteVariant::parse(site.as_deref()));

        let inline = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
            .filter(|text| !text.trim().is_empty());

        match inline {
            Some(json) => match config.clone().with_overrides(&json) {
                Ok(merged) => merged,
                Err(e) => {
                    crate::utils::log_trace::log_warn("config", &e.to_string());
                    config
                }
            },
            None => config,
        }
    }
}

/// オブジェクト同士は再帰的にマージ、それ以外は置き換え
fn merge(base: &mut serde_json::Value, patch: serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(base_map), serde_json::Value::Object(patch_map)) => {
            for (key, value) in patch_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
