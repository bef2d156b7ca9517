//! データ構造体モジュール

use serde::{Deserialize, Deserializer, Serialize};

// ============================================
// レコード共通インターフェース
// ============================================

/// JSONデータソースの1件分
pub trait Record {
    /// 一意キー（お気に入り・フィルタで使う）
    fn key(&self) -> Option<&str>;

    /// フィールド名で値を取り出す（文字列比較用）
    fn field(&self, name: &str) -> Option<String>;
}

// ============================================
// トレイル（trailsサイト）
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Trail {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub time_est: String,
    #[serde(default)]
    pub best_season: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub safety_tip: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub safe_route: bool,
}

impl Trail {
    /// 距離表示（欠損時は "—"）
    pub fn distance_label(&self) -> String {
        match self.distance_km {
            Some(km) => format!("{} km", km),
            None => "— km".to_string(),
        }
    }
}

impl Record for Trail {
    fn key(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => self.id.clone(),
            "name" => Some(self.name.clone()),
            "difficulty" => Some(self.difficulty.clone()),
            "time_est" => Some(self.time_est.clone()),
            "best_season" => Some(self.best_season.clone()),
            "safe_route" => Some(self.safe_route.to_string()),
            _ => None,
        }
    }
}

// ============================================
// 会員（chamberサイト）
// ============================================

/// 会員ランク
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipLevel {
    Gold,
    Silver,
    Member,
}

impl MembershipLevel {
    /// 大文字小文字を無視して正規化。gold/silver以外は一般会員
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("gold") => MembershipLevel::Gold,
            Some("silver") => MembershipLevel::Silver,
            _ => MembershipLevel::Member,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipLevel::Gold => "gold",
            MembershipLevel::Silver => "silver",
            MembershipLevel::Member => "member",
        }
    }

    /// スポットライト対象（gold/silver）
    pub fn is_featured(&self) -> bool {
        matches!(self, MembershipLevel::Gold | MembershipLevel::Silver)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Member {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub membership: Option<String>,
}

impl Member {
    pub fn level(&self) -> MembershipLevel {
        MembershipLevel::normalize(self.membership.as_deref())
    }
}

impl Record for Member {
    fn key(&self) -> Option<&str> {
        (!self.name.is_empty()).then_some(self.name.as_str())
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "address" => Some(self.address.clone()),
            "phone" => Some(self.phone.clone()),
            "membership" => Some(self.level().as_str().to_string()),
            _ => None,
        }
    }
}

/// 会員ランクは文字列でも数値でも受け付ける
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

// ============================================
// 観光スポット（discoverページ）
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Place {
    pub title: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, rename = "moreLink")]
    pub more_link: Option<String>,
}

impl Record for Place {
    fn key(&self) -> Option<&str> {
        (!self.title.is_empty()).then_some(self.title.as_str())
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "title" => Some(self.title.clone()),
            "address" => Some(self.address.clone()),
            _ => None,
        }
    }
}

// ============================================
// 天気API（OpenWeatherMap）
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MainReading {
    #[serde(default)]
    pub temp: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Condition {
    #[serde(default)]
    pub description: Option<String>,
}

/// 現在の天気
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CurrentWeather {
    #[serde(default)]
    pub main: MainReading,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

impl CurrentWeather {
    pub fn description(&self) -> Option<&str> {
        self.weather.first().and_then(|c| c.description.as_deref())
    }
}

/// 予報の1エントリ（3時間刻み）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ForecastEntry {
    #[serde(default)]
    pub dt_txt: Option<String>,
    #[serde(default)]
    pub main: MainReading,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

impl ForecastEntry {
    pub fn description(&self) -> Option<&str> {
        self.weather.first().and_then(|c| c.description.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
}

// ============================================
// 表示設定
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// 保存値を解釈。不明値は None（適用しない）
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// ディレクトリの表示モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectoryView {
    #[default]
    Grid,
    List,
}

impl DirectoryView {
    /// "list" 以外はすべてグリッド
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("list") => DirectoryView::List,
            _ => DirectoryView::Grid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DirectoryView::Grid => "grid",
            DirectoryView::List => "list",
        }
    }
}
