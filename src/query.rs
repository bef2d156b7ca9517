//! URLクエリパラメータ（サンクスページ）
//!
//! 読み取り専用で、保存はしない。

use std::collections::BTreeMap;

use crate::models::{Record, Trail};

/// サンクスページに表示するフォーム項目（表示名, パラメータ名）
pub const THANK_YOU_FIELDS: &[(&str, &str)] = &[
    ("First Name", "first"),
    ("Last Name", "last"),
    ("Email", "email"),
    ("Mobile", "phone"),
    ("Trail Preference", "trail"),
    ("Notes", "notes"),
    ("Submitted", "timestamp"),
];

/// 保存ルートIDのパラメータ名
pub const SAVED_ROUTES_PARAM: &str = "savedRoutes";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    values: BTreeMap<String, String>,
}

impl QueryParams {
    /// `?a=1&b=2` 形式を解析。同じキーは最初の値を使う
    pub fn parse(search: &str) -> Self {
        let raw = search.strip_prefix('?').unwrap_or(search);
        let mut values = BTreeMap::new();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            values.entry(key.into_owned()).or_insert_with(|| value.into_owned());
        }
        Self { values }
    }

    /// 現在のページのクエリ
    pub fn from_location() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        Self::parse(&search)
    }

    /// 値（無ければ空文字）
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// カンマ区切りのIDリスト（空要素は捨てる）
    pub fn id_list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn thank_you_rows(&self) -> Vec<(&'static str, String)> {
        THANK_YOU_FIELDS
            .iter()
            .map(|(label, key)| (*label, self.get(key).to_string()))
            .collect()
    }
}

/// IDの順にトレイル名へ変換。見つからないIDは捨てる
pub fn resolve_trail_names(ids: &[String], trails: &[Trail]) -> Vec<String> {
    ids.iter()
        .filter_map(|id| trails.iter().find(|t| t.key() == Some(id.as_str())))
        .map(|t| t.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decodes_values() {
        let params = QueryParams::parse("?first=Ana+Mar%C3%ADa&email=ana%40example.com&notes=");
        assert_eq!(params.get("first"), "Ana María");
        assert_eq!(params.get("email"), "ana@example.com");
        assert_eq!(params.get("notes"), "");
        assert_eq!(params.get("missing"), "");
    }

    #[test]
    fn test_first_value_wins() {
        let params = QueryParams::parse("trail=a&trail=b");
        assert_eq!(params.get("trail"), "a");
    }

    #[test]
    fn test_id_list() {
        let params = QueryParams::parse("?savedRoutes=coimata%2C+jurina%2C%2C");
        assert_eq!(params.id_list(SAVED_ROUTES_PARAM), vec!["coimata", "jurina"]);
        assert!(QueryParams::parse("").id_list(SAVED_ROUTES_PARAM).is_empty());
    }

    #[test]
    fn test_thank_you_rows_order() {
        let params = QueryParams::parse("?last=Rojas&first=Ana");
        let rows = params.thank_you_rows();
        assert_eq!(rows.len(), THANK_YOU_FIELDS.len());
        assert_eq!(rows[0], ("First Name", "Ana".to_string()));
        assert_eq!(rows[1], ("Last Name", "Rojas".to_string()));
        assert_eq!(rows[2], ("Email", String::new()));
    }

    #[test]
    fn test_resolve_trail_names() {
        let trails = vec![
            Trail { id: Some("a".into()), name: "Alpha".into(), ..Default::default() },
            Trail { id: Some("b".into()), name: "Beta".into(), ..Default::default() },
            Trail { id: None, name: "Nameless".into(), ..Default::default() },
        ];
        let ids = vec!["b".to_string(), "zzz".to_string(), "a".to_string()];
        assert_eq!(resolve_trail_names(&ids, &trails), vec!["Beta", "Alpha"]);
    }
}
