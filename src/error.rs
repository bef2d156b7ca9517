//! エラー型モジュール

use thiserror::Error;

/// ページ処理で発生するエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PageError {
    /// 2xx以外のレスポンス
    #[error("HTTP {status}: {url}")]
    Network { url: String, status: u16 },

    /// 本文がJSONとして不正、またはスキーマ不一致
    #[error("JSON解析失敗: {0}")]
    Parse(String),

    /// fetch自体を開始できなかった
    #[error("リクエスト失敗: {0}")]
    Request(String),

    /// 要素が存在しない（このページには該当リージョンがない）
    #[error("要素がありません: #{0}")]
    MissingElement(&'static str),

    /// インライン設定が不正
    #[error("設定エラー: {0}")]
    Config(String),
}

/// fetch系エラーの別名
pub type FetchError = PageError;

impl From<serde_json::Error> for PageError {
    fn from(e: serde_json::Error) -> Self {
        PageError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = PageError::Network { url: "data/members.json".into(), status: 500 };
        assert_eq!(err.to_string(), "HTTP 500: data/members.json");
        assert_eq!(PageError::MissingElement("spotlights").to_string(), "要素がありません: #spotlights");
    }

    #[test]
    fn test_from_serde_error() {
        let err: PageError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, PageError::Parse(_)));
    }
}
