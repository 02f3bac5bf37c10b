//! プロキシのエラー種別
//!
//! 呼び出し元に返すエラーは3種類のみ。いずれもそのリクエストで終端し、再試行しない。
//! エラーレスポンスは`error`と、必要に応じて`details`フィールドを持つJSON。

use lambda_http::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// エラーレスポンスのボディ
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// エラーメッセージ（固定文言）
    pub error: String,
    /// 失敗の詳細（上流接続エラー時のみ）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// プロキシのエラー
///
/// `Display`はそのままレスポンスの`error`フィールドになる。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProxyError {
    /// POST・OPTIONS以外のメソッド
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Zendeskの認証情報が環境変数に設定されていない
    #[error("Missing Zendesk environment variables")]
    ConfigurationMissing,

    /// Zendeskへの接続失敗、またはレスポンスがJSONでない
    #[error("Failed to reach Zendesk")]
    UpstreamUnreachable {
        /// 失敗メッセージ
        details: String,
    },
}

impl ProxyError {
    /// 対応するHTTPステータスコード
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::ConfigurationMissing | ProxyError::UpstreamUnreachable { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// レスポンスボディを生成
    pub fn to_body(&self) -> ErrorBody {
        let details = match self {
            ProxyError::UpstreamUnreachable { details } => Some(details.clone()),
            _ => None,
        };

        ErrorBody {
            error: self.to_string(),
            details,
        }
    }

    /// レスポンスボディをJSON文字列として生成
    pub fn to_json(&self) -> String {
        // 文字列フィールドのみの構造体なのでシリアライズは失敗しない
        serde_json::to_string(&self.to_body()).unwrap_or_default()
    }
}
