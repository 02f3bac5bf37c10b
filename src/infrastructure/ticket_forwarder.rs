/// チケット送信の転送先を抽象化するトレイト
///
/// 実際のZendeskクライアントとテスト用モックを差し替えられるようにする。
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// 転送失敗のエラー型
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForwardError {
    /// 接続失敗・名前解決失敗などのネットワークエラー
    #[error("ネットワークエラー: {0}")]
    NetworkError(String),

    /// レスポンスボディがJSONとして解釈できない
    #[error("不正なレスポンス: {0}")]
    InvalidResponse(String),
}

impl ForwardError {
    /// 呼び出し元に返す失敗メッセージ
    pub fn details(&self) -> &str {
        match self {
            ForwardError::NetworkError(message) | ForwardError::InvalidResponse(message) => {
                message
            }
        }
    }
}

/// 上流APIのレスポンス
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    /// HTTPステータスコード
    pub status: u16,
    /// パース済みのJSONボディ
    pub body: Value,
}

/// チケット送信の転送トレイト
#[async_trait]
pub trait TicketForwarder: Send + Sync {
    /// 受信ボディをそのまま上流APIへ転送する
    ///
    /// # 引数
    /// * `body` - フォームから送られたJSON文字列（検証・加工しない）
    ///
    /// # 戻り値
    /// * 上流がJSONを返した場合はステータスに関わらず`Ok(UpstreamResponse)`
    /// * 接続失敗は`Err(ForwardError::NetworkError)`
    /// * JSON以外のボディは`Err(ForwardError::InvalidResponse)`
    async fn forward(&self, body: &str) -> Result<UpstreamResponse, ForwardError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_error_display() {
        let error = ForwardError::NetworkError("connection refused".to_string());
        assert_eq!(error.to_string(), "ネットワークエラー: connection refused");

        let error = ForwardError::InvalidResponse("expected value".to_string());
        assert_eq!(error.to_string(), "不正なレスポンス: expected value");
    }

    /// detailsは種別の接頭辞を含まない生のメッセージ
    #[test]
    fn test_forward_error_details_is_raw_message() {
        assert_eq!(
            ForwardError::NetworkError("dns error".to_string()).details(),
            "dns error"
        );
        assert_eq!(
            ForwardError::InvalidResponse("EOF while parsing".to_string()).details(),
            "EOF while parsing"
        );
    }
}
