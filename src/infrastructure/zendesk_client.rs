// ZendeskTicketClient - Zendesk Tickets API用HTTPクライアント
//
// 受信したフォームのJSONをそのまま POST /api/v2/tickets.json に転送し、
// ステータスコードとJSONボディを返す。再試行は行わない。

use super::ticket_forwarder::{ForwardError, TicketForwarder, UpstreamResponse};
use super::zendesk_config::ZendeskConfig;
use crate::domain::basic_auth_header;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info, instrument};

/// Zendesk Tickets APIクライアント
///
/// Authorizationヘッダーは構築時に一度だけ計算する。
/// `reqwest::Client`は内部で参照カウントされるため、Lambdaのwarm start間で接続を再利用できる。
#[derive(Clone)]
pub struct ZendeskTicketClient {
    /// HTTPクライアント
    client: Client,
    /// 接続設定
    config: ZendeskConfig,
    /// `Basic base64({email}/token:{api_token})`
    authorization: String,
}

impl std::fmt::Debug for ZendeskTicketClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZendeskTicketClient")
            .field("tickets_url", &self.config.tickets_url().as_str())
            .finish_non_exhaustive()
    }
}

impl ZendeskTicketClient {
    /// 設定からクライアントを作成
    pub fn new(config: ZendeskConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// 事前設定されたHTTPクライアントで作成
    pub fn with_client(config: ZendeskConfig, client: Client) -> Self {
        info!(
            tickets_url = %config.tickets_url(),
            "ZendeskTicketClientを初期化"
        );

        let authorization = basic_auth_header(config.email(), config.api_token());

        Self {
            client,
            config,
            authorization,
        }
    }

    /// 接続設定を取得
    pub fn config(&self) -> &ZendeskConfig {
        &self.config
    }
}

#[async_trait]
impl TicketForwarder for ZendeskTicketClient {
    #[instrument(skip(self, body), fields(tickets_url = %self.config.tickets_url()))]
    async fn forward(&self, body: &str) -> Result<UpstreamResponse, ForwardError> {
        debug!(body_len = body.len(), "チケット作成リクエストを転送");

        let response = self
            .client
            .post(self.config.tickets_url().clone())
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, self.authorization.as_str())
            .body(body.to_owned())
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Zendeskへの接続に失敗");
                ForwardError::NetworkError(e.to_string())
            })?;

        let status = response.status();

        let body = response.json::<Value>().await.map_err(|e| {
            error!(status = %status, error = %e, "ZendeskのレスポンスをJSONとして解釈できない");
            ForwardError::InvalidResponse(e.to_string())
        })?;

        info!(status = status.as_u16(), "Zendeskからレスポンスを受信");

        Ok(UpstreamResponse {
            status: status.as_u16(),
            body,
        })
    }
}
