// Zendesk API接続設定
//
// 環境変数からサブドメイン・メールアドレス・APIトークンを読み込み、
// 起動時に一度だけ検証してハンドラーに注入する。

use std::fmt;

use thiserror::Error;
use url::Url;

/// サブドメインの環境変数名
pub const SUBDOMAIN_ENV: &str = "ZENDESK_SUBDOMAIN";

/// アカウントメールアドレスの環境変数名
pub const EMAIL_ENV: &str = "ZENDESK_EMAIL";

/// APIトークンの環境変数名
pub const API_TOKEN_ENV: &str = "ZENDESK_API_TOKEN";

/// Zendeskのドメイン
pub const ZENDESK_DOMAIN: &str = "zendesk.com";

/// チケット作成エンドポイントのパス
const TICKETS_PATH: &str = "api/v2/tickets.json";

/// Zendesk設定エラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ZendeskConfigError {
    /// 必須の環境変数が未設定または空
    #[error("必須の環境変数が設定されていません: {0}")]
    MissingEnvVar(String),

    /// サブドメインまたはベースURLからURLを構築できない
    #[error("ZendeskのURLが不正です: {0}")]
    InvalidUrl(String),
}

/// Zendesk API接続設定
///
/// # フィールド
/// - `tickets_url`: チケット作成エンドポイント (例: "https://example.zendesk.com/api/v2/tickets.json")
/// - `email`: APIトークンに紐づくアカウントのメールアドレス
/// - `api_token`: APIトークン（ログ・Debug出力には含めない）
#[derive(Clone)]
pub struct ZendeskConfig {
    tickets_url: Url,
    email: String,
    api_token: String,
}

impl fmt::Debug for ZendeskConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZendeskConfig")
            .field("tickets_url", &self.tickets_url.as_str())
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl ZendeskConfig {
    /// 新しい設定を作成
    ///
    /// # 引数
    /// - `subdomain`: Zendeskのサブドメイン（`{subdomain}.zendesk.com`）
    /// - `email`: アカウントのメールアドレス
    /// - `api_token`: APIトークン
    pub fn new(
        subdomain: impl AsRef<str>,
        email: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self, ZendeskConfigError> {
        let base_url = format!("https://{}.{}", subdomain.as_ref(), ZENDESK_DOMAIN);

        Ok(Self {
            tickets_url: Self::build_tickets_url(&base_url)?,
            email: email.into(),
            api_token: api_token.into(),
        })
    }

    /// 環境変数から設定を読み込み
    ///
    /// # 環境変数
    /// - `ZENDESK_SUBDOMAIN`: サブドメイン（必須）
    /// - `ZENDESK_EMAIL`: メールアドレス（必須）
    /// - `ZENDESK_API_TOKEN`: APIトークン（必須）
    ///
    /// 空文字は未設定として扱う。
    pub fn from_env() -> Result<Self, ZendeskConfigError> {
        let subdomain = required_env(SUBDOMAIN_ENV)?;
        let email = required_env(EMAIL_ENV)?;
        let api_token = required_env(API_TOKEN_ENV)?;

        Self::new(subdomain, email, api_token)
    }

    /// 接続先のベースURLを差し替える
    ///
    /// ローカルのモックサーバーやステージング環境に向ける場合に使用する。
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ZendeskConfigError> {
        self.tickets_url = Self::build_tickets_url(base_url)?;
        Ok(self)
    }

    fn build_tickets_url(base_url: &str) -> Result<Url, ZendeskConfigError> {
        let raw = format!("{}/{}", base_url.trim_end_matches('/'), TICKETS_PATH);
        Url::parse(&raw).map_err(|e| ZendeskConfigError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// チケット作成エンドポイントURLを取得
    pub fn tickets_url(&self) -> &Url {
        &self.tickets_url
    }

    /// メールアドレスを取得
    pub fn email(&self) -> &str {
        &self.email
    }

    /// APIトークンを取得
    pub fn api_token(&self) -> &str {
        &self.api_token
    }
}

fn required_env(key: &str) -> Result<String, ZendeskConfigError> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ZendeskConfigError::MissingEnvVar(key.to_string()))
}
