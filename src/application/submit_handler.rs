// チケット送信プロキシハンドラー
//
// 受信したフォーム送信をZendeskへ転送し、ステータスコードとJSONボディを中継する。
// 全てのレスポンスにCORSヘッダーを付与する。

use crate::domain::{ProxyError, SubmitMethod};
use crate::infrastructure::{TicketForwarder, UpstreamResponse, ZendeskConfigError};
use lambda_http::http::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
};
use lambda_http::http::{Method, StatusCode};
use lambda_http::{Body, Request, RequestExt, Response};
use tracing::{error, info, warn};

/// チケット送信プロキシハンドラー
///
/// 設定の読み込み結果を保持する。読み込みに失敗していても
/// プリフライトと405は通常どおり応答し、POSTのみ500を返す。
pub struct SubmitHandler<F> {
    /// 転送先（設定エラー時はそのエラー）
    forwarder: Result<F, ZendeskConfigError>,
}

impl<F: TicketForwarder> SubmitHandler<F> {
    /// 転送先を指定してハンドラーを作成
    pub fn new(forwarder: F) -> Self {
        Self {
            forwarder: Ok(forwarder),
        }
    }

    /// 設定エラー状態のハンドラーを作成
    pub fn unconfigured(error: ZendeskConfigError) -> Self {
        Self {
            forwarder: Err(error),
        }
    }

    /// 設定の読み込み結果からハンドラーを作成
    pub fn from_result(forwarder: Result<F, ZendeskConfigError>) -> Self {
        Self { forwarder }
    }

    /// 転送先を取得（設定エラー時はNone）
    pub fn forwarder(&self) -> Option<&F> {
        self.forwarder.as_ref().ok()
    }

    /// Lambdaリクエストを処理
    ///
    /// メソッドとボディを取り出して`handle`に委譲する。
    /// バイナリボディはUTF-8として解釈し、不正なバイト列は置換文字になる。
    pub async fn handle_request(&self, request: Request) -> Response<Body> {
        let request_id = request
            .lambda_context_ref()
            .map(|ctx| ctx.request_id.clone())
            .unwrap_or_default();

        let (parts, body) = request.into_parts();
        let bytes: &[u8] = body.as_ref();
        let body = String::from_utf8_lossy(bytes);

        info!(
            request_id = %request_id,
            method = %parts.method,
            body_len = body.len(),
            "チケット送信リクエスト受信"
        );

        self.handle(&parts.method, &body).await
    }

    /// メソッドとボディからレスポンスを生成
    ///
    /// # 処理フロー
    /// 1. OPTIONS: 200 + 空ボディ
    /// 2. POST・OPTIONS以外: 405
    /// 3. 環境変数の不足: 500（URLを構築できない場合は5と同じ扱い）
    /// 4. Zendeskへ転送し、ステータスとJSONを中継
    /// 5. 転送失敗: 500 + details
    pub async fn handle(&self, method: &Method, body: &str) -> Response<Body> {
        match SubmitMethod::classify(method) {
            SubmitMethod::Preflight => Self::preflight_response(),
            SubmitMethod::NotAllowed => {
                warn!(method = %method, "許可されていないメソッド");
                Self::error_response(&ProxyError::MethodNotAllowed)
            }
            SubmitMethod::Submit => match self.submit(body).await {
                Ok(upstream) => Self::upstream_response(upstream),
                Err(e) => Self::error_response(&e),
            },
        }
    }

    /// ボディを転送先へ送信
    ///
    /// 1リクエストにつき上流呼び出しは高々1回。再試行・重複排除はしない。
    pub async fn submit(&self, body: &str) -> Result<UpstreamResponse, ProxyError> {
        let forwarder = self.forwarder.as_ref().map_err(|e| match e {
            ZendeskConfigError::MissingEnvVar(_) => {
                error!(error = %e, "Zendeskの設定が不足しているため転送できない");
                ProxyError::ConfigurationMissing
            }
            // 値は揃っているがURLにならない場合は接続失敗として扱う
            ZendeskConfigError::InvalidUrl(_) => {
                error!(error = %e, "ZendeskのURLを構築できないため転送できない");
                ProxyError::UpstreamUnreachable {
                    details: e.to_string(),
                }
            }
        })?;

        forwarder.forward(body).await.map_err(|e| {
            error!(error = %e, "チケットの転送に失敗");
            ProxyError::UpstreamUnreachable {
                details: e.details().to_string(),
            }
        })
    }

    /// プリフライトレスポンス（200、空ボディ）
    fn preflight_response() -> Response<Body> {
        Self::build_response(StatusCode::OK, Body::Empty, Self::build_cors_headers())
    }

    /// 上流のステータスとJSONを中継するレスポンス
    fn upstream_response(upstream: UpstreamResponse) -> Response<Body> {
        let status = match StatusCode::from_u16(upstream.status) {
            Ok(status) => status,
            Err(e) => {
                return Self::error_response(&ProxyError::UpstreamUnreachable {
                    details: e.to_string(),
                });
            }
        };

        if !status.is_success() {
            warn!(status = status.as_u16(), "Zendeskがエラーステータスを返却");
        }

        Self::json_response(status, upstream.body.to_string())
    }

    /// エラーレスポンス
    fn error_response(error: &ProxyError) -> Response<Body> {
        Self::json_response(error.status_code(), error.to_json())
    }

    fn json_response(status: StatusCode, json: String) -> Response<Body> {
        let mut headers = Self::build_cors_headers();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Self::build_response(status, Body::Text(json), headers)
    }

    fn build_response(status: StatusCode, body: Body, headers: HeaderMap) -> Response<Body> {
        let mut response = Response::new(body);
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        response
    }

    /// CORSヘッダーを生成
    ///
    /// - Access-Control-Allow-Origin: *
    /// - Access-Control-Allow-Methods: POST, OPTIONS
    /// - Access-Control-Allow-Headers: Content-Type
    pub fn build_cors_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        );

        headers
    }
}
