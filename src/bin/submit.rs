/// チケット送信HTTP Lambdaエントリポイント
///
/// Lambda Function URL経由のフォーム送信を受け取り、
/// Zendesk Tickets APIへ転送してレスポンスを中継する。
///
/// Zendeskの認証情報は起動時に一度だけ環境変数から読み込む。
use lambda_http::{run, service_fn, Error, Request};
use ticket_proxy::application::SubmitHandler;
use ticket_proxy::infrastructure::{init_logging, ZendeskConfig, ZendeskTicketClient};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("チケット送信Lambda関数を初期化");

    let handler = build_handler();
    let handler_ref = &handler;

    run(service_fn(move |request: Request| async move {
        Ok::<_, Error>(handler_ref.handle_request(request).await)
    }))
    .await
}

/// 環境変数からハンドラーを構築
///
/// 設定が不足している場合もハンドラーは作成し、POSTに500を返させる。
fn build_handler() -> SubmitHandler<ZendeskTicketClient> {
    let forwarder = ZendeskConfig::from_env().map(ZendeskTicketClient::new);

    if let Err(e) = &forwarder {
        error!(error = %e, "Zendesk設定の読み込みに失敗");
    }

    SubmitHandler::from_result(forwarder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_http::http::Request as HttpRequest;
    use lambda_http::Body;
    use serial_test::serial;

    // テストで環境変数を安全に設定/削除するヘルパー
    // 注: Rust 2024エディションでset_var/remove_varはunsafe
    unsafe fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    unsafe fn cleanup_zendesk_env() {
        unsafe {
            std::env::remove_var("ZENDESK_SUBDOMAIN");
            std::env::remove_var("ZENDESK_EMAIL");
            std::env::remove_var("ZENDESK_API_TOKEN");
        }
    }

    fn request(method: &str, body: Body) -> Request {
        HttpRequest::builder()
            .method(method)
            .uri("/")
            .header("Content-Type", "application/json")
            .body(body)
            .unwrap()
    }

    fn body_text(body: &Body) -> String {
        let bytes: &[u8] = body.as_ref();
        String::from_utf8_lossy(bytes).into_owned()
    }

    /// 環境変数が空の状態でPOSTすると500
    #[tokio::test]
    #[serial(zendesk_env)]
    async fn test_post_with_empty_environment_returns_500() {
        init_logging();
        unsafe { cleanup_zendesk_env() };

        let handler = build_handler();
        let response = handler
            .handle_request(request("POST", Body::from(r#"{"subject":"test"}"#)))
            .await;

        assert_eq!(response.status(), 500);
        let parsed: serde_json::Value = serde_json::from_str(&body_text(response.body())).unwrap();
        assert_eq!(parsed["error"], "Missing Zendesk environment variables");
    }

    /// 一部だけ設定されていても500
    #[tokio::test]
    #[serial(zendesk_env)]
    async fn test_post_with_partial_environment_returns_500() {
        init_logging();
        unsafe {
            cleanup_zendesk_env();
            set_env("ZENDESK_SUBDOMAIN", "acme");
            set_env("ZENDESK_EMAIL", "a@b.com");
        }

        let handler = build_handler();
        let response = handler
            .handle_request(request("POST", Body::from("{}")))
            .await;

        assert_eq!(response.status(), 500);
        assert!(body_text(response.body()).contains("\"error\""));

        unsafe { cleanup_zendesk_env() };
    }

    /// 環境変数が空でもプリフライトは200
    #[tokio::test]
    #[serial(zendesk_env)]
    async fn test_options_with_empty_environment_returns_200() {
        init_logging();
        unsafe { cleanup_zendesk_env() };

        let handler = build_handler();
        let response = handler.handle_request(request("OPTIONS", Body::Empty)).await;

        assert_eq!(response.status(), 200);
        assert_eq!(body_text(response.body()), "");
        assert!(response.headers().get("access-control-allow-origin").is_some());
        assert!(response.headers().get("access-control-allow-methods").is_some());
        assert!(response.headers().get("access-control-allow-headers").is_some());
    }

    #[tokio::test]
    #[serial(zendesk_env)]
    async fn test_get_returns_405() {
        init_logging();
        unsafe { cleanup_zendesk_env() };

        let handler = build_handler();
        let response = handler.handle_request(request("GET", Body::Empty)).await;

        assert_eq!(response.status(), 405);
        assert_eq!(body_text(response.body()), r#"{"error":"Method not allowed"}"#);
    }

    /// 環境変数が揃っていればサブドメインからURLを構築したクライアントを持つ
    #[tokio::test]
    #[serial(zendesk_env)]
    async fn test_build_handler_reads_environment() {
        init_logging();
        unsafe {
            cleanup_zendesk_env();
            set_env("ZENDESK_SUBDOMAIN", "acme");
            set_env("ZENDESK_EMAIL", "a@b.com");
            set_env("ZENDESK_API_TOKEN", "tok");
        }

        let handler = build_handler();
        let client = handler.forwarder().expect("クライアントが構築されていない");

        assert_eq!(
            client.config().tickets_url().as_str(),
            "https://acme.zendesk.com/api/v2/tickets.json"
        );
        assert_eq!(client.config().email(), "a@b.com");

        unsafe { cleanup_zendesk_env() };
    }
}
