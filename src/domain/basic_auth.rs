// Zendesk APIトークン認証用のBasic認証ヘッダー生成
//
// Zendeskは`{email}/token:{api_token}`をユーザー名:パスワードとして扱う。

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Authorizationヘッダー値を生成
///
/// `"Basic " + base64("{email}/token:{api_token}")`を返す（標準アルファベット、パディングあり）。
pub fn basic_auth_header(email: &str, api_token: &str) -> String {
    let credentials = format!("{email}/token:{api_token}");
    format!("Basic {}", STANDARD.encode(credentials))
}
