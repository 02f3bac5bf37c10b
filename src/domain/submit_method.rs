// 受信リクエストのHTTPメソッド分類
//
// CORSプリフライト（OPTIONS）、チケット送信（POST）、それ以外の3種に分ける。

use lambda_http::http::Method;

/// 受信メソッドの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMethod {
    /// CORSプリフライト（OPTIONS）
    Preflight,
    /// チケット送信（POST）
    Submit,
    /// 許可されていないメソッド
    NotAllowed,
}

impl SubmitMethod {
    /// HTTPメソッドを分類
    ///
    /// # Arguments
    /// * `method` - 受信リクエストのHTTPメソッド
    pub fn classify(method: &Method) -> Self {
        if *method == Method::OPTIONS {
            Self::Preflight
        } else if *method == Method::POST {
            Self::Submit
        } else {
            Self::NotAllowed
        }
    }
}
