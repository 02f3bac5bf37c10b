// アプリケーション層モジュール
pub mod submit_handler;

// 再エクスポート
pub use submit_handler::SubmitHandler;
