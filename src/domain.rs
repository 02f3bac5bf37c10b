// Domain layer modules
pub mod basic_auth;
pub mod proxy_error;
pub mod submit_method;

// Re-exports
pub use basic_auth::basic_auth_header;
pub use proxy_error::{ErrorBody, ProxyError};
pub use submit_method::SubmitMethod;
