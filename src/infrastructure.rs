// Infrastructure layer modules
pub mod logging;
pub mod ticket_forwarder;
pub mod zendesk_client;
pub mod zendesk_config;

// Re-exports
pub use logging::init_logging;
pub use ticket_forwarder::{ForwardError, TicketForwarder, UpstreamResponse};
pub use zendesk_client::ZendeskTicketClient;
pub use zendesk_config::{ZendeskConfig, ZendeskConfigError};
