//! HTTP function host that relays requests to a gateway-managed API.

pub mod config;
pub mod forwarding;
pub mod greeting;
pub mod http;
pub mod invocation;
pub mod lifecycle;
pub mod observability;

pub use config::schema::FunctionAppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
