//! Forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! InboundRequest
//!     → handler.rs (credentials check, param extraction)
//!     → target.rs (parse base URL, merge forwarded params)
//!     → upstream.rs (GET + Ocp-Apim-Subscription-Key)
//!     → handler.rs (2xx relay, or error.rs mapping)
//!     → OutboundResponse
//! ```

pub mod error;
pub mod handler;
pub mod target;
pub mod upstream;

pub use error::{ErrorKind, ForwardError, TransportError};
pub use handler::ForwardingHandler;
pub use upstream::{ReqwestUpstream, UpstreamClient, UpstreamRequest, UpstreamResponse, SUBSCRIPTION_KEY_HEADER};
