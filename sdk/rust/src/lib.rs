//! Client for the functions served by saludo-gateway.

pub mod client;

pub use client::{FunctionClient, FunctionResponse};
