//! saludo-gateway
//!
//! An HTTP function host built with Tokio and Axum. It serves a forwarding
//! function that relays GET requests to a gateway-managed API, and a static
//! greeting function.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────┐
//!                        │                 SALUDO GATEWAY                   │
//!                        │                                                  │
//!   GET /api/Saludo...   │  ┌─────────┐    ┌────────────┐    ┌───────────┐  │
//!  ──────────────────────┼─▶│  http   │───▶│ forwarding │───▶│ upstream  │──┼──▶ API gateway
//!                        │  │ server  │    │  handler   │    │  client   │  │    (Ocp-Apim-
//!  ◀─────────────────────┼──│         │◀───│            │◀───│ (reqwest) │◀─┼──   Subscription-Key)
//!                        │  └─────────┘    └────────────┘    └───────────┘  │
//!   GET|POST /api/Greeting        │                                         │
//!  ──────────────────────┼────────┴──▶ greeting handler                     │
//!                        │                                                  │
//!                        │  config · observability · lifecycle              │
//!                        └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use saludo_gateway::lifecycle::{self, StartupOptions};

#[derive(Parser)]
#[command(name = "saludo-gateway")]
#[command(about = "HTTP function host relaying requests to a gateway-managed API", long_about = None)]
struct Cli {
    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listener address, overriding config and FUNCTIONS_CUSTOMHANDLER_PORT
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    lifecycle::start(StartupOptions {
        config_path: cli.config,
        bind_address: cli.bind,
    })
    .await
}
