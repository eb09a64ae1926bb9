//! Thermo API server binary
//!
//! HTTP REST API serving the tidy table and pacing numbers.

use clap::Parser;
use thermo::api::{run_api_server, server::ApiConfig};

#[derive(Parser, Debug)]
#[command(name = "thermo-server")]
#[command(version)]
#[command(about = "Thermo API Server - HTTP API for thermometer reports")]
#[command(long_about = r#"
Thermo API Server

Provides RESTful endpoints over the tidy sales/GP table:
  - POST /api/v1/report  - Tidy table plus per-company pacing
  - POST /api/v1/summary - Workbook-wide summary statistics

Additional endpoints:
  - GET  /health         - Health check
  - GET  /version        - Server version info
  - GET  /               - API documentation

Features:
  - CORS enabled for cross-origin requests
  - Graceful shutdown on SIGINT/SIGTERM
  - JSON response format with request IDs
  - Content-addressed caching of the latest parsed workbook

Example usage:
  thermo-server                           # Start on localhost:8080
  thermo-server --host 0.0.0.0 --port 3000

  curl -X POST http://localhost:8080/api/v1/report \
    -H "Content-Type: application/json" \
    -d '{"file_path": "october.xlsx", "total_days": 20}'
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "THERMO_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "THERMO_PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
    };

    run_api_server(config).await
}
