//! HTTP report API module
//!
//! Serves the tidy table and pacing numbers over REST.
//! Run with `thermo-server`.

pub mod handlers;
pub mod server;

pub use server::run_api_server;
