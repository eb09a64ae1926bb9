//! CLI command handlers

pub mod commands;
pub mod thermometer;

pub use commands::{export, report, summary, watch, ReportOptions};
