//! Thermo - sales & gross-profit thermometer reports
//!
//! This library ingests a two-tab Excel workbook — daily per-company Sales
//! and Gross Profit figures in a semi-structured layout, plus monthly goals —
//! reshapes it into a tidy long-form table, and computes per-company pacing
//! against each 105% monthly goal.
//!
//! # Features
//!
//! - Header inference over irregular company/sub-header rows
//! - Row-wise reshaping into one record per (day, company) pair
//! - Permissive goal join (missing goal rows degrade to zero goals)
//! - Linear-pace math: expected position and required daily run-rate
//! - Content-addressed caching of parsed tables
//! - Terminal gauges, .xlsx/.json export, watch mode, HTTP API
//!
//! # Example
//!
//! ```no_run
//! use thermo::core::pace;
//! use thermo::excel::WorkbookImporter;
//! use thermo::types::Metric;
//!
//! let table = WorkbookImporter::new("october.xlsx").import()?;
//!
//! for company in &table.companies {
//!     let series = table.company_series(company, Metric::Sales);
//!     let goal = table.company_goal(company, Metric::Sales);
//!     let p = pace(&series, goal, 22);
//!     println!("{company}: {:.0}% of goal", p.percent_of_goal * 100.0);
//! }
//! # Ok::<(), thermo::error::ThermoError>(())
//! ```

pub mod api;
pub mod cache;
pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod sheet;
pub mod types;

// Re-export commonly used types
pub use error::{ThermoError, ThermoResult};
pub use types::{CompanyGoal, DailyRecord, DaysConfig, EnrichedRecord, Metric, ReportTable};
