//! Pacing math and summary statistics over the tidy table

pub mod pace;
pub mod summary;

pub use pace::{company_pacing, pace, CompanyPacing, Pace};
pub use summary::{summarize, Summary};
