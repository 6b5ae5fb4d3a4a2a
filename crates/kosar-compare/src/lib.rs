//! `kosar-compare`: cross-checks two product CSVs (typically the same chain
//! scraped at two locations) by barcode, by name and by price.

pub mod classify;
pub mod engine;
pub mod error;
pub mod load;
pub mod model;
pub mod price;
pub mod report;

pub use engine::{compare_tables, run};
pub use error::CompareError;
pub use model::{CompareOptions, CompareReport, KeyField, KeyStatus, Record, Table};
pub use price::parse_price;
pub use report::{write_report, RunInfo};
