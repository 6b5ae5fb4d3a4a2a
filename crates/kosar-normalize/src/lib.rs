pub mod batch;
pub mod error;
pub mod files;
pub mod filter;
pub mod overrides;
pub mod parse;
pub mod reconcile;
pub mod resolve;
pub mod spar;
pub mod types;
pub mod units;

pub use batch::{normalize_csv, normalize_file, NormalizeSummary};
pub use error::NormalizeError;
pub use files::{current_stamp, dated_file_name, latest_data_file, DataFile};
pub use filter::{filter_columns, filter_file, FilterSummary};
pub use overrides::{OverrideTable, OverrideTables};
pub use parse::parse_size;
pub use reconcile::{reconcile, Outcome, Reconciliation};
pub use resolve::resolve_from_unit_price;
pub use spar::normalize_spar_row;
pub use types::SparRow;
pub use units::normalize;
