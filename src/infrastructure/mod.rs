pub mod http;
pub mod rendering;
pub mod services;

pub use http::{CsvDatasetRepository, parse_census_csv};
pub use rendering::{HeadlessBackend, SvgBackend};
