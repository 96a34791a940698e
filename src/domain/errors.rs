use derive_more::Display;

use crate::domain::chart::value_objects::AxisSide;

/// Errors raised anywhere in the chart pipeline.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum ChartError {
    /// The data resource could not be fetched or parsed.
    #[display(fmt = "Data load failure: {}", _0)]
    DataLoadFailure(String),
    /// A scale was requested over a dataset without records.
    #[display(fmt = "Dataset is empty; cannot compute scale bounds")]
    EmptyDataset,
    /// A selection named a field outside the axis's candidate set.
    #[display(fmt = "Invalid {} axis choice: {}", axis, value)]
    InvalidAxisChoice { axis: AxisSide, value: String },
    #[display(fmt = "Invalid configuration: {}", _0)]
    InvalidConfig(String),
    #[display(fmt = "Rendering error: {}", _0)]
    Rendering(String),
    /// A load completed for a generation that has since been replaced.
    #[display(fmt = "Stale generation {} (current is {})", actual, expected)]
    StaleGeneration { expected: u64, actual: u64 },
}

impl std::error::Error for ChartError {}

pub type ChartResult<T> = Result<T, ChartError>;

impl From<csv::Error> for ChartError {
    fn from(error: csv::Error) -> Self {
        ChartError::DataLoadFailure(error.to_string())
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(error: serde_json::Error) -> Self {
        ChartError::InvalidConfig(error.to_string())
    }
}

impl From<ChartError> for wasm_bindgen::JsValue {
    fn from(error: ChartError) -> Self {
        wasm_bindgen::JsValue::from_str(&error.to_string())
    }
}
