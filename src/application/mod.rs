pub mod coordinator;
pub mod pipeline;
pub mod use_cases;

pub use coordinator::{AxisSelection, ChartCoordinator, GenerationToken};
