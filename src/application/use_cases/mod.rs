//! Application use cases driving a chart backend.

pub mod render_chart;
pub mod select_axis;

pub use render_chart::RenderChartUseCase;
pub use select_axis::SelectAxisUseCase;
