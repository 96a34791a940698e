use crate::application::pipeline::TooltipBinder;
use crate::domain::census::{AxisField, AxisRequest, Dataset, XField, YField};
use crate::domain::chart::{
    AxisState, ChartBackend, ChartConfig, ChartDimensions, ChartSurface, LabelClickHandler, LabelControl,
    LabelGroup, LabelPlacement, LabelSpec, Marker, MarkerSpec, ScaleBuilder, marker_position,
};
use crate::domain::errors::ChartResult;
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_info};

/// First draw of a generation: axes, markers, labels, tooltips, click wiring.
pub struct RenderChartUseCase<'a> {
    pub config: &'a ChartConfig,
    pub dimensions: ChartDimensions,
    pub generation: u64,
}

impl<'a> RenderChartUseCase<'a> {
    pub fn new(config: &'a ChartConfig, dimensions: ChartDimensions, generation: u64) -> Self {
        Self { config, dimensions, generation }
    }

    /// Scales are built before anything is drawn, so an empty dataset leaves
    /// the surface blank.
    pub fn execute<B: ChartBackend>(
        &self,
        backend: &mut B,
        dataset: Dataset,
        on_label_click: Option<LabelClickHandler>,
    ) -> ChartResult<ChartSurface> {
        let (x, y) = (self.config.default_x, self.config.default_y);
        let x_scale = ScaleBuilder::build(&dataset, x, self.dimensions.x_range())?;
        let y_scale = ScaleBuilder::build(&dataset, y, self.dimensions.y_range())?;
        log_debug!(
            LogComponent::Application("RenderChart"),
            "initial scales x={:?} y={:?}",
            x_scale.domain(),
            y_scale.domain()
        );

        let x_axis = backend.draw_axis(XField::SIDE, &x_scale)?;
        let y_axis = backend.draw_axis(YField::SIDE, &y_scale)?;

        let mut markers = Vec::with_capacity(dataset.len());
        for (record_index, record) in dataset.records().iter().enumerate() {
            let position = marker_position(record, &x_scale, x, &y_scale, y);
            let handle = backend.draw_marker(&MarkerSpec { text: &record.abbr, position }, &self.config.marker)?;
            markers.push(Marker { handle, record_index, abbr: record.abbr.clone(), position });
        }

        let x_labels = self.draw_labels(backend, &self.config.x_candidates, x)?;
        let y_labels = self.draw_labels(backend, &self.config.y_candidates, y)?;

        TooltipBinder::bind(backend, &markers, &dataset, (x, y), &self.config.tooltip)?;
        if let Some(handler) = on_label_click {
            backend.wire_label_clicks(handler)?;
        }

        log_info!(
            LogComponent::Application("RenderChart"),
            "generation {} rendered {} markers ({} x {})",
            self.generation,
            markers.len(),
            self.dimensions.chart_width,
            self.dimensions.chart_height
        );

        Ok(ChartSurface {
            generation: self.generation,
            dimensions: self.dimensions,
            dataset,
            x: AxisState::new(x, x_scale, x_axis, x_labels),
            y: AxisState::new(y, y_scale, y_axis, y_labels),
            markers,
        })
    }

    fn draw_labels<B, F>(&self, backend: &mut B, candidates: &[F], current: F) -> ChartResult<LabelGroup<F>>
    where
        B: ChartBackend,
        F: AxisField + Into<AxisRequest>,
    {
        let mut controls = Vec::with_capacity(candidates.len());
        for (index, &field) in candidates.iter().enumerate() {
            let active = field == current;
            let handle = backend.draw_label(&LabelSpec {
                text: field.label_text(),
                request: field.into(),
                placement: LabelPlacement::for_label(F::SIDE, index, &self.dimensions),
                active,
            })?;
            controls.push(LabelControl { field, handle, active });
        }
        LabelGroup::new(controls)
    }
}
