//! The three renderers every axis switch runs through, in order.

use crate::domain::census::{Dataset, XField, YField};
use crate::domain::chart::{
    AxisHandle, ChartBackend, LinearScale, Marker, MarkerMove, TooltipBinding, TooltipContent, TooltipStyle,
    marker_position,
};
use crate::domain::errors::ChartResult;
use crate::domain::logging::LogComponent;
use crate::log_debug;

/// Axis Renderer: animates an existing ruler to a new scale.
pub struct AxisRenderer;

impl AxisRenderer {
    pub fn render<B: ChartBackend>(
        backend: &mut B,
        axis: AxisHandle,
        scale: &LinearScale,
        duration_ms: u32,
    ) -> ChartResult<()> {
        log_debug!(
            LogComponent::Application("AxisRenderer"),
            "axis {:?} -> domain {:?} over {}ms",
            axis,
            scale.domain(),
            duration_ms
        );
        backend.transition_axis(axis, scale, duration_ms)
    }
}

/// Point Renderer: moves every marker (and its text) to its new position.
pub struct PointRenderer;

impl PointRenderer {
    /// Updates `markers` in place and issues one move per marker. Returns
    /// how many markers were moved.
    pub fn render<B: ChartBackend>(
        backend: &mut B,
        markers: &mut [Marker],
        dataset: &Dataset,
        (x_scale, x): (&LinearScale, XField),
        (y_scale, y): (&LinearScale, YField),
        duration_ms: u32,
    ) -> ChartResult<usize> {
        let mut moves = Vec::with_capacity(markers.len());
        for marker in markers.iter_mut() {
            let Some(record) = dataset.get(marker.record_index) else {
                continue;
            };
            marker.position = marker_position(record, x_scale, x, y_scale, y);
            moves.push(MarkerMove { marker: marker.handle, to: marker.position });
        }
        log_debug!(
            LogComponent::Application("PointRenderer"),
            "moving {} markers to ({}, {})",
            moves.len(),
            x,
            y
        );
        backend.transition_markers(&moves, duration_ms)?;
        Ok(moves.len())
    }
}

/// Tooltip Binder: rebuilds every marker's tooltip for the current fields.
pub struct TooltipBinder;

impl TooltipBinder {
    pub fn bindings(markers: &[Marker], dataset: &Dataset, x: XField, y: YField) -> Vec<TooltipBinding> {
        markers
            .iter()
            .filter_map(|marker| {
                dataset.get(marker.record_index).map(|record| TooltipBinding {
                    marker: marker.handle,
                    content: TooltipContent::for_record(record, x, y),
                })
            })
            .collect()
    }

    pub fn bind<B: ChartBackend>(
        backend: &mut B,
        markers: &[Marker],
        dataset: &Dataset,
        (x, y): (XField, YField),
        style: &TooltipStyle,
    ) -> ChartResult<()> {
        let bindings = Self::bindings(markers, dataset, x, y);
        log_debug!(
            LogComponent::Application("TooltipBinder"),
            "binding {} tooltips on {} for ({}, {})",
            bindings.len(),
            style.trigger,
            x,
            y
        );
        backend.bind_tooltips(bindings, style)
    }
}
