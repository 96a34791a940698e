use crate::application::pipeline::{AxisRenderer, PointRenderer, TooltipBinder};
use crate::domain::census::AxisField;
use crate::domain::chart::{
    AxisSlot, ChartBackend, ChartConfig, ChartSurface, LabelHandle, ScaleBuilder, SelectionOutcome,
};
use crate::domain::errors::ChartResult;
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_warn};

/// Axis selection state machine transition for one label click.
///
/// A re-click of the current field returns [`SelectionOutcome::Unchanged`]
/// without touching the backend. Otherwise the steps run in this order:
/// new scale, axis ruler, markers, tooltips, label flags. The other axis
/// keeps its scale. The choice, scale, markers and label flags change
/// together: if any backend step fails they are restored to the previous
/// selection before the error is returned.
pub struct SelectAxisUseCase<'a> {
    pub config: &'a ChartConfig,
}

impl<'a> SelectAxisUseCase<'a> {
    pub fn new(config: &'a ChartConfig) -> Self {
        Self { config }
    }

    pub fn execute<F, B>(
        &self,
        surface: &mut ChartSurface,
        backend: &mut B,
        requested: F,
    ) -> ChartResult<SelectionOutcome<F>>
    where
        F: AxisField,
        B: ChartBackend,
        ChartSurface: AxisSlot<F>,
    {
        let needs_change = AxisSlot::<F>::slot(&*surface).needs_change(requested).inspect_err(|e| {
            log_warn!(LogComponent::Application("SelectAxis"), "rejected: {}", e);
        })?;
        if !needs_change {
            log_debug!(LogComponent::Application("SelectAxis"), "{} already selected", requested);
            return Ok(SelectionOutcome::Unchanged);
        }

        let scale = ScaleBuilder::build(&surface.dataset, requested, surface.dimensions.range_for(F::SIDE))?;

        let previous_markers = surface.markers.clone();
        let slot = AxisSlot::<F>::slot_mut(&mut *surface);
        let previous_scale = *slot.scale();
        let previous = slot.commit(requested, scale);
        let label_flags = slot.activate_label(requested);

        if let Err(e) = self.redraw::<F, B>(surface, backend, &label_flags) {
            surface.markers = previous_markers;
            let slot = AxisSlot::<F>::slot_mut(&mut *surface);
            slot.commit(previous, previous_scale);
            slot.activate_label(previous);
            log_warn!(
                LogComponent::Application("SelectAxis"),
                "{} axis switch to {} failed, kept {}: {}",
                F::SIDE,
                requested,
                previous,
                e
            );
            return Err(e);
        }

        log_debug!(
            LogComponent::Application("SelectAxis"),
            "{} axis {} -> {}",
            F::SIDE,
            previous,
            requested
        );
        Ok(SelectionOutcome::Changed { previous, current: requested })
    }

    fn redraw<F, B>(
        &self,
        surface: &mut ChartSurface,
        backend: &mut B,
        label_flags: &[(LabelHandle, bool)],
    ) -> ChartResult<()>
    where
        F: AxisField,
        B: ChartBackend,
        ChartSurface: AxisSlot<F>,
    {
        let duration = self.config.transition_ms;
        let slot = AxisSlot::<F>::slot(&*surface);
        AxisRenderer::render(backend, slot.axis(), slot.scale(), duration)?;

        let (x, y) = surface.current_axes();
        PointRenderer::render(
            backend,
            &mut surface.markers,
            &surface.dataset,
            (surface.x.scale(), x),
            (surface.y.scale(), y),
            duration,
        )?;

        TooltipBinder::bind(backend, &surface.markers, &surface.dataset, (x, y), &self.config.tooltip)?;

        for &(label, active) in label_flags {
            backend.set_label_active(label, active)?;
        }
        Ok(())
    }
}
