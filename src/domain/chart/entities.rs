use serde::Serialize;

use super::value_objects::{AxisHandle, ChartDimensions, LabelHandle, LinearScale, MarkerHandle, Position};
use crate::domain::census::{AxisField, Dataset, XField, YField};
use crate::domain::errors::{ChartError, ChartResult};

/// One plotted point, bound to the record at `record_index`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub handle: MarkerHandle,
    pub record_index: usize,
    pub abbr: String,
    /// Target of the latest transition.
    pub position: Position,
}

/// A clickable axis title that selects `field` for its axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelControl<F> {
    pub field: F,
    pub handle: LabelHandle,
    pub active: bool,
}

/// All label controls of one axis; exactly one of them is active.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelGroup<F> {
    controls: Vec<LabelControl<F>>,
}

impl<F: AxisField> LabelGroup<F> {
    /// `controls` must mark exactly one entry active.
    pub fn new(controls: Vec<LabelControl<F>>) -> ChartResult<Self> {
        let group = Self { controls };
        if group.active_count() != 1 {
            return Err(ChartError::Rendering(format!(
                "{} axis label group has {} active labels",
                F::SIDE,
                group.active_count()
            )));
        }
        Ok(group)
    }

    pub fn controls(&self) -> &[LabelControl<F>] {
        &self.controls
    }

    pub fn contains(&self, field: F) -> bool {
        self.controls.iter().any(|c| c.field == field)
    }

    pub fn active(&self) -> Option<F> {
        self.controls.iter().find(|c| c.active).map(|c| c.field)
    }

    pub fn active_count(&self) -> usize {
        self.controls.iter().filter(|c| c.active).count()
    }

    /// Marks `field` active and its siblings inactive. Returns the labels
    /// whose flag flipped, so only those need restyling.
    pub fn activate(&mut self, field: F) -> Vec<(LabelHandle, bool)> {
        self.controls
            .iter_mut()
            .filter_map(|control| {
                let active = control.field == field;
                (control.active != active).then(|| {
                    control.active = active;
                    (control.handle, active)
                })
            })
            .collect()
    }
}

/// Outcome of validating a requested choice against the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome<F> {
    /// Requested field is already current; nothing happens.
    Unchanged,
    Changed { previous: F, current: F },
}

/// Selection state of one axis: chosen field, its scale, ruler and labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisState<F> {
    current: F,
    scale: LinearScale,
    axis: AxisHandle,
    labels: LabelGroup<F>,
}

impl<F: AxisField> AxisState<F> {
    pub fn new(current: F, scale: LinearScale, axis: AxisHandle, labels: LabelGroup<F>) -> Self {
        Self { current, scale, axis, labels }
    }

    pub fn current(&self) -> F {
        self.current
    }

    pub fn scale(&self) -> &LinearScale {
        &self.scale
    }

    pub fn axis(&self) -> AxisHandle {
        self.axis
    }

    pub fn labels(&self) -> &LabelGroup<F> {
        &self.labels
    }

    /// `Ok(false)` for a re-click of the current field, `Err` for a field
    /// this chart offers no label for.
    pub fn needs_change(&self, requested: F) -> ChartResult<bool> {
        if !self.labels.contains(requested) {
            return Err(ChartError::InvalidAxisChoice { axis: F::SIDE, value: requested.to_string() });
        }
        Ok(requested != self.current)
    }

    pub fn commit(&mut self, field: F, scale: LinearScale) -> F {
        self.scale = scale;
        std::mem::replace(&mut self.current, field)
    }

    pub fn activate_label(&mut self, field: F) -> Vec<(LabelHandle, bool)> {
        self.labels.activate(field)
    }
}

/// Rendered content of one chart generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSurface {
    pub generation: u64,
    pub dimensions: ChartDimensions,
    pub dataset: Dataset,
    pub x: AxisState<XField>,
    pub y: AxisState<YField>,
    pub markers: Vec<Marker>,
}

impl ChartSurface {
    pub fn current_axes(&self) -> (XField, YField) {
        (self.x.current(), self.y.current())
    }
}

/// Gives generic pipeline code access to the slot of one axis.
pub trait AxisSlot<F: AxisField> {
    fn slot(&self) -> &AxisState<F>;
    fn slot_mut(&mut self) -> &mut AxisState<F>;
}

impl AxisSlot<XField> for ChartSurface {
    fn slot(&self) -> &AxisState<XField> {
        &self.x
    }

    fn slot_mut(&mut self) -> &mut AxisState<XField> {
        &mut self.x
    }
}

impl AxisSlot<YField> for ChartSurface {
    fn slot(&self) -> &AxisState<YField> {
        &self.y
    }

    fn slot_mut(&mut self) -> &mut AxisState<YField> {
        &mut self.y
    }
}
