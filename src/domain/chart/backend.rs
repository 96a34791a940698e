use std::rc::Rc;

use super::config::{MarkerStyle, TooltipStyle};
use super::tooltip::TooltipBinding;
use super::value_objects::{
    AxisHandle, AxisSide, ChartDimensions, LabelHandle, LabelPlacement, LinearScale, MarkerHandle,
    Position,
};
use crate::domain::census::AxisRequest;
use crate::domain::errors::ChartResult;

/// Invoked with the typed choice a label carries when it is clicked.
pub type LabelClickHandler = Rc<dyn Fn(AxisRequest)>;

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec<'a> {
    pub text: &'a str,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerMove {
    pub marker: MarkerHandle,
    pub to: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpec {
    pub text: &'static str,
    pub request: AxisRequest,
    pub placement: LabelPlacement,
    pub active: bool,
}

/// Drawing primitives one chart generation is built from.
///
/// Handles returned by a backend are valid until the next [`clear`].
///
/// [`clear`]: ChartBackend::clear
pub trait ChartBackend {
    /// Drops every element, listener and running animation of the current
    /// surface. Calling it with nothing drawn is a no-op.
    fn clear(&mut self);

    fn create_surface(&mut self, dims: &ChartDimensions) -> ChartResult<()>;

    fn draw_axis(&mut self, side: AxisSide, scale: &LinearScale) -> ChartResult<AxisHandle>;

    /// Moves an existing ruler to `scale`; never creates a new one.
    fn transition_axis(&mut self, axis: AxisHandle, scale: &LinearScale, duration_ms: u32) -> ChartResult<()>;

    fn draw_marker(&mut self, spec: &MarkerSpec<'_>, style: &MarkerStyle) -> ChartResult<MarkerHandle>;

    /// Moves circles and their text together.
    fn transition_markers(&mut self, moves: &[MarkerMove], duration_ms: u32) -> ChartResult<()>;

    fn draw_label(&mut self, spec: &LabelSpec) -> ChartResult<LabelHandle>;

    fn set_label_active(&mut self, label: LabelHandle, active: bool) -> ChartResult<()>;

    /// Replaces all tooltip handlers of the surface with `bindings`.
    fn bind_tooltips(&mut self, bindings: Vec<TooltipBinding>, style: &TooltipStyle) -> ChartResult<()>;

    /// Attaches `handler` to every label drawn so far, replacing earlier wiring.
    fn wire_label_clicks(&mut self, handler: LabelClickHandler) -> ChartResult<()>;
}
