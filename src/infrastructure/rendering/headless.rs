//! In-memory backend that records the scene instead of drawing it.
//!
//! Transitions complete instantly. Used by native tests and by hosts that
//! only need the layout (e.g. server-side previews).

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::census::AxisRequest;
use crate::domain::chart::{
    AxisHandle, AxisSide, ChartBackend, ChartDimensions, LabelClickHandler, LabelHandle, LabelPlacement, LabelSpec,
    LinearScale, MarkerHandle, MarkerMove, MarkerSpec, MarkerStyle, Position, TooltipBinding, TooltipContent,
    TooltipStyle, TooltipTrigger,
};
use crate::domain::errors::{ChartError, ChartResult};

/// One backend call, in the order it was made.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BackendCall {
    Clear,
    CreateSurface,
    DrawAxis(AxisSide),
    TransitionAxis(usize),
    DrawMarker(String),
    TransitionMarkers(usize),
    DrawLabel(&'static str),
    SetLabelActive(usize, bool),
    BindTooltips(usize),
    WireLabelClicks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlessAxis {
    pub side: AxisSide,
    pub scale: LinearScale,
    pub ticks: Vec<String>,
    pub transitions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlessMarker {
    pub text: String,
    pub position: Position,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlessLabel {
    pub text: &'static str,
    pub request: String,
    pub placement: LabelPlacement,
    pub active: bool,
    #[serde(skip)]
    typed_request: AxisRequest,
}

impl HeadlessLabel {
    pub fn request(&self) -> AxisRequest {
        self.typed_request
    }
}

#[derive(Default)]
pub struct HeadlessBackend {
    surface: Option<ChartDimensions>,
    axes: Vec<HeadlessAxis>,
    markers: Vec<HeadlessMarker>,
    labels: Vec<HeadlessLabel>,
    tooltips: HashMap<MarkerHandle, TooltipContent>,
    tooltip_trigger: Option<TooltipTrigger>,
    click_handler: Option<LabelClickHandler>,
    calls: Vec<BackendCall>,
    surfaces_created: usize,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surface(&self) -> Option<&ChartDimensions> {
        self.surface.as_ref()
    }

    /// Surfaces created over the backend's lifetime.
    pub fn surfaces_created(&self) -> usize {
        self.surfaces_created
    }

    pub fn axes(&self) -> &[HeadlessAxis] {
        &self.axes
    }

    pub fn axis(&self, side: AxisSide) -> Option<&HeadlessAxis> {
        self.axes.iter().find(|a| a.side == side)
    }

    pub fn markers(&self) -> &[HeadlessMarker] {
        &self.markers
    }

    pub fn labels(&self) -> &[HeadlessLabel] {
        &self.labels
    }

    pub fn active_labels(&self) -> Vec<&'static str> {
        self.labels.iter().filter(|l| l.active).map(|l| l.text).collect()
    }

    pub fn label_by_text(&self, text: &str) -> Option<LabelHandle> {
        self.labels.iter().position(|l| l.text == text).map(LabelHandle)
    }

    pub fn tooltip_trigger(&self) -> Option<TooltipTrigger> {
        self.tooltip_trigger
    }

    pub fn tooltip_count(&self) -> usize {
        self.tooltips.len()
    }

    /// What a pointer over `marker` would show.
    pub fn tooltip_for(&self, marker: MarkerHandle) -> Option<&TooltipContent> {
        self.tooltips.get(&marker)
    }

    pub fn tooltip_for_abbr(&self, abbr: &str) -> Option<&TooltipContent> {
        let index = self.markers.iter().position(|m| m.text == abbr)?;
        self.tooltip_for(MarkerHandle(index))
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<BackendCall> {
        std::mem::take(&mut self.calls)
    }

    /// Simulates a click on `label`, invoking the wired handler.
    pub fn click_label(&self, label: LabelHandle) -> ChartResult<()> {
        let request = self
            .labels
            .get(label.0)
            .ok_or_else(|| ChartError::Rendering(format!("unknown label {:?}", label)))?
            .typed_request;
        let handler = self
            .click_handler
            .as_ref()
            .ok_or_else(|| ChartError::Rendering("label clicks are not wired".into()))?;
        handler(request);
        Ok(())
    }

    fn require_surface(&self) -> ChartResult<()> {
        self.surface
            .map(|_| ())
            .ok_or_else(|| ChartError::Rendering("no surface; call create_surface first".into()))
    }
}

impl ChartBackend for HeadlessBackend {
    fn clear(&mut self) {
        self.calls.push(BackendCall::Clear);
        self.surface = None;
        self.axes.clear();
        self.markers.clear();
        self.labels.clear();
        self.tooltips.clear();
        self.tooltip_trigger = None;
        self.click_handler = None;
    }

    fn create_surface(&mut self, dims: &ChartDimensions) -> ChartResult<()> {
        self.calls.push(BackendCall::CreateSurface);
        self.surface = Some(*dims);
        self.surfaces_created += 1;
        Ok(())
    }

    fn draw_axis(&mut self, side: AxisSide, scale: &LinearScale) -> ChartResult<AxisHandle> {
        self.require_surface()?;
        self.calls.push(BackendCall::DrawAxis(side));
        self.axes.push(HeadlessAxis { side, scale: *scale, ticks: tick_labels(scale), transitions: 0 });
        Ok(AxisHandle(self.axes.len() - 1))
    }

    fn transition_axis(&mut self, axis: AxisHandle, scale: &LinearScale, _duration_ms: u32) -> ChartResult<()> {
        self.calls.push(BackendCall::TransitionAxis(axis.0));
        let entry = self
            .axes
            .get_mut(axis.0)
            .ok_or_else(|| ChartError::Rendering(format!("unknown axis {:?}", axis)))?;
        entry.scale = *scale;
        entry.ticks = tick_labels(scale);
        entry.transitions += 1;
        Ok(())
    }

    fn draw_marker(&mut self, spec: &MarkerSpec<'_>, style: &MarkerStyle) -> ChartResult<MarkerHandle> {
        self.require_surface()?;
        self.calls.push(BackendCall::DrawMarker(spec.text.to_string()));
        self.markers.push(HeadlessMarker { text: spec.text.to_string(), position: spec.position, radius: style.radius });
        Ok(MarkerHandle(self.markers.len() - 1))
    }

    fn transition_markers(&mut self, moves: &[MarkerMove], _duration_ms: u32) -> ChartResult<()> {
        self.calls.push(BackendCall::TransitionMarkers(moves.len()));
        for mv in moves {
            let marker = self
                .markers
                .get_mut(mv.marker.0)
                .ok_or_else(|| ChartError::Rendering(format!("unknown marker {:?}", mv.marker)))?;
            marker.position = mv.to;
        }
        Ok(())
    }

    fn draw_label(&mut self, spec: &LabelSpec) -> ChartResult<LabelHandle> {
        self.require_surface()?;
        self.calls.push(BackendCall::DrawLabel(spec.text));
        self.labels.push(HeadlessLabel {
            text: spec.text,
            request: spec.request.to_string(),
            placement: spec.placement,
            active: spec.active,
            typed_request: spec.request,
        });
        Ok(LabelHandle(self.labels.len() - 1))
    }

    fn set_label_active(&mut self, label: LabelHandle, active: bool) -> ChartResult<()> {
        self.calls.push(BackendCall::SetLabelActive(label.0, active));
        let entry = self
            .labels
            .get_mut(label.0)
            .ok_or_else(|| ChartError::Rendering(format!("unknown label {:?}", label)))?;
        entry.active = active;
        Ok(())
    }

    fn bind_tooltips(&mut self, bindings: Vec<TooltipBinding>, style: &TooltipStyle) -> ChartResult<()> {
        self.calls.push(BackendCall::BindTooltips(bindings.len()));
        self.tooltips = bindings.into_iter().map(|b| (b.marker, b.content)).collect();
        self.tooltip_trigger = Some(style.trigger);
        Ok(())
    }

    fn wire_label_clicks(&mut self, handler: LabelClickHandler) -> ChartResult<()> {
        self.calls.push(BackendCall::WireLabelClicks);
        self.click_handler = Some(handler);
        Ok(())
    }
}

fn tick_labels(scale: &LinearScale) -> Vec<String> {
    scale.ticks(10).into_iter().map(|t| scale.tick_format(10, t)).collect()
}
