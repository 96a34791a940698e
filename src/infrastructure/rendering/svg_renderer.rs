use leptos::SignalSet;
use gloo::events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MouseEvent};

use super::animation::{AttrFormat, Animator, numeric_attr};
use crate::app::TooltipData;
use crate::domain::census::AxisRequest;
use crate::domain::chart::{
    AxisHandle, AxisSide, ChartBackend, ChartDimensions, LabelClickHandler, LabelHandle, LabelSpec, LinearScale,
    MarkerHandle, MarkerMove, MarkerSpec, MarkerStyle, TooltipBinding, TooltipContent, TooltipStyle, TooltipTrigger,
};
use crate::domain::errors::{ChartError, ChartResult};
use crate::domain::logging::LogComponent;
use crate::event_utils::{EventOptions, listen_with_options};
use crate::global_state::{tooltip_data, tooltip_visible};
use crate::{log_debug, log_warn};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const TICK_COUNT: usize = 10;
const TICK_SIZE: f64 = 6.0;

struct SvgAxis {
    side: AxisSide,
    group: Element,
    scale: LinearScale,
}

struct SvgMarker {
    circle: Element,
    text: Element,
}

struct SvgLabel {
    element: Element,
    request: AxisRequest,
}

/// Draws the chart as SVG under the element matched by `container`.
pub struct SvgBackend {
    container: String,
    document: Document,
    svg: Option<Element>,
    chart_group: Option<Element>,
    dims: Option<ChartDimensions>,
    axes: Vec<SvgAxis>,
    markers: Vec<SvgMarker>,
    labels: Vec<SvgLabel>,
    tooltip_listeners: Vec<EventListener>,
    click_listeners: Vec<EventListener>,
    animator: Animator,
}

impl SvgBackend {
    pub fn new(container: impl Into<String>) -> ChartResult<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ChartError::Rendering("document not available".into()))?;
        Ok(Self {
            container: container.into(),
            document,
            svg: None,
            chart_group: None,
            dims: None,
            axes: Vec::new(),
            markers: Vec::new(),
            labels: Vec::new(),
            tooltip_listeners: Vec::new(),
            click_listeners: Vec::new(),
            animator: Animator::new(),
        })
    }

    fn create(&self, tag: &str, class: Option<&str>) -> ChartResult<Element> {
        let element = self.document.create_element_ns(Some(SVG_NS), tag).map_err(dom_err)?;
        if let Some(class) = class {
            set_attr(&element, "class", class)?;
        }
        Ok(element)
    }

    fn chart_group(&self) -> ChartResult<&Element> {
        self.chart_group
            .as_ref()
            .ok_or_else(|| ChartError::Rendering("no surface; call create_surface first".into()))
    }

    fn dims(&self) -> ChartResult<ChartDimensions> {
        self.dims.ok_or_else(|| ChartError::Rendering("no surface; call create_surface first".into()))
    }

    /// Replaces the ticks of `axis`. With `previous` set, each tick slides in
    /// from where its value sat on the old scale.
    fn render_ticks(&mut self, axis: usize, previous: Option<LinearScale>, duration_ms: u32) -> ChartResult<()> {
        let (side, group, scale) = match self.axes.get(axis) {
            Some(a) => (a.side, a.group.clone(), a.scale),
            None => return Err(ChartError::Rendering(format!("unknown axis {}", axis))),
        };
        group.set_inner_html("");

        let (r0, r1) = scale.range();
        let domain_path = match side {
            AxisSide::Bottom => format!("M{r0},{TICK_SIZE}V0H{r1}V{TICK_SIZE}"),
            AxisSide::Left => format!("M-{TICK_SIZE},{r0}H0V{r1}H-{TICK_SIZE}"),
        };
        let path = self.create("path", Some("domain"))?;
        set_attr(&path, "d", &domain_path)?;
        set_attr(&path, "fill", "none")?;
        set_attr(&path, "stroke", "currentColor")?;
        group.append_child(&path).map_err(dom_err)?;

        let format = match side {
            AxisSide::Bottom => AttrFormat::TranslateX,
            AxisSide::Left => AttrFormat::TranslateY,
        };
        for value in scale.ticks(TICK_COUNT) {
            let tick = self.create("g", Some("tick"))?;
            let line = self.create("line", None)?;
            let text = self.create("text", None)?;
            set_attr(&line, "stroke", "currentColor")?;
            set_attr(&text, "fill", "currentColor")?;
            match side {
                AxisSide::Bottom => {
                    set_attr(&line, "y2", &TICK_SIZE.to_string())?;
                    set_attr(&text, "y", "9")?;
                    set_attr(&text, "dy", "0.71em")?;
                    set_attr(&text, "text-anchor", "middle")?;
                }
                AxisSide::Left => {
                    set_attr(&line, "x2", &(-TICK_SIZE).to_string())?;
                    set_attr(&text, "x", "-9")?;
                    set_attr(&text, "dy", "0.32em")?;
                    set_attr(&text, "text-anchor", "end")?;
                }
            }
            text.set_text_content(Some(&scale.tick_format(TICK_COUNT, value)));
            tick.append_child(&line).map_err(dom_err)?;
            tick.append_child(&text).map_err(dom_err)?;
            group.append_child(&tick).map_err(dom_err)?;

            let to = scale.apply(value);
            let from = previous.map_or(to, |old| old.apply(value));
            self.animator.animate(&tick, "transform", format, from, to, if previous.is_some() { duration_ms } else { 0 });
        }
        Ok(())
    }

    fn show_tooltip(content: &TooltipContent, event: &web_sys::Event, offset: (f64, f64)) {
        let (page_x, page_y) = event
            .dyn_ref::<MouseEvent>()
            .map(|e| (e.page_x() as f64, e.page_y() as f64))
            .unwrap_or_default();
        tooltip_data().set(Some(TooltipData::new(content, page_x, page_y, offset)));
        tooltip_visible().set(true);
    }
}

impl ChartBackend for SvgBackend {
    fn clear(&mut self) {
        self.animator.cancel_all();
        self.tooltip_listeners.clear();
        self.click_listeners.clear();
        self.axes.clear();
        self.markers.clear();
        self.labels.clear();
        self.chart_group = None;
        self.dims = None;
        if let Some(svg) = self.svg.take() {
            svg.remove();
        }
        tooltip_visible().set(false);
    }

    fn create_surface(&mut self, dims: &ChartDimensions) -> ChartResult<()> {
        let host = self
            .document
            .query_selector(&self.container)
            .map_err(dom_err)?
            .ok_or_else(|| ChartError::Rendering(format!("container {} not found", self.container)))?;

        let svg = self.create("svg", None)?;
        set_attr(&svg, "width", &dims.svg_width.to_string())?;
        set_attr(&svg, "height", &dims.svg_height.to_string())?;
        let group = self.create("g", None)?;
        set_attr(&group, "transform", &format!("translate({}, {})", dims.margin.left, dims.margin.top))?;
        svg.append_child(&group).map_err(dom_err)?;
        host.append_child(&svg).map_err(dom_err)?;

        log_debug!(
            LogComponent::Infrastructure("SvgBackend"),
            "surface {}x{} in {}",
            dims.svg_width,
            dims.svg_height,
            self.container
        );
        self.svg = Some(svg);
        self.chart_group = Some(group);
        self.dims = Some(*dims);
        Ok(())
    }

    fn draw_axis(&mut self, side: AxisSide, scale: &LinearScale) -> ChartResult<AxisHandle> {
        let dims = self.dims()?;
        let class = match side {
            AxisSide::Bottom => "x-axis",
            AxisSide::Left => "y-axis",
        };
        let group = self.create("g", Some(class))?;
        if side == AxisSide::Bottom {
            set_attr(&group, "transform", &format!("translate(0, {})", dims.chart_height))?;
        }
        self.chart_group()?.append_child(&group).map_err(dom_err)?;
        self.axes.push(SvgAxis { side, group, scale: *scale });
        let index = self.axes.len() - 1;
        self.render_ticks(index, None, 0)?;
        Ok(AxisHandle(index))
    }

    fn transition_axis(&mut self, axis: AxisHandle, scale: &LinearScale, duration_ms: u32) -> ChartResult<()> {
        let entry = self
            .axes
            .get_mut(axis.0)
            .ok_or_else(|| ChartError::Rendering(format!("unknown axis {:?}", axis)))?;
        let previous = std::mem::replace(&mut entry.scale, *scale);
        self.render_ticks(axis.0, Some(previous), duration_ms)
    }

    fn draw_marker(&mut self, spec: &MarkerSpec<'_>, style: &MarkerStyle) -> ChartResult<MarkerHandle> {
        let circle = self.create("circle", Some("stateCircle"))?;
        set_attr(&circle, "cx", &spec.position.x.to_string())?;
        set_attr(&circle, "cy", &spec.position.y.to_string())?;
        set_attr(&circle, "r", &style.radius.to_string())?;
        set_attr(&circle, "fill", &style.fill)?;
        set_attr(&circle, "stroke", &style.stroke)?;
        set_attr(&circle, "opacity", &style.opacity.to_string())?;

        let text = self.create("text", Some("stateText"))?;
        set_attr(&text, "x", &spec.position.x.to_string())?;
        set_attr(&text, "y", &spec.position.y.to_string())?;
        set_attr(&text, "dy", "0.35em")?;
        set_attr(&text, "text-anchor", "middle")?;
        set_attr(&text, "font-family", &style.font_family)?;
        set_attr(&text, "font-size", &format!("{}px", style.font_size_px))?;
        text.set_text_content(Some(spec.text));

        let group = self.chart_group()?;
        group.append_child(&circle).map_err(dom_err)?;
        group.append_child(&text).map_err(dom_err)?;
        self.markers.push(SvgMarker { circle, text });
        Ok(MarkerHandle(self.markers.len() - 1))
    }

    fn transition_markers(&mut self, moves: &[MarkerMove], duration_ms: u32) -> ChartResult<()> {
        for mv in moves {
            let marker = self
                .markers
                .get(mv.marker.0)
                .ok_or_else(|| ChartError::Rendering(format!("unknown marker {:?}", mv.marker)))?;
            let targets = [
                (&marker.circle, "cx", mv.to.x),
                (&marker.circle, "cy", mv.to.y),
                (&marker.text, "x", mv.to.x),
                (&marker.text, "y", mv.to.y),
            ];
            for (element, attr, to) in targets {
                let from = numeric_attr(element, attr).unwrap_or(to);
                self.animator.animate(element, attr, AttrFormat::Number, from, to, duration_ms);
            }
        }
        Ok(())
    }

    fn draw_label(&mut self, spec: &LabelSpec) -> ChartResult<LabelHandle> {
        let element = self.create("text", Some(label_class(spec.active)))?;
        let anchor = spec.placement.anchor;
        let transform = if spec.placement.rotated {
            format!("translate({}, {}) rotate(-90)", anchor.x, anchor.y)
        } else {
            format!("translate({}, {})", anchor.x, anchor.y)
        };
        set_attr(&element, "transform", &transform)?;
        set_attr(&element, "y", &spec.placement.offset.to_string())?;
        set_attr(&element, "text-anchor", "middle")?;
        set_attr(&element, "value", &spec.request.to_string())?;
        element.set_text_content(Some(spec.text));
        self.chart_group()?.append_child(&element).map_err(dom_err)?;

        self.labels.push(SvgLabel { element, request: spec.request });
        Ok(LabelHandle(self.labels.len() - 1))
    }

    fn set_label_active(&mut self, label: LabelHandle, active: bool) -> ChartResult<()> {
        let entry = self
            .labels
            .get(label.0)
            .ok_or_else(|| ChartError::Rendering(format!("unknown label {:?}", label)))?;
        set_attr(&entry.element, "class", label_class(active))
    }

    fn bind_tooltips(&mut self, bindings: Vec<TooltipBinding>, style: &TooltipStyle) -> ChartResult<()> {
        self.tooltip_listeners.clear();
        let show_on = match style.trigger {
            TooltipTrigger::Hover => "mouseover",
            TooltipTrigger::Click => "click",
        };
        let options = EventOptions::default();
        for binding in bindings {
            let Some(marker) = self.markers.get(binding.marker.0) else {
                log_warn!(LogComponent::Infrastructure("SvgBackend"), "tooltip for unknown marker {:?}", binding.marker);
                continue;
            };
            for element in [&marker.circle, &marker.text] {
                let content = binding.content.clone();
                let offset = style.offset;
                self.tooltip_listeners.push(listen_with_options(element, show_on, &options, move |event| {
                    Self::show_tooltip(&content, event, offset);
                }));
                self.tooltip_listeners.push(listen_with_options(element, "mouseout", &options, |_| {
                    tooltip_visible().set(false);
                }));
            }
        }
        Ok(())
    }

    fn wire_label_clicks(&mut self, handler: LabelClickHandler) -> ChartResult<()> {
        self.click_listeners.clear();
        let options = EventOptions::default();
        for label in &self.labels {
            let handler = handler.clone();
            let request = label.request;
            self.click_listeners.push(listen_with_options(&label.element, "click", &options, move |_| {
                handler(request);
            }));
        }
        Ok(())
    }
}

fn label_class(active: bool) -> &'static str {
    if active { "aText active" } else { "aText inactive" }
}

fn set_attr(element: &Element, name: &str, value: &str) -> ChartResult<()> {
    element.set_attribute(name, value).map_err(dom_err)
}

fn dom_err(error: JsValue) -> ChartError {
    ChartError::Rendering(format!("DOM operation failed: {:?}", error))
}
