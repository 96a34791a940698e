use leptos::*;

use crate::domain::chart::TooltipContent;
use crate::global_state::{chart_status, tooltip_data, tooltip_visible};

/// What the overlay shows and where, in page coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipData {
    pub formatted_text: String,
    pub x: f64,
    pub y: f64,
}

impl TooltipData {
    /// Places the overlay at the pointer, shifted by `(down, right)`.
    pub fn new(content: &TooltipContent, page_x: f64, page_y: f64, offset: (f64, f64)) -> Self {
        Self { formatted_text: content.text(), x: page_x + offset.1, y: page_y + offset.0 }
    }
}

/// Floating tooltip shared by every marker.
#[component]
pub fn ChartTooltip() -> impl IntoView {
    let visible = tooltip_visible();
    let data = tooltip_data();

    view! {
        <div
            class="d3-tip tooltip"
            style:position="absolute"
            style:white-space="pre-line"
            style:pointer-events="none"
            style:display=move || if visible.get() { "block" } else { "none" }
            style:left=move || data.with(|d| d.as_ref().map_or("0px".to_string(), |t| format!("{}px", t.x)))
            style:top=move || data.with(|d| d.as_ref().map_or("0px".to_string(), |t| format!("{}px", t.y)))
        >
            {move || data.with(|d| d.as_ref().map(|t| t.formatted_text.clone()).unwrap_or_default())}
        </div>
    }
}

/// Last load or render failure, empty while the chart is healthy.
#[component]
pub fn ChartStatus() -> impl IntoView {
    let status = chart_status();
    view! {
        <div class="chart-status" style:display=move || if status.with(String::is_empty) { "none" } else { "block" }>
            {move || status.get()}
        </div>
    }
}

/// Overlay root mounted next to the chart container.
#[component]
pub fn ChartOverlay() -> impl IntoView {
    view! {
        <ChartTooltip/>
        <ChartStatus/>
    }
}
