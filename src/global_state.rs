use crate::app::TooltipData;
use crate::global_signals;
use leptos::*;
use once_cell::sync::OnceCell;

pub struct Globals {
    pub tooltip_data: RwSignal<Option<TooltipData>>,
    pub tooltip_visible: RwSignal<bool>,
    pub chart_status: RwSignal<String>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        tooltip_data: create_rw_signal(None),
        tooltip_visible: create_rw_signal(false),
        chart_status: create_rw_signal(String::new()),
    })
}

global_signals! {
    pub tooltip_data => tooltip_data: Option<TooltipData>,
    pub tooltip_visible => tooltip_visible: bool,
    pub chart_status => chart_status: String,
}
