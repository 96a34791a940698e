use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable};
use gloo::events::EventListener;
use gloo::utils::format::JsValueSerdeExt;
use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::ChartOverlay;
use crate::application::coordinator::{ChartCoordinator, GenerationToken};
use crate::domain::census::{AxisRequest, Dataset, DatasetRepository};
use crate::domain::chart::{ChartBackend, ChartConfig, Viewport};
use crate::domain::errors::{ChartError, ChartResult};
use crate::domain::logging::LogComponent;
use crate::event_utils::{EventOptions, window_event_listener_with_options};
use crate::global_state::chart_status;
use crate::infrastructure::{CsvDatasetRepository, SvgBackend};
use crate::{log_debug, log_error, log_info, log_warn};

thread_local! {
    static COORDINATOR: RefCell<Option<ChartCoordinator<SvgBackend>>> = const { RefCell::new(None) };
    static PENDING_LOAD: RefCell<Option<AbortHandle>> = const { RefCell::new(None) };
    static RESIZE_LISTENER: RefCell<Option<EventListener>> = const { RefCell::new(None) };
    static OVERLAY_MOUNTED: Cell<bool> = const { Cell::new(false) };
}

/// Builds (or rebuilds) the chart for the current window size.
#[wasm_bindgen(js_name = makeResponsive)]
pub fn make_responsive() -> Result<(), JsValue> {
    ensure_coordinator(None)?;
    rebuild().map_err(JsValue::from)
}

/// Like `makeResponsive`, replacing the chart configuration first. Accepts
/// either a config object or its JSON text; missing keys keep the
/// selectable defaults.
#[wasm_bindgen(js_name = makeResponsiveWith)]
pub fn make_responsive_with(config: JsValue) -> Result<(), JsValue> {
    let config = match config.as_string() {
        Some(json) => ChartConfig::from_json(&json)?,
        None => {
            let parsed: ChartConfig = config.into_serde().map_err(ChartError::from)?;
            parsed.validate()?;
            parsed
        }
    };
    ensure_coordinator(Some(config))?;
    rebuild().map_err(JsValue::from)
}

/// Rebuilds the chart on every window resize. Installing twice is a no-op.
#[wasm_bindgen(js_name = installResizeHook)]
pub fn install_resize_hook() -> Result<(), JsValue> {
    RESIZE_LISTENER.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            return Ok(());
        }
        let listener = window_event_listener_with_options("resize", &EventOptions::default(), |_| {
            if let Err(e) = make_responsive() {
                log_error!(LogComponent::Presentation("ResizeHook"), "rebuild failed: {:?}", e);
            }
        })
        .ok_or_else(|| JsValue::from(ChartError::Rendering("window not available".into())))?;
        *slot = Some(listener);
        log_info!(LogComponent::Presentation("ResizeHook"), "resize hook installed");
        Ok(())
    })
}

/// Switches the x axis by field name; resolves to `true` when it changed.
#[wasm_bindgen(js_name = selectXAxis)]
pub fn select_x_axis(name: &str) -> Result<bool, JsValue> {
    let selection = with_coordinator(|c| c.select_x(name))?;
    Ok(selection.is_changed())
}

#[wasm_bindgen(js_name = selectYAxis)]
pub fn select_y_axis(name: &str) -> Result<bool, JsValue> {
    let selection = with_coordinator(|c| c.select_y(name))?;
    Ok(selection.is_changed())
}

/// `[x, y]` field names of the rendered chart, or `null` before first render.
#[wasm_bindgen(js_name = currentAxes)]
pub fn current_axes() -> JsValue {
    COORDINATOR.with(|cell| {
        cell.try_borrow()
            .ok()
            .and_then(|c| c.as_ref().and_then(ChartCoordinator::current_axes))
            .map(|(x, y)| {
                let pair = js_sys::Array::new();
                pair.push(&JsValue::from_str(&x.to_string()));
                pair.push(&JsValue::from_str(&y.to_string()));
                JsValue::from(pair)
            })
            .unwrap_or(JsValue::NULL)
    })
}

fn ensure_coordinator(config: Option<ChartConfig>) -> ChartResult<()> {
    mount_overlay();
    COORDINATOR.with(|cell| {
        let mut slot = cell.try_borrow_mut().map_err(|_| ChartError::Rendering("chart is busy".into()))?;
        if slot.is_some() && config.is_none() {
            return Ok(());
        }
        if let Some(mut previous) = slot.take() {
            previous.backend_mut().clear();
        }
        let config = config.unwrap_or_default();
        let backend = SvgBackend::new(config.container.clone())?;
        let mut coordinator = ChartCoordinator::new(backend, config)?;
        coordinator.set_click_handler(Rc::new(on_label_click));
        *slot = Some(coordinator);
        Ok(())
    })
}

fn mount_overlay() {
    if OVERLAY_MOUNTED.with(|mounted| mounted.replace(true)) {
        return;
    }
    mount_to_body(|| view! { <ChartOverlay/> });
}

fn with_coordinator<T>(f: impl FnOnce(&mut ChartCoordinator<SvgBackend>) -> ChartResult<T>) -> ChartResult<T> {
    COORDINATOR.with(|cell| {
        let mut slot = cell.try_borrow_mut().map_err(|_| ChartError::Rendering("chart is busy".into()))?;
        let coordinator = slot
            .as_mut()
            .ok_or_else(|| ChartError::Rendering("makeResponsive has not been called".into()))?;
        f(coordinator)
    })
}

fn current_viewport() -> ChartResult<Viewport> {
    let window = web_sys::window().ok_or_else(|| ChartError::Rendering("window not available".into()))?;
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Ok(Viewport::new(width, height))
}

/// Starts a new generation and loads its data in the background. A load
/// still running for an older generation is aborted.
fn rebuild() -> ChartResult<()> {
    let viewport = current_viewport()?;
    let (token, repository) = with_coordinator(|c| {
        let token = c.begin_generation(viewport)?;
        Ok((token, CsvDatasetRepository::new(c.config().data_url.clone())))
    })?;

    let (handle, registration) = AbortHandle::new_pair();
    if let Some(previous) = PENDING_LOAD.with(|slot| slot.borrow_mut().replace(handle)) {
        previous.abort();
        log_debug!(LogComponent::Presentation("WasmApi"), "aborted load superseded by generation {}", token.generation());
    }

    spawn_local(async move {
        match Abortable::new(async move { repository.load().await }, registration).await {
            Ok(loaded) => finish_generation(token, loaded),
            Err(_) => {
                log_debug!(LogComponent::Presentation("WasmApi"), "load for generation {} aborted", token.generation());
            }
        }
    });
    Ok(())
}

fn finish_generation(token: GenerationToken, loaded: ChartResult<Dataset>) {
    match with_coordinator(|c| c.complete_generation(token, loaded)) {
        Ok(()) => chart_status().set(String::new()),
        Err(ChartError::StaleGeneration { .. }) => {}
        Err(e) => {
            log_error!(LogComponent::Presentation("WasmApi"), "chart not rendered: {}", e);
            chart_status().set(e.to_string());
        }
    }
}

fn on_label_click(request: AxisRequest) {
    match with_coordinator(|c| c.handle_label_click(request)) {
        Ok(selection) => {
            log_debug!(LogComponent::Presentation("WasmApi"), "label click {} changed={}", request, selection.is_changed());
        }
        Err(e) => {
            log_warn!(LogComponent::Presentation("WasmApi"), "label click {} ignored: {}", request, e);
        }
    }
}
