#[cfg(not(feature = "logic-only"))]
use wasm_bindgen::prelude::*;

#[macro_use]
pub mod macros;

pub mod app;
pub mod application;
pub mod domain;
pub mod event_utils;
pub mod global_state;
pub mod infrastructure;
#[cfg(not(feature = "logic-only"))]
pub mod presentation;

/// Installs the panic hook and the browser logging stack.
#[cfg(not(feature = "logic-only"))]
#[wasm_bindgen(start)]
pub fn initialize() {
    use crate::domain::logging::LogComponent;
    use crate::log_info;

    console_error_panic_hook::set_once();

    let console_logger = Box::new(infrastructure::services::ConsoleLogger::new_development());
    domain::logging::init_logger(console_logger);

    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    log_info!(LogComponent::Presentation("Initialize"), "census scatter module loaded");
}
