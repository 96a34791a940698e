use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use web_sys::{Event, EventTarget};

#[derive(Clone, Debug)]
pub struct EventOptions {
    pub passive: bool,
    pub capture: bool,
}

impl Default for EventOptions {
    fn default() -> Self {
        Self { passive: true, capture: false }
    }
}

impl EventOptions {
    fn to_gloo(&self) -> EventListenerOptions {
        EventListenerOptions {
            phase: if self.capture { EventListenerPhase::Capture } else { EventListenerPhase::Bubble },
            passive: self.passive,
        }
    }
}

/// Listener on `target`; removed when the returned handle is dropped.
pub fn listen_with_options(
    target: &EventTarget,
    event: &'static str,
    options: &EventOptions,
    callback: impl FnMut(&Event) + 'static,
) -> EventListener {
    EventListener::new_with_options(target, event, options.to_gloo(), callback)
}

/// Window listener, `None` outside a browser.
pub fn window_event_listener_with_options(
    event: &'static str,
    options: &EventOptions,
    callback: impl FnMut(&Event) + 'static,
) -> Option<EventListener> {
    let window = web_sys::window()?;
    Some(listen_with_options(&window, event, options, callback))
}
