use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Interval;
use web_sys::Element;

use crate::domain::chart::transition::{Timeline, Tween};
use crate::domain::logging::LogComponent;
use crate::log_trace;

const FRAME_MS: u32 = 16;

/// How a tweened number is written back into its attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrFormat {
    Number,
    TranslateX,
    TranslateY,
}

impl AttrFormat {
    fn render(self, value: f64) -> String {
        match self {
            AttrFormat::Number => format!("{value}"),
            AttrFormat::TranslateX => format!("translate({value},0)"),
            AttrFormat::TranslateY => format!("translate(0,{value})"),
        }
    }
}

struct Animation {
    element: Element,
    attr: &'static str,
    format: AttrFormat,
    tween: Tween,
    timeline: Timeline,
}

impl Animation {
    /// Writes the current frame; returns `true` once the end value is set.
    fn step(&self, now_ms: f64) -> bool {
        let progress = self.timeline.progress(now_ms);
        let _ = self.element.set_attribute(self.attr, &self.format.render(self.tween.at(progress)));
        progress >= 1.0
    }
}

/// Drives attribute tweens from a single interval timer.
///
/// Tweens are fire-and-forget. A second tween on an attribute that is still
/// animating runs alongside the first; whichever finishes last leaves its
/// end value.
#[derive(Default)]
pub struct Animator {
    running: Rc<RefCell<Vec<Animation>>>,
    ticker: Option<Interval>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animates `attr` of `element` to `to`. A zero duration sets it at once.
    pub fn animate(&mut self, element: &Element, attr: &'static str, format: AttrFormat, from: f64, to: f64, duration_ms: u32) {
        let animation = Animation {
            element: element.clone(),
            attr,
            format,
            tween: Tween::new(from, to),
            timeline: Timeline::new(now_ms(), duration_ms),
        };
        if duration_ms == 0 {
            animation.step(f64::INFINITY);
            return;
        }
        self.running.borrow_mut().push(animation);
        self.ensure_ticker();
    }

    pub fn active_count(&self) -> usize {
        self.running.borrow().len()
    }

    /// Stops every tween where it is.
    pub fn cancel_all(&mut self) {
        self.ticker = None;
        self.running.borrow_mut().clear();
    }

    fn ensure_ticker(&mut self) {
        if self.ticker.is_some() {
            return;
        }
        let running = Rc::clone(&self.running);
        self.ticker = Some(Interval::new(FRAME_MS, move || {
            let now = now_ms();
            let Ok(mut running) = running.try_borrow_mut() else {
                return;
            };
            let before = running.len();
            running.retain(|a| !a.step(now));
            if running.len() != before {
                log_trace!(
                    LogComponent::Infrastructure("Animator"),
                    "{} tweens finished, {} running",
                    before - running.len(),
                    running.len()
                );
            }
        }));
    }
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Reads a numeric attribute, e.g. the current `cx` of a circle.
pub fn numeric_attr(element: &Element, attr: &str) -> Option<f64> {
    element.get_attribute(attr)?.parse().ok()
}
