use crate::domain::census::AxisRequest;
use crate::domain::chart::value_objects::AxisSide;
use std::fmt::Debug;

/// Base trait for all domain events
pub trait DomainEvent: Debug + Clone {
    fn event_type(&self) -> &'static str;
    fn timestamp(&self) -> u64 {
        use crate::domain::logging::get_time_provider;
        get_time_provider().current_timestamp()
    }
}

/// Lifecycle of chart generations and axis switches
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    GenerationStarted {
        generation: u64,
        chart_width: f64,
        chart_height: f64,
    },
    DatasetLoaded {
        generation: u64,
        record_count: usize,
    },
    RenderCompleted {
        generation: u64,
        marker_count: usize,
    },
    RenderAborted {
        generation: u64,
        reason: String,
    },
    StaleLoadDiscarded {
        generation: u64,
        current: u64,
    },
    AxisChanged {
        axis: AxisSide,
        request: AxisRequest,
    },
}

impl DomainEvent for ChartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ChartEvent::GenerationStarted { .. } => "GenerationStarted",
            ChartEvent::DatasetLoaded { .. } => "DatasetLoaded",
            ChartEvent::RenderCompleted { .. } => "RenderCompleted",
            ChartEvent::RenderAborted { .. } => "RenderAborted",
            ChartEvent::StaleLoadDiscarded { .. } => "StaleLoadDiscarded",
            ChartEvent::AxisChanged { .. } => "AxisChanged",
        }
    }
}

/// Event dispatcher for publishing events
pub trait EventDispatcher {
    fn publish_chart_event(&self, event: ChartEvent);
}

/// Simple in-memory event dispatcher
#[derive(Default)]
pub struct InMemoryEventDispatcher {
    chart_handlers: Vec<Box<dyn Fn(&ChartEvent)>>,
}

impl InMemoryEventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe_to_chart_events<F>(&mut self, handler: F)
    where
        F: Fn(&ChartEvent) + 'static,
    {
        self.chart_handlers.push(Box::new(handler));
    }
}

impl EventDispatcher for InMemoryEventDispatcher {
    fn publish_chart_event(&self, event: ChartEvent) {
        for handler in &self.chart_handlers {
            handler(&event);
        }
    }
}
