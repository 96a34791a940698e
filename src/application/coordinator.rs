use crate::application::use_cases::{RenderChartUseCase, SelectAxisUseCase};
use crate::domain::census::{AxisField, AxisRequest, Dataset, DatasetRepository, XField, YField};
use crate::domain::chart::{
    ChartBackend, ChartConfig, ChartDimensions, ChartSurface, LabelClickHandler, SelectionOutcome, Viewport,
};
use crate::domain::errors::{ChartError, ChartResult};
use crate::domain::events::{ChartEvent, DomainEvent, EventDispatcher, InMemoryEventDispatcher};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_error, log_info, log_warn};

/// Identifies the generation a dataset load was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationToken(u64);

impl GenerationToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Result of a label click, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSelection {
    X(SelectionOutcome<XField>),
    Y(SelectionOutcome<YField>),
}

impl AxisSelection {
    pub fn is_changed(&self) -> bool {
        !matches!(
            self,
            AxisSelection::X(SelectionOutcome::Unchanged) | AxisSelection::Y(SelectionOutcome::Unchanged)
        )
    }
}

/// Layout root: owns the backend, the selection state of the rendered
/// generation and the generation counter.
///
/// A rebuild is split around the dataset load: [`begin_generation`] tears
/// the old surface down and creates the new one, [`complete_generation`]
/// draws into it once data arrives. Completions for a generation that has
/// been superseded are discarded.
///
/// [`begin_generation`]: ChartCoordinator::begin_generation
/// [`complete_generation`]: ChartCoordinator::complete_generation
pub struct ChartCoordinator<B: ChartBackend> {
    backend: B,
    config: ChartConfig,
    generation: u64,
    dimensions: Option<ChartDimensions>,
    surface: Option<ChartSurface>,
    click_handler: Option<LabelClickHandler>,
    events: InMemoryEventDispatcher,
}

impl<B: ChartBackend> ChartCoordinator<B> {
    pub fn new(backend: B, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        log_info!(
            LogComponent::Application("ChartCoordinator"),
            "coordinator ready: {} x candidates, {} y candidates, {}ms transitions",
            config.x_candidates.len(),
            config.y_candidates.len(),
            config.transition_ms
        );
        Ok(Self {
            backend,
            config,
            generation: 0,
            dimensions: None,
            surface: None,
            click_handler: None,
            events: InMemoryEventDispatcher::new(),
        })
    }

    /// Handler wired to every label of every future generation.
    pub fn set_click_handler(&mut self, handler: LabelClickHandler) {
        self.click_handler = Some(handler);
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: Fn(&ChartEvent) + 'static,
    {
        self.events.subscribe_to_chart_events(handler);
    }

    /// Tears down the previous surface and creates an empty one sized for
    /// `viewport`. Any load still pending for an older generation becomes
    /// stale.
    pub fn begin_generation(&mut self, viewport: Viewport) -> ChartResult<GenerationToken> {
        self.backend.clear();
        self.surface = None;
        self.generation += 1;

        let dims = ChartDimensions::from_viewport(viewport, self.config.viewport_inset, self.config.margin);
        self.dimensions = Some(dims);
        self.backend.create_surface(&dims)?;

        self.publish(ChartEvent::GenerationStarted {
            generation: self.generation,
            chart_width: dims.chart_width,
            chart_height: dims.chart_height,
        });
        Ok(GenerationToken(self.generation))
    }

    /// Draws the loaded dataset into the surface of `token`'s generation.
    ///
    /// Load and scale errors abort the render and leave the surface empty.
    pub fn complete_generation(&mut self, token: GenerationToken, loaded: ChartResult<Dataset>) -> ChartResult<()> {
        if token.0 != self.generation {
            log_warn!(
                LogComponent::Application("ChartCoordinator"),
                "discarding load for generation {} (current {})",
                token.0,
                self.generation
            );
            self.publish(ChartEvent::StaleLoadDiscarded { generation: token.0, current: self.generation });
            return Err(ChartError::StaleGeneration { expected: self.generation, actual: token.0 });
        }
        let dims = self.dimensions.ok_or_else(|| ChartError::Rendering("surface was never created".into()))?;

        let result = loaded.and_then(|dataset| {
            self.publish(ChartEvent::DatasetLoaded { generation: token.0, record_count: dataset.len() });
            RenderChartUseCase::new(&self.config, dims, token.0).execute(
                &mut self.backend,
                dataset,
                self.click_handler.clone(),
            )
        });

        match result {
            Ok(surface) => {
                let marker_count = surface.markers.len();
                self.surface = Some(surface);
                self.publish(ChartEvent::RenderCompleted { generation: token.0, marker_count });
                Ok(())
            }
            Err(error) => {
                log_error!(
                    LogComponent::Application("ChartCoordinator"),
                    "generation {} not rendered: {}",
                    token.0,
                    error
                );
                // Drop whatever was drawn before the failure; keep the empty surface.
                self.backend.clear();
                self.backend.create_surface(&dims)?;
                self.publish(ChartEvent::RenderAborted { generation: token.0, reason: error.to_string() });
                Err(error)
            }
        }
    }

    /// Full teardown and rebuild in one call.
    pub async fn rebuild<R: DatasetRepository>(&mut self, viewport: Viewport, repository: &R) -> ChartResult<()> {
        let token = self.begin_generation(viewport)?;
        let loaded = repository.load().await;
        self.complete_generation(token, loaded)
    }

    /// Applies a label click to the rendered generation.
    pub fn handle_label_click(&mut self, request: AxisRequest) -> ChartResult<AxisSelection> {
        let Some(surface) = self.surface.as_mut() else {
            return Err(ChartError::Rendering(format!("no rendered chart to apply {}", request)));
        };
        let use_case = SelectAxisUseCase::new(&self.config);
        let selection = match request {
            AxisRequest::X(field) => AxisSelection::X(use_case.execute(surface, &mut self.backend, field)?),
            AxisRequest::Y(field) => AxisSelection::Y(use_case.execute(surface, &mut self.backend, field)?),
        };
        if selection.is_changed() {
            let axis = match request {
                AxisRequest::X(_) => XField::SIDE,
                AxisRequest::Y(_) => YField::SIDE,
            };
            self.publish(ChartEvent::AxisChanged { axis, request });
        }
        Ok(selection)
    }

    /// Host-facing selection by field name, e.g. `"income"`.
    pub fn select_x(&mut self, name: &str) -> ChartResult<AxisSelection> {
        self.handle_label_click(AxisRequest::X(XField::parse(name)?))
    }

    pub fn select_y(&mut self, name: &str) -> ChartResult<AxisSelection> {
        self.handle_label_click(AxisRequest::Y(YField::parse(name)?))
    }

    pub fn current_axes(&self) -> Option<(XField, YField)> {
        self.surface.as_ref().map(ChartSurface::current_axes)
    }

    pub fn surface(&self) -> Option<&ChartSurface> {
        self.surface.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dimensions(&self) -> Option<ChartDimensions> {
        self.dimensions
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn publish(&self, event: ChartEvent) {
        log_debug!(LogComponent::Application("ChartCoordinator"), "event {}", event.event_type());
        self.events.publish_chart_event(event);
    }
}
