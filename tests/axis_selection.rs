mod common;

use std::cell::RefCell;
use std::rc::Rc;

use census_scatter_wasm::application::{AxisSelection, ChartCoordinator};
use census_scatter_wasm::domain::census::{AxisField, AxisRequest, StaticDatasetRepository, XField, YField};
use census_scatter_wasm::domain::chart::{AxisSide, ChartConfig, SelectionOutcome};
use census_scatter_wasm::domain::errors::ChartError;
use census_scatter_wasm::domain::events::ChartEvent;
use census_scatter_wasm::infrastructure::HeadlessBackend;
use census_scatter_wasm::infrastructure::rendering::BackendCall;
use common::{census_sample, rendered, viewport};
use wasm_bindgen_test::*;

#[wasm_bindgen_test(unsupported = test)]
fn switching_x_runs_axis_points_tooltips_then_labels() {
    let mut coordinator = rendered(census_sample(), ChartConfig::selectable());
    coordinator.backend_mut().take_calls();

    let selection = coordinator.select_x("age").unwrap();
    assert_eq!(
        selection,
        AxisSelection::X(SelectionOutcome::Changed { previous: XField::Poverty, current: XField::Age })
    );
    assert_eq!(
        coordinator.backend().calls(),
        [
            BackendCall::TransitionAxis(0),
            BackendCall::TransitionMarkers(4),
            BackendCall::BindTooltips(4),
            BackendCall::SetLabelActive(0, false),
            BackendCall::SetLabelActive(2, true),
        ]
    );
}

#[wasm_bindgen_test(unsupported = test)]
fn switching_y_keeps_x_scale() {
    let mut coordinator = rendered(census_sample(), ChartConfig::selectable());
    let x_before = *coordinator.surface().unwrap().x.scale();

    coordinator.select_y("obesity").unwrap();

    let surface = coordinator.surface().unwrap();
    assert_eq!(*surface.x.scale(), x_before);
    assert_eq!(surface.current_axes(), (XField::Poverty, YField::Obesity));
    assert_eq!(coordinator.backend().axis(AxisSide::Left).unwrap().transitions, 1);
    assert_eq!(coordinator.backend().axis(AxisSide::Bottom).unwrap().transitions, 0);
}

#[wasm_bindgen_test(unsupported = test)]
fn reclicking_the_current_label_changes_nothing() {
    let mut coordinator = rendered(census_sample(), ChartConfig::selectable());
    coordinator.select_x("income").unwrap();
    coordinator.backend_mut().take_calls();
    let surface_before = coordinator.surface().unwrap().clone();
    let markers_before = coordinator.backend().markers().to_vec();

    let selection = coordinator.handle_label_click(AxisRequest::X(XField::Income)).unwrap();

    assert_eq!(selection, AxisSelection::X(SelectionOutcome::Unchanged));
    assert!(!selection.is_changed());
    assert!(coordinator.backend().calls().is_empty());
    assert_eq!(coordinator.surface().unwrap(), &surface_before);
    assert_eq!(coordinator.backend().markers(), markers_before.as_slice());
}

#[wasm_bindgen_test(unsupported = test)]
fn exactly_one_active_label_per_axis_after_every_click() {
    let mut coordinator = rendered(census_sample(), ChartConfig::selectable());
    let clicks = [
        AxisRequest::X(XField::Income),
        AxisRequest::Y(YField::Smokes),
        AxisRequest::X(XField::Income),
        AxisRequest::X(XField::Age),
        AxisRequest::Y(YField::Healthcare),
        AxisRequest::X(XField::Poverty),
    ];
    for request in clicks {
        coordinator.handle_label_click(request).unwrap();
        let surface = coordinator.surface().unwrap();
        assert_eq!(surface.x.labels().active_count(), 1);
        assert_eq!(surface.y.labels().active_count(), 1);
        assert_eq!(surface.x.labels().active(), Some(surface.x.current()));
        assert_eq!(surface.y.labels().active(), Some(surface.y.current()));

        let (x, y) = surface.current_axes();
        assert_eq!(coordinator.backend().active_labels(), [x.label_text(), y.label_text()]);
    }
}

#[wasm_bindgen_test(unsupported = test)]
fn unknown_names_are_rejected() {
    let mut coordinator = rendered(census_sample(), ChartConfig::selectable());
    assert_eq!(
        coordinator.select_x("healthcare"),
        Err(ChartError::InvalidAxisChoice { axis: AxisSide::Bottom, value: "healthcare".into() })
    );
    assert!(matches!(coordinator.select_y("Poverty"), Err(ChartError::InvalidAxisChoice { .. })));
    assert_eq!(coordinator.current_axes(), Some((XField::Poverty, YField::Healthcare)));
}

#[wasm_bindgen_test(unsupported = test)]
fn choices_outside_the_configured_candidates_are_rejected() {
    let mut coordinator = rendered(census_sample(), ChartConfig::fixed());
    coordinator.backend_mut().take_calls();

    let result = coordinator.handle_label_click(AxisRequest::X(XField::Income));

    assert!(matches!(result, Err(ChartError::InvalidAxisChoice { axis: AxisSide::Bottom, .. })));
    assert!(coordinator.backend().calls().is_empty());
    assert_eq!(coordinator.current_axes(), Some((XField::Poverty, YField::Healthcare)));
}

#[wasm_bindgen_test(unsupported = test)]
fn clicks_before_first_render_are_errors() {
    let mut coordinator = ChartCoordinator::new(HeadlessBackend::new(), ChartConfig::selectable()).unwrap();
    assert!(matches!(coordinator.select_x("income"), Err(ChartError::Rendering(_))));
    assert_eq!(coordinator.current_axes(), None);
}

#[wasm_bindgen_test(unsupported = test)]
fn wired_label_click_reaches_the_handler_with_its_typed_choice() {
    let mut coordinator = ChartCoordinator::new(HeadlessBackend::new(), ChartConfig::selectable()).unwrap();
    let received = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&received);
    coordinator.set_click_handler(Rc::new(move |request: AxisRequest| sink.borrow_mut().push(request)));
    let repository = StaticDatasetRepository::new(census_sample());
    futures::executor::block_on(coordinator.rebuild(viewport(), &repository)).unwrap();

    let smokes = coordinator.backend().label_by_text("Smoker (%)").unwrap();
    coordinator.backend().click_label(smokes).unwrap();

    assert_eq!(*received.borrow(), vec![AxisRequest::Y(YField::Smokes)]);
}

#[wasm_bindgen_test(unsupported = test)]
fn axis_changes_are_published() {
    let mut coordinator = rendered(census_sample(), ChartConfig::selectable());
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    coordinator.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    coordinator.select_x("income").unwrap();
    coordinator.select_x("income").unwrap();

    assert_eq!(
        *events.borrow(),
        vec![ChartEvent::AxisChanged { axis: AxisSide::Bottom, request: AxisRequest::X(XField::Income) }]
    );
}
