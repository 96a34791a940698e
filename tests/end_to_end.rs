mod common;

use census_scatter_wasm::domain::census::{XField, YField};
use census_scatter_wasm::domain::chart::{AxisSide, ChartConfig};
use common::{approx, rendered, three_rows};
use wasm_bindgen_test::*;

fn poverty_px(value: f64) -> f64 {
    (value - 8.0) / (36.0 - 8.0) * 860.0
}

fn income_px(value: f64) -> f64 {
    (value - 80.0) / (360.0 - 80.0) * 860.0
}

fn healthcare_px(value: f64) -> f64 {
    600.0 - (value - 4.0) / (13.2 - 4.0) * 600.0
}

#[wasm_bindgen_test(unsupported = test)]
fn default_axes_place_three_markers_by_poverty() {
    let coordinator = rendered(three_rows(), ChartConfig::selectable());
    let dims = coordinator.dimensions().unwrap();
    assert_eq!((dims.chart_width, dims.chart_height), (860.0, 600.0));

    let x_axis = coordinator.backend().axis(AxisSide::Bottom).unwrap();
    let (lo, hi) = x_axis.scale.domain();
    assert!(approx(lo, 8.0) && approx(hi, 36.0), "{:?}", x_axis.scale.domain());

    let markers = coordinator.backend().markers();
    assert_eq!(markers.iter().map(|m| m.text.as_str()).collect::<Vec<_>>(), ["AA", "BB", "CC"]);
    for (marker, (poverty, healthcare)) in markers.iter().zip([(10.0, 5.0), (20.0, 8.0), (30.0, 11.0)]) {
        assert!(approx(marker.position.x, poverty_px(poverty)), "{} x={}", marker.text, marker.position.x);
        assert!(approx(marker.position.y, healthcare_px(healthcare)), "{} y={}", marker.text, marker.position.y);
    }
}

#[wasm_bindgen_test(unsupported = test)]
fn clicking_income_moves_markers_horizontally_only() {
    let mut coordinator = rendered(three_rows(), ChartConfig::selectable());
    let before: Vec<f64> = coordinator.backend().markers().iter().map(|m| m.position.y).collect();

    let income = coordinator.backend().label_by_text("Income (Median)").unwrap();
    let request = coordinator.backend().labels()[income.0].request();
    coordinator.handle_label_click(request).unwrap();

    assert_eq!(coordinator.current_axes(), Some((XField::Income, YField::Healthcare)));
    let markers = coordinator.backend().markers();
    for ((marker, income), y_before) in markers.iter().zip([100.0, 200.0, 300.0]).zip(before) {
        assert!(approx(marker.position.x, income_px(income)), "{} x={}", marker.text, marker.position.x);
        assert_eq!(marker.position.y, y_before);
    }

    let surface = coordinator.surface().unwrap();
    for marker in &surface.markers {
        let backend_marker = &markers[marker.handle.0];
        assert_eq!(backend_marker.position, marker.position);
    }
}

#[wasm_bindgen_test(unsupported = test)]
fn fixed_preset_draws_a_single_label_per_axis() {
    let coordinator = rendered(three_rows(), ChartConfig::fixed());
    let backend = coordinator.backend();
    assert_eq!(backend.labels().len(), 2);
    assert_eq!(backend.active_labels(), ["% in Poverty", "Lacks Healthcare (%)"]);
    assert_eq!(backend.markers()[0].radius, 16.0);
}
