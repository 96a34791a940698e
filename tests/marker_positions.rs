mod common;

use census_scatter_wasm::application::ChartCoordinator;
use census_scatter_wasm::domain::census::{
    AxisField, AxisRequest, CensusRecord, Dataset, StaticDatasetRepository, XField, YField,
};
use census_scatter_wasm::domain::chart::{ChartConfig, ScaleBuilder, Viewport};
use census_scatter_wasm::infrastructure::HeadlessBackend;
use futures::executor::block_on;
use quickcheck_macros::quickcheck;
use strum::IntoEnumIterator;

fn finite(v: f64) -> f64 {
    if v.is_finite() { (v % 1.0e6).abs() } else { 1.0 }
}

fn dataset_from(rows: &[(f64, f64, f64, f64, f64, f64)]) -> Dataset {
    Dataset::new(
        rows.iter()
            .enumerate()
            .map(|(i, &(poverty, income, age, healthcare, obesity, smokes))| CensusRecord {
                state: format!("State {i}"),
                abbr: format!("S{i}"),
                poverty: finite(poverty),
                income: finite(income),
                age: finite(age),
                healthcare: finite(healthcare),
                obesity: finite(obesity),
                smokes: finite(smokes),
            })
            .collect(),
    )
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * (1.0 + a.abs().max(b.abs()))
}

#[quickcheck]
fn every_marker_sits_at_its_scaled_values(rows: Vec<(f64, f64, f64, f64, f64, f64)>, x_pick: u8, y_pick: u8) -> bool {
    if rows.is_empty() {
        return true;
    }
    let dataset = dataset_from(&rows);
    let mut coordinator = ChartCoordinator::new(HeadlessBackend::new(), ChartConfig::selectable()).unwrap();
    let repository = StaticDatasetRepository::new(dataset.clone());
    if block_on(coordinator.rebuild(Viewport::new(1500.0, 900.0), &repository)).is_err() {
        return false;
    }

    let x = XField::iter().nth(x_pick as usize % 3).unwrap();
    let y = YField::iter().nth(y_pick as usize % 3).unwrap();
    coordinator.handle_label_click(AxisRequest::X(x)).unwrap();
    coordinator.handle_label_click(AxisRequest::Y(y)).unwrap();

    let dims = coordinator.dimensions().unwrap();
    let x_scale = ScaleBuilder::build(&dataset, x, dims.x_range()).unwrap();
    let y_scale = ScaleBuilder::build(&dataset, y, dims.y_range()).unwrap();
    let markers = coordinator.backend().markers();

    markers.len() == dataset.len()
        && dataset.records().iter().zip(markers).all(|(record, marker)| {
            close(marker.position.x, x_scale.apply(x.value(record)))
                && close(marker.position.y, y_scale.apply(y.value(record)))
        })
}

#[quickcheck]
fn padded_domain_brackets_the_data(values: Vec<f64>) -> bool {
    let rows: Vec<_> = values.iter().map(|&v| (v, v, v, v, v, v)).collect();
    if rows.is_empty() {
        return true;
    }
    let dataset = dataset_from(&rows);
    let scale = ScaleBuilder::build(&dataset, XField::Poverty, (0.0, 100.0)).unwrap();
    let (lo, hi) = scale.domain();
    lo < hi && dataset.records().iter().all(|r| lo <= r.poverty && r.poverty <= hi)
}

#[quickcheck]
fn label_invariant_holds_for_any_click_sequence(clicks: Vec<(bool, u8)>) -> bool {
    let mut coordinator = common::rendered(common::census_sample(), ChartConfig::selectable());
    clicks.into_iter().all(|(horizontal, pick)| {
        let request = if horizontal {
            AxisRequest::X(XField::iter().nth(pick as usize % 3).unwrap())
        } else {
            AxisRequest::Y(YField::iter().nth(pick as usize % 3).unwrap())
        };
        coordinator.handle_label_click(request).is_ok() && {
            let surface = coordinator.surface().unwrap();
            surface.x.labels().active() == Some(surface.x.current())
                && surface.y.labels().active() == Some(surface.y.current())
                && surface.x.labels().active_count() == 1
                && surface.y.labels().active_count() == 1
        }
    })
}
