#![allow(dead_code)]

use census_scatter_wasm::application::ChartCoordinator;
use census_scatter_wasm::domain::census::{CensusRecord, Dataset, StaticDatasetRepository};
use census_scatter_wasm::domain::chart::{ChartConfig, Viewport};
use census_scatter_wasm::infrastructure::HeadlessBackend;

pub const EPS: f64 = 1e-9;

/// 1500x900 leaves a 860x600 plotting area with the selectable preset.
pub fn viewport() -> Viewport {
    Viewport::new(1500.0, 900.0)
}

pub fn record(abbr: &str, poverty: f64, income: f64, healthcare: f64) -> CensusRecord {
    CensusRecord {
        state: format!("State {abbr}"),
        abbr: abbr.to_string(),
        poverty,
        income,
        age: 30.0 + poverty,
        healthcare,
        obesity: 20.0 + healthcare,
        smokes: 10.0 + healthcare / 2.0,
    }
}

pub fn three_rows() -> Dataset {
    Dataset::new(vec![
        record("AA", 10.0, 100.0, 5.0),
        record("BB", 20.0, 200.0, 8.0),
        record("CC", 30.0, 300.0, 11.0),
    ])
}

pub fn census_sample() -> Dataset {
    Dataset::new(vec![
        CensusRecord {
            state: "Alabama".into(),
            abbr: "AL".into(),
            poverty: 19.3,
            income: 42830.0,
            age: 38.6,
            healthcare: 13.9,
            obesity: 33.5,
            smokes: 21.1,
        },
        CensusRecord {
            state: "Alaska".into(),
            abbr: "AK".into(),
            poverty: 11.2,
            income: 70761.0,
            age: 33.3,
            healthcare: 15.0,
            obesity: 29.7,
            smokes: 19.9,
        },
        CensusRecord {
            state: "Arizona".into(),
            abbr: "AZ".into(),
            poverty: 18.2,
            income: 50068.0,
            age: 36.9,
            healthcare: 14.4,
            obesity: 28.9,
            smokes: 16.5,
        },
        CensusRecord {
            state: "Arkansas".into(),
            abbr: "AR".into(),
            poverty: 18.9,
            income: 41262.0,
            age: 37.8,
            healthcare: 16.3,
            obesity: 35.9,
            smokes: 24.7,
        },
    ])
}

pub fn rendered(dataset: Dataset, config: ChartConfig) -> ChartCoordinator<HeadlessBackend> {
    let mut coordinator = ChartCoordinator::new(HeadlessBackend::new(), config).expect("valid config");
    let repository = StaticDatasetRepository::new(dataset);
    futures::executor::block_on(coordinator.rebuild(viewport(), &repository)).expect("first render");
    coordinator
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}
