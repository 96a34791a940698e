#![cfg(target_arch = "wasm32")]

use census_scatter_wasm::application::ChartCoordinator;
use census_scatter_wasm::domain::census::{CensusRecord, Dataset, StaticDatasetRepository};
use census_scatter_wasm::domain::chart::{ChartConfig, Viewport};
use census_scatter_wasm::infrastructure::SvgBackend;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn host(id: &str) {
    let document = web_sys::window().unwrap().document().unwrap();
    let div = document.create_element("div").unwrap();
    div.set_id(id);
    document.body().unwrap().append_child(&div).unwrap();
}

fn dataset() -> Dataset {
    let row = |abbr: &str, poverty: f64, healthcare: f64| CensusRecord {
        state: abbr.to_string(),
        abbr: abbr.to_string(),
        poverty,
        income: poverty * 3000.0,
        age: 35.0,
        healthcare,
        obesity: 30.0,
        smokes: 18.0,
    };
    Dataset::new(vec![row("AA", 10.0, 5.0), row("BB", 20.0, 8.0), row("CC", 30.0, 11.0)])
}

#[wasm_bindgen_test(async)]
async fn rebuilds_replace_the_svg_and_switches_move_circles() {
    host("svg-host");
    let mut config = ChartConfig::selectable();
    config.container = "#svg-host".into();
    config.transition_ms = 0;
    let backend = SvgBackend::new(config.container.clone()).unwrap();
    let mut coordinator = ChartCoordinator::new(backend, config).unwrap();
    let repository = StaticDatasetRepository::new(dataset());

    for _ in 0..3 {
        coordinator.rebuild(Viewport::new(1500.0, 900.0), &repository).await.unwrap();
    }

    let document = web_sys::window().unwrap().document().unwrap();
    assert_eq!(document.query_selector_all("#svg-host svg").unwrap().length(), 1);
    assert_eq!(document.query_selector_all("#svg-host circle").unwrap().length(), 3);
    assert_eq!(document.query_selector_all("#svg-host .aText.active").unwrap().length(), 2);

    coordinator.select_x("income").unwrap();

    let circle = document.query_selector("#svg-host circle").unwrap().unwrap();
    let expected = coordinator.surface().unwrap().markers[0].position.x;
    let cx: f64 = circle.get_attribute("cx").unwrap().parse().unwrap();
    assert!((cx - expected).abs() < 1e-6);
    let active = document.query_selector_all("#svg-host .aText.active").unwrap();
    let values: Vec<String> = (0..active.length())
        .filter_map(|i| active.item(i))
        .filter_map(|node| wasm_bindgen::JsCast::dyn_into::<web_sys::Element>(node).ok())
        .filter_map(|element| element.get_attribute("value"))
        .collect();
    assert_eq!(values.len(), 2);
    assert!(values.iter().any(|v| v.contains("income")));
}
