//! Design Pipeline Tests
//!
//! Runs the full screen → pump → casing sequence against the reference bore
//! (4320 m³/day, K = 5 m/day, 30 year life, 100qa top layer at 3 m) and
//! checks selected sizes, the casing schedule, and failure semantics.

use geodrill::design_engine::next_largest;
use geodrill::types::{CasingSize, PumpOutputs, ScreenOutputs};
use geodrill::{
    AquiferLayer, AquiferLayerTable, CalculationError, CasingCatalog, CasingSchedule, CasingStage,
    DesignPipeline, DrillingCatalog, InputParameters, LookupError, PipelineStage, StageError,
    ValidationError, WellBoreParameterStore,
};

const EPS: f64 = 1e-9;

// ============================================================================
// Fixtures
// ============================================================================

/// Reference stratigraphy with the target base at `depth_to_top_screen` and
/// the next layer `thickness` metres below it.
fn layers(top_base: f64, depth_to_top_screen: f64, thickness: f64) -> AquiferLayerTable {
    AquiferLayerTable::new(vec![
        AquiferLayer::new("100qa", true, top_base),
        AquiferLayer::new("105utaf", false, top_base.max(100.0)),
        AquiferLayer::new("109lmta", true, depth_to_top_screen),
        AquiferLayer::new("111lta", true, depth_to_top_screen + thickness),
        AquiferLayer::new("114bse", false, depth_to_top_screen + thickness + 200.0),
    ])
    .expect("valid layers")
}

fn params() -> InputParameters {
    InputParameters {
        required_flow_rate: Some(4320.0),
        hydraulic_conductivity: Some(5.0),
        average_porosity: Some(0.25),
        bore_lifetime_year: Some(30.0),
        groundwater_depth: Some(25.0),
        long_term_decline_rate: Some(1.0),
        allowable_drawdown: Some(25.0),
        safety_margin: Some(25.0),
        target_aquifer_layer: Some("109lmta".to_string()),
        top_aquifer_layer: Some("100qa".to_string()),
    }
}

fn initialised(store: WellBoreParameterStore, layers: AquiferLayerTable) -> WellBoreParameterStore {
    let mut store = store;
    store
        .initialise_and_validate_input_params(&params(), layers)
        .expect("inputs should validate");
    store
}

fn run(is_production: bool, top_base: f64, dts: f64, thickness: f64) -> WellBoreParameterStore {
    let mut store = initialised(
        WellBoreParameterStore::new(is_production),
        layers(top_base, dts, thickness),
    );
    DesignPipeline::new().run(&mut store).expect("design run should succeed");
    store
}

fn outputs(store: &WellBoreParameterStore) -> (&ScreenOutputs, &PumpOutputs, &CasingSchedule) {
    (
        store.screen().expect("screen outputs"),
        store.pump().expect("pump outputs"),
        store.casing_schedule().expect("casing schedule"),
    )
}

fn assert_section(
    schedule: &CasingSchedule,
    stage: CasingStage,
    top: f64,
    bottom: f64,
    casing: f64,
    bit: f64,
) {
    let s = schedule.get(stage);
    assert_eq!(s.top, Some(top), "{stage} top");
    assert!((s.bottom.expect("bottom") - bottom).abs() < EPS, "{stage} bottom {:?}", s.bottom);
    assert_eq!(s.casing_diameter, Some(casing), "{stage} casing");
    assert_eq!(s.drill_bit_diameter, Some(bit), "{stage} drill bit");
}

fn assert_absent(schedule: &CasingSchedule, stage: CasingStage) {
    let s = schedule.get(stage);
    assert!(!s.is_populated(), "{stage} should be absent");
    assert_eq!(s.casing_diameter, None);
    assert_eq!(s.drill_bit_diameter, None);
}

// ============================================================================
// Production bores
// ============================================================================

#[test]
fn production_reference_bore_at_1000m() {
    let store = run(true, 3.0, 1000.0, 221.0);
    assert!(store.calculation_completed());
    let (screen, pump, schedule) = outputs(&store);

    assert!((screen.screen_length - 69.742_095_174_951_2).abs() / 69.74 < 0.005);
    assert!((screen.screen_length_error.lower - 62.767_885_657_456_08).abs() < EPS);
    assert!((screen.screen_length_error.upper - 76.716_304_692_446_33).abs() < EPS);
    assert_eq!(screen.open_hole_diameter, 0.1905);

    // At 1000 m the narrower casings are friction-limited; the cheapest
    // feasible configuration is 8-5/8" casing over a 5-1/2" screen.
    assert_eq!(screen.min_total_casing_production_screen_diameter, Some(0.1397));
    assert_eq!(screen.screen_diameter, 0.1397);

    assert_eq!(pump.pump_inlet_depth, 105.0);
    assert!((pump.pump_diameter - 0.254).abs() < EPS);
    assert!((pump.minimum_pump_housing_diameter - 0.285_870_494_793_916_13).abs() < 1e-12);

    assert_section(schedule, CasingStage::PreCollar, 0.0, 12.0, 0.762, 0.9144);
    assert_absent(schedule, CasingStage::SuperficialCasing);
    assert_section(schedule, CasingStage::PumpChamberCasing, 0.0, 105.0, 0.339725, 0.4445);
    assert_section(schedule, CasingStage::IntermediateCasing, 105.0, 990.0, 0.168275, 0.269875);
    assert_section(schedule, CasingStage::ScreenRiser, 980.0, 1000.0, 0.1397, 0.2286);
    assert_section(schedule, CasingStage::Screen, 1000.0, 1070.0, 0.1397, 0.2286);
    assert_eq!(schedule.total_depth(), 1070.0);
}

#[test]
fn production_candidate_table_at_1000m() {
    let store = run(true, 3.0, 1000.0, 221.0);
    let table = &store.screen().expect("screen").screen_candidate_table;
    assert_eq!(table.len(), store.casing_catalog().len());

    // 4" to 7" casing: friction alone exceeds 20 m
    for row in &table[..6] {
        assert!(row.friction_loss > 20.0, "{row:?}");
        assert_eq!(row.min_screen_diameter_for_friction, None);
        assert_eq!(row.total_casing_metric, None);
    }

    let row = &table[6];
    assert_eq!(row.candidate_diameter, 0.219075);
    assert!((row.friction_loss - 13.373).abs() < 1e-3);
    assert_eq!(row.selected_screen_diameter, Some(0.1397));
    let best = row.total_casing_metric.expect("feasible");

    for other in table.iter().filter_map(|r| r.total_casing_metric) {
        assert!(best <= other);
    }
}

#[test]
fn production_reference_bore_at_550m() {
    let store = run(true, 3.0, 550.0, 221.0);
    let (screen, _, schedule) = outputs(&store);

    assert!((screen.screen_length - 69.742_095_174_951_2).abs() < EPS);
    assert_eq!(screen.min_total_casing_production_screen_diameter, Some(0.1143));
    assert_eq!(screen.screen_diameter, 0.1143);

    let table = &screen.screen_candidate_table;
    assert!((table[0].friction_loss - 310.344_777_721_172_14).abs() < 1e-6);
    let row = &table[6];
    assert!((row.min_screen_diameter_for_friction.expect("feasible") - 0.111_255_855_522_634_78).abs() < 1e-9);
    assert!((row.total_casing_metric.expect("feasible") - 396.695_255_030_778_47).abs() < 1e-6);

    assert_section(schedule, CasingStage::PumpChamberCasing, 0.0, 105.0, 0.339725, 0.4445);
    assert_section(schedule, CasingStage::IntermediateCasing, 105.0, 540.0, 0.127, 0.2159);
    assert_section(schedule, CasingStage::ScreenRiser, 530.0, 550.0, 0.1143, 0.2159);
    assert_section(schedule, CasingStage::Screen, 550.0, 620.0, 0.1143, 0.2159);
}

#[test]
fn deep_top_aquifer_adds_superficial_casing_around_pump_chamber() {
    let store = run(true, 30.0, 1000.0, 221.0);
    let (_, _, schedule) = outputs(&store);

    assert_section(schedule, CasingStage::PreCollar, 0.0, 12.0, 0.762, 0.9144);
    assert_section(schedule, CasingStage::SuperficialCasing, 0.0, 38.5, 0.473075, 0.6096);
    assert!(schedule.is_included(CasingStage::PumpChamberCasing));
    assert!(schedule.check_ordering().is_ok());
}

#[test]
fn scaled_pre_collar_inside_band() {
    let store = run(true, 15.0, 1000.0, 221.0);
    let (_, _, schedule) = outputs(&store);
    assert_eq!(schedule.get(CasingStage::PreCollar).bottom, Some(168.0));
    assert_absent(schedule, CasingStage::SuperficialCasing);
}

// ============================================================================
// Injection bores
// ============================================================================

#[test]
fn injection_reference_bore() {
    let store = run(false, 3.0, 1000.0, 221.0);
    let (screen, _, schedule) = outputs(&store);

    assert!((screen.screen_length - 139.484_190_349_902_4).abs() < EPS);
    assert_eq!(screen.open_hole_diameter, 0.1905);
    assert_eq!(screen.screen_diameter, 0.1016);
    assert_eq!(screen.min_total_casing_production_screen_diameter, None);
    assert!(screen.screen_candidate_table.is_empty());

    assert_absent(schedule, CasingStage::PumpChamberCasing);
    assert_section(schedule, CasingStage::IntermediateCasing, 0.0, 990.0, 0.1143, 0.2159);
    assert_section(schedule, CasingStage::Screen, 1000.0, 1139.0, 0.1016, 0.1905);
}

#[test]
fn injection_screen_capped_at_thin_aquifer() {
    let store = run(false, 3.0, 1000.0, 108.0);
    let (screen, _, schedule) = outputs(&store);

    assert_eq!(screen.screen_length, 108.0);
    assert!((screen.screen_length_error.lower - 97.2).abs() < EPS);
    assert_eq!(screen.screen_length_error.upper, 108.0);
    assert_eq!(screen.open_hole_diameter, 0.2159);
    assert_eq!(screen.screen_diameter, 0.1143);
    assert_section(schedule, CasingStage::IntermediateCasing, 0.0, 990.0, 0.127, 0.2159);
    assert_section(schedule, CasingStage::Screen, 1000.0, 1108.0, 0.1143, 0.2159);
}

#[test]
fn injection_superficial_casing_sized_from_intermediate() {
    let store = run(false, 30.0, 1000.0, 221.0);
    let (_, _, schedule) = outputs(&store);
    assert_absent(schedule, CasingStage::PumpChamberCasing);
    assert_section(schedule, CasingStage::SuperficialCasing, 0.0, 38.5, 0.127, 0.2159);
}

#[test]
fn injection_screen_is_twice_production_before_cap() {
    let production = run(true, 3.0, 1000.0, 1000.0);
    let injection = run(false, 3.0, 1000.0, 1000.0);
    let p = production.screen().expect("screen").screen_length;
    let i = injection.screen().expect("screen").screen_length;
    assert!((i - 2.0 * p).abs() < EPS);
}

// ============================================================================
// Invariants across scenarios
// ============================================================================

#[test]
fn screen_length_within_aquifer_and_band() {
    for &(production, thickness) in &[(true, 221.0), (true, 50.0), (false, 221.0), (false, 108.0)] {
        let store = run(production, 3.0, 1000.0, thickness);
        let screen = store.screen().expect("screen");
        assert!(screen.screen_length > 0.0);
        assert!(screen.screen_length <= thickness);
        assert!(screen.screen_length_error.contains(screen.screen_length));
    }
}

#[test]
fn schedule_rows_are_ordered() {
    for &(production, top_base) in &[(true, 3.0), (true, 30.0), (false, 3.0), (false, 15.0)] {
        let store = run(production, top_base, 1000.0, 221.0);
        let schedule = store.casing_schedule().expect("schedule");
        assert!(schedule.check_ordering().is_ok());
        let populated: Vec<_> = schedule.populated().collect();
        for pair in populated.windows(2) {
            assert!(pair[0].stage < pair[1].stage);
            assert!(pair[0].top <= pair[1].top);
        }
        for s in &populated {
            assert!(s.top <= s.bottom);
            assert!(s.drill_bit_diameter.is_some());
        }
    }
}

#[test]
fn catalog_lookups_round_trip() {
    let casing = CasingCatalog::default();
    for size in casing.sizes() {
        assert_eq!(casing.recommended_bit(size.metres), Ok(size.recommended_bit_metres));
    }
    let drilling = DrillingCatalog::default();
    for size in drilling.sizes() {
        assert_eq!(
            drilling.recommended_screen(size.metres),
            Ok(size.recommended_screen_metres)
        );
    }
}

#[test]
fn next_largest_is_minimum_strictly_greater() {
    let sizes = CasingCatalog::default().metres();
    for v in [0.0, 0.1016, 0.12, 0.3, 0.6096, 0.7] {
        let expected = sizes.iter().copied().filter(|&c| c > v).reduce(f64::min);
        assert_eq!(next_largest(v, &sizes).ok(), expected, "value {v}");
    }
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn bottommost_target_fails_before_any_stage() {
    let mut store = WellBoreParameterStore::new(true);
    let mut p = params();
    p.target_aquifer_layer = Some("114bse".to_string());
    let err = store
        .initialise_and_validate_input_params(&p, layers(3.0, 1000.0, 221.0))
        .unwrap_err();
    assert_eq!(err, ValidationError::TargetIsBottommost("114bse".to_string()));
    assert!(!store.ready_for_calculation());

    let err = DesignPipeline::new().run(&mut store).unwrap_err();
    assert_eq!(err.source, StageError::NotReady);
    assert!(!store.calculation_completed());
}

#[test]
fn missing_drill_bit_is_a_lookup_error() {
    // Drop the 30" row: the pre-collar casing no longer has a bit
    let sizes: Vec<CasingSize> = CasingCatalog::default()
        .sizes()
        .iter()
        .copied()
        .filter(|s| s.metres != 0.762)
        .collect();
    let catalog = CasingCatalog::new(sizes).expect("still sorted");
    let mut store = initialised(
        WellBoreParameterStore::new(true).with_casing_catalog(catalog),
        layers(3.0, 1000.0, 221.0),
    );

    let err = DesignPipeline::new().run(&mut store).unwrap_err();
    assert_eq!(err.stage, PipelineStage::Casing);
    assert!(err.is_lookup());
    assert_eq!(
        err.source,
        StageError::Lookup(LookupError::RecommendedBitMissing { casing_diameter: 0.762 })
    );

    assert!(!store.calculation_completed());
    assert!(store.screen().is_none());
    assert!(store.pump().is_none());
    assert!(store.casing_schedule().is_none());
}

#[test]
fn all_candidates_friction_limited() {
    let sizes: Vec<CasingSize> = CasingCatalog::default().sizes()[..4].to_vec();
    let catalog = CasingCatalog::new(sizes).expect("sorted");
    let mut store = initialised(
        WellBoreParameterStore::new(true).with_casing_catalog(catalog),
        layers(3.0, 1000.0, 221.0),
    );

    let err = DesignPipeline::new().run(&mut store).unwrap_err();
    assert_eq!(err.stage, PipelineStage::Screen);
    assert_eq!(
        err.source,
        StageError::Calculation(CalculationError::NoFeasibleScreenDiameter)
    );
    assert!(store.screen().is_none());
}

#[test]
fn zero_thickness_aquifer_fails_in_screen_stage() {
    let mut store = initialised(WellBoreParameterStore::new(true), layers(3.0, 1000.0, 0.0));
    let err = DesignPipeline::new().run(&mut store).unwrap_err();
    assert_eq!(err.stage, PipelineStage::Screen);
    assert!(matches!(
        err.source,
        StageError::Calculation(CalculationError::NonFinite { .. })
    ));
}

#[test]
fn rerun_replaces_outputs() {
    let mut store = run(true, 3.0, 1000.0, 221.0);
    let first = store.casing_schedule().cloned();

    let mut pipeline = DesignPipeline::new();
    pipeline.run(&mut store).expect("second run");
    assert!(store.calculation_completed());
    assert_eq!(store.casing_schedule().cloned(), first);
    assert_eq!(pipeline.stats().runs_completed, 1);
}
