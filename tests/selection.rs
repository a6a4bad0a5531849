mod common;

use std::sync::Arc;
use std::time::Duration;

use sepexplorer::data::detail::DetailPayload;
use sepexplorer::data::error_bars::ErrorSegmentSet;
use sepexplorer::{
    Dataset, ExplorerError, ExplorerUpdate, FetchedIsotherm, Gas, GasSlot, MaterialRecord,
    MetricFamily, SelectionMode,
};

const WAIT: Duration = Duration::from_secs(5);

fn drain(rx: &std::sync::mpsc::Receiver<ExplorerUpdate>) -> Vec<ExplorerUpdate> {
    rx.try_iter().collect()
}

#[test]
fn single_then_multi_then_empty() {
    let mut ex = common::explorer();

    ex.set_selection(&[3]).unwrap();
    assert_eq!(ex.state().mode(), SelectionMode::Single(3));
    assert_eq!(ex.errors().len(), 1);
    assert_eq!(ex.errors().rows()[0].row, 3);
    ex.wait_isotherms(WAIT);
    // Median only: the fixture references do not resolve.
    for slot in GasSlot::BOTH {
        assert_eq!(ex.isotherms(slot).len(), 1);
        assert_eq!(ex.isotherms(slot).curves()[0].label, "median");
    }
    assert!(matches!(ex.detail(), DetailPayload::Material(d) if d.material == "M03"));

    ex.set_selection(&[7, 3]).unwrap();
    assert_eq!(ex.state().selected(), &[3, 7]);
    assert_eq!(ex.state().mode(), SelectionMode::Multi);
    let rows: Vec<usize> = ex.errors().rows().iter().map(|e| e.row).collect();
    assert_eq!(rows, vec![3, 7]);
    assert!(!ex.isotherms_loading());
    for slot in GasSlot::BOTH {
        assert!(ex.isotherms(slot).is_empty());
    }
    assert_eq!(ex.detail(), &DetailPayload::Empty);

    ex.set_selection(&[]).unwrap();
    assert_eq!(ex.state().mode(), SelectionMode::Idle);
    assert!(ex.errors().is_empty());
    for slot in GasSlot::BOTH {
        assert!(ex.isotherms(slot).is_empty());
        assert_eq!(ex.isotherms(slot).x_max(), 1.0);
    }
}

#[test]
fn detail_reports_values_and_errors() {
    let mut ex = common::explorer();
    ex.set_selection(&[3]).unwrap();
    let DetailPayload::Material(d) = ex.detail() else {
        panic!("expected a material payload");
    };
    let n2 = &d.gases[0];
    assert_eq!(n2.gas, Gas::Nitrogen);
    assert_eq!(n2.isotherm_count, 2);
    assert_eq!(n2.henry, Some(4.0));
    assert!((n2.henry_error.unwrap() - 0.4).abs() < 1e-12);
    assert_eq!(n2.loading_error, Some(0.05));
    let co2 = &d.gases[1];
    assert_eq!(co2.gas, Gas::CarbonDioxide);
    assert_eq!(co2.isotherm_count, 5);
    assert_eq!(co2.henry, Some(40.0));
}

#[test]
fn missing_errors_collapse_to_origin() {
    let mut ds_rec = common::record(1.0, 0.5, &["a"]);
    ds_rec.henry_error = None;
    let ds = Dataset::from_materials(vec![MaterialRecord::new("X")
        .with_gas(Gas::Nitrogen, ds_rec)
        .with_gas(Gas::CarbonDioxide, common::record(2.0, 1.0, &["b"]))]);
    let mut ex = common::explorer_with(ds, Arc::new(common::scaled_fetcher));
    ex.set_selection(&[0]).unwrap();

    let errs = &ex.errors().rows()[0];
    assert!(errs.henry.is_collapsed());
    assert_eq!(errs.henry.horizontal.points(), [[0.0, 0.0], [0.0, 0.0]]);
    assert!(!errs.loading.is_collapsed());
    let DetailPayload::Material(d) = ex.detail() else {
        panic!("expected a material payload");
    };
    assert_eq!(d.gases[0].henry_error, None);
    assert_eq!(d.gases[0].henry, Some(1.0));
}

#[test]
fn missing_center_collapses_and_patch_matches_rebuild() {
    let mut short = common::record(1.0, 0.5, &["a"]);
    short.loading.truncate(2);
    let ds = Dataset::from_materials(vec![MaterialRecord::new("SHORT")
        .with_gas(Gas::Nitrogen, short)
        .with_gas(Gas::CarbonDioxide, common::record(2.0, 1.0, &["b"]))]);
    let mut ex = common::explorer_with(ds, Arc::new(common::scaled_fetcher));
    ex.set_pressure(5);
    ex.set_selection(&[0]).unwrap();

    let errs = ex.errors().rows()[0];
    for cross in [errs.loading, errs.working_capacity] {
        assert!(cross.is_collapsed());
        assert_eq!((cross.ex, cross.ey), (0.0, 0.0));
        assert_eq!(cross.horizontal.points(), [[0.0, 0.0], [0.0, 0.0]]);
        assert_eq!(cross.vertical.points(), [[0.0, 0.0], [0.0, 0.0]]);
    }
    assert!(!errs.henry.is_collapsed());

    ex.set_pressure(1);
    let patched = ex.errors().rows()[0];
    let rebuilt = ErrorSegmentSet::build(ex.table(), ex.dataset(), ex.state().selected());
    assert_eq!(ex.errors(), &rebuilt);
    assert!(!patched.loading.is_collapsed());
    assert_eq!(patched.henry, errs.henry);
    assert_eq!(patched.working_capacity, errs.working_capacity);
}

#[test]
fn measured_zero_error_at_origin_is_reported() {
    let mut n2 = common::record(1.0, 0.0, &["a"]);
    n2.loading_error[0] = Some(0.0);
    let mut co2 = common::record(2.0, 0.0, &["b"]);
    co2.loading_error[0] = Some(0.0);
    let ds = Dataset::from_materials(vec![MaterialRecord::new("ZERO")
        .with_gas(Gas::Nitrogen, n2)
        .with_gas(Gas::CarbonDioxide, co2)]);
    let mut ex = common::explorer_with(ds, Arc::new(common::scaled_fetcher));
    ex.set_selection(&[0]).unwrap();

    assert!(!ex.errors().rows()[0].loading.is_collapsed());
    let DetailPayload::Material(d) = ex.detail() else {
        panic!("expected a material payload");
    };
    assert_eq!(d.gases[0].loading, Some(0.0));
    assert_eq!(d.gases[0].loading_error, Some(0.0));
    assert_eq!(d.gases[1].loading_error, Some(0.0));
}

#[test]
fn parameter_moves_patch_selected_errors() {
    let mut ex = common::explorer();
    ex.set_selection(&[2, 5]).unwrap();
    let henry_before = ex.errors().rows()[0].henry;
    let loading_before = ex.errors().rows()[0].loading;

    ex.set_pressure(10);
    let after = &ex.errors().rows()[0];
    assert_eq!(after.henry, henry_before);
    assert_ne!(after.loading, loading_before);
    let (x, _) = ex.table().columns(MetricFamily::Loading).center(2).unwrap();
    assert!((after.loading.horizontal.x0 - (x - 0.05)).abs() < 1e-12);

    ex.set_wc_range(1, 4).unwrap();
    let wc = ex.errors().rows()[1].working_capacity;
    // Endpoint errors add: 0.05 + 0.05.
    assert!((wc.ex - 0.1).abs() < 1e-12);
    let rebuilt = ErrorSegmentSet::build(ex.table(), ex.dataset(), ex.state().selected());
    assert_eq!(ex.errors(), &rebuilt);
}

#[test]
fn rejected_inputs_leave_state_untouched() {
    let mut ex = common::explorer();
    ex.set_selection(&[1]).unwrap();
    let before = ex.state().clone();
    let table_before = ex.table().clone();

    assert!(matches!(
        ex.set_gas_pair(Gas::Methane, Gas::Methane),
        Err(ExplorerError::SameGas(Gas::Methane))
    ));
    assert!(matches!(
        ex.set_wc_range(8, 2),
        Err(ExplorerError::InvalidRange { p1: 8, p2: 2 })
    ));
    assert!(matches!(
        ex.set_selection(&[1, 99]),
        Err(ExplorerError::SelectionOutOfRange { index: 99, rows: 10 })
    ));

    assert_eq!(ex.state(), &before);
    assert_eq!(ex.table(), &table_before);
    assert_eq!(ex.errors().len(), 1);

    ex.set_wc_range(4, 4).unwrap();
    assert_eq!(ex.state().pressure().p1, 4);
}

#[test]
fn gas_change_clears_selection_and_rebuilds() {
    let mut ex = common::explorer();
    ex.set_selection(&[1, 2]).unwrap();
    ex.set_gas_pair(Gas::CarbonDioxide, Gas::Nitrogen).unwrap();
    assert!(ex.state().selected().is_empty());
    assert!(ex.errors().is_empty());
    assert_eq!(ex.table().pair().first(), Gas::CarbonDioxide);
    assert_eq!(ex.table().len(), 10);

    ex.set_gas_pair(Gas::Methane, Gas::Nitrogen).unwrap();
    assert!(ex.table().is_empty());
}

#[test]
fn subscribers_see_each_step() {
    let mut ex = common::explorer();
    let rx = ex.subscribe();

    ex.set_pressure(4);
    assert_eq!(drain(&rx), vec![ExplorerUpdate::ColumnsPatched(MetricFamily::Loading)]);

    ex.set_selection(&[0, 1]).unwrap();
    assert_eq!(
        drain(&rx),
        vec![
            ExplorerUpdate::IsothermsCleared,
            ExplorerUpdate::ErrorsRebuilt,
            ExplorerUpdate::DetailChanged,
        ]
    );

    ex.set_wc_range(0, 3).unwrap();
    let updates = drain(&rx);
    assert_eq!(updates[0], ExplorerUpdate::ColumnsPatched(MetricFamily::WorkingCapacity));
    assert!(updates.contains(&ExplorerUpdate::ErrorsPatched(MetricFamily::WorkingCapacity)));

    let other = ex.subscribe();
    assert_eq!(ex.subscriber_count(), 2);
    drop(rx);
    assert_eq!(ex.subscriber_count(), 2);
    ex.set_pressure(2);
    assert_eq!(ex.subscriber_count(), 1);
    assert_eq!(drain(&other), vec![ExplorerUpdate::ColumnsPatched(MetricFamily::Loading)]);
}

#[test]
fn unresolved_references_are_skipped() {
    let refs = ["2:3", "missing", "6:1", "bad", "4:9"];
    let ds = Dataset::from_materials(vec![MaterialRecord::new("MOF")
        .with_gas(Gas::Nitrogen, common::record(1.0, 0.5, &refs))
        .with_gas(Gas::CarbonDioxide, common::record(2.0, 1.0, &[]))]);
    // Only nitrogen has references, so the row is filtered out for this pair.
    let mut ex = common::explorer_with(ds.clone(), Arc::new(common::scaled_fetcher));
    assert!(ex.table().is_empty());

    let ds = Dataset::from_materials(vec![MaterialRecord::new("MOF")
        .with_gas(Gas::Nitrogen, common::record(1.0, 0.5, &refs))
        .with_gas(Gas::CarbonDioxide, common::record(2.0, 1.0, &["0.5:0.5"]))]);
    ex = common::explorer_with(ds, Arc::new(common::scaled_fetcher));
    ex.set_selection(&[0]).unwrap();
    ex.wait_isotherms(WAIT);

    let n2 = ex.isotherms(GasSlot::First);
    assert_eq!(n2.len(), 4);
    assert_eq!(n2.curves()[0].label, "median");
    assert!(n2.curves()[1..].iter().all(|c| c.reference.is_some()));
    assert_eq!(n2.x_max(), 6.0);
    assert_eq!(n2.y_max(), 9.0);
    // Colors cycle through the palette in arrival order.
    assert_ne!(n2.curves()[1].color, n2.curves()[2].color);

    // Below the floor the bounds stay at 1.0.
    let co2 = ex.isotherms(GasSlot::Second);
    assert_eq!(co2.len(), 2);
    assert_eq!(co2.x_max(), 1.0);
    assert_eq!(co2.y_max(), 1.0);
}

#[test]
fn superseded_results_are_discarded() {
    let slow = |reference: &str| -> Option<FetchedIsotherm> {
        std::thread::sleep(Duration::from_millis(20));
        common::scaled_fetcher(reference)
    };
    let material = |id: &str, refs: &[&str]| {
        MaterialRecord::new(id)
            .with_gas(Gas::Nitrogen, common::record(1.0, 0.5, refs))
            .with_gas(Gas::CarbonDioxide, common::record(2.0, 1.0, refs))
    };
    let ds = Dataset::from_materials(vec![
        material("A", &["50:50", "51:51", "52:52", "53:53"]),
        material("B", &["2:2", "3:3"]),
    ]);
    let mut ex = common::explorer_with(ds, Arc::new(slow));

    ex.set_selection(&[0]).unwrap();
    std::thread::sleep(Duration::from_millis(30));
    ex.set_selection(&[1]).unwrap();
    ex.wait_isotherms(WAIT);
    // Give the abandoned workers time to post whatever they still had.
    std::thread::sleep(Duration::from_millis(100));
    ex.poll_isotherms();

    for slot in GasSlot::BOTH {
        let set = ex.isotherms(slot);
        let mut refs: Vec<&str> = set
            .curves()
            .iter()
            .filter_map(|c| c.reference.as_deref())
            .collect();
        refs.sort();
        assert_eq!(refs, vec!["2:2", "3:3"]);
        assert_eq!(set.x_max(), 3.0);
    }
}
