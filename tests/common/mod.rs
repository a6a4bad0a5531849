#![allow(dead_code)]

use std::sync::Arc;

use sepexplorer::{
    Dataset, Explorer, FetchedIsotherm, Gas, GasPair, GasRecord, IsothermFetch, MaterialRecord,
    PressureParams,
};

/// A linear loading curve `base + slope * i` over `len` grid points.
pub fn linear(base: f64, slope: f64, len: usize) -> Vec<Option<f64>> {
    (0..len).map(|i| Some(base + slope * i as f64)).collect()
}

pub fn record(henry: f64, base: f64, refs: &[&str]) -> GasRecord {
    GasRecord {
        henry: Some(henry),
        henry_error: Some(henry * 0.1),
        henry_count: Some(refs.len() as f64),
        loading: linear(base, 0.1, 40),
        loading_error: vec![Some(0.05); 40],
        loading_count: vec![Some(refs.len() as f64); 40],
        isotherms: refs.iter().map(|r| r.to_string()).collect(),
    }
}

/// Ten materials `M00`..`M09` measured for N2 and CO2, plus `NO-CO2`
/// (nitrogen only) and `NO-ISO` (CO2 entry without isotherm references).
pub fn dataset() -> Dataset {
    let mut materials: Vec<MaterialRecord> = (0..10)
        .map(|i| {
            let f = i as f64 + 1.0;
            MaterialRecord::new(format!("M{i:02}"))
                .with_gas(Gas::Nitrogen, record(f, 0.1 * f, &["n2-a", "n2-b"]))
                .with_gas(
                    Gas::CarbonDioxide,
                    record(10.0 * f, f, &["co2-a", "co2-b", "co2-c", "co2-d", "co2-e"]),
                )
        })
        .collect();
    materials.push(
        MaterialRecord::new("NO-CO2").with_gas(Gas::Nitrogen, record(1.0, 0.1, &["x"])),
    );
    materials.push(
        MaterialRecord::new("NO-ISO")
            .with_gas(Gas::Nitrogen, record(1.0, 0.1, &["x"]))
            .with_gas(Gas::CarbonDioxide, record(1.0, 0.1, &[])),
    );
    Dataset::from_materials(materials)
}

/// Resolves every reference to a small curve whose maxima are encoded in the
/// reference name, `"<p_max>:<l_max>"`; anything else resolves to `None`.
pub fn scaled_fetcher(reference: &str) -> Option<FetchedIsotherm> {
    let (p, l) = reference.split_once(':')?;
    let (p, l): (f64, f64) = (p.parse().ok()?, l.parse().ok()?);
    Some(FetchedIsotherm {
        label: reference.to_string(),
        loading: vec![0.0, l / 2.0, l],
        pressure: vec![0.0, p / 2.0, p],
        source_url: Some(format!("https://doi.org/10.0/{reference}")),
        temperature: Some(298.0),
    })
}

pub fn explorer_with(dataset: Dataset, fetcher: Arc<dyn IsothermFetch>) -> Explorer {
    let pair = GasPair::new(Gas::Nitrogen, Gas::CarbonDioxide).unwrap();
    Explorer::new(Arc::new(dataset), fetcher, pair, PressureParams::default()).unwrap()
}

pub fn explorer() -> Explorer {
    explorer_with(dataset(), Arc::new(scaled_fetcher))
}
