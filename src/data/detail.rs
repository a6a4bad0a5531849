//! Text-panel payload for the single selected material.

use crate::data::dataset::Dataset;
use crate::data::error_bars::{ErrorCross, ErrorSegmentSet};
use crate::data::gas::{Gas, GasSlot};
use crate::data::projection::{MetricFamily, ProjectedTable};

#[derive(Debug, Clone, PartialEq)]
pub struct GasDetail {
    pub gas: Gas,
    pub isotherm_count: usize,
    pub loading: Option<f64>,
    pub loading_error: Option<f64>,
    pub henry: Option<f64>,
    pub henry_error: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDetail {
    pub material: String,
    pub gases: [GasDetail; 2],
}

/// What the detail panel shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailPayload {
    /// Nothing (or several points) selected.
    #[default]
    Empty,
    Material(MaterialDetail),
}

fn magnitude(cross: Option<&ErrorCross>, slot: GasSlot) -> Option<f64> {
    let cross = cross.filter(|c| !c.is_collapsed())?;
    Some(match slot {
        GasSlot::First => cross.ex,
        GasSlot::Second => cross.ey,
    })
}

fn pick(values: &[Option<f64>], row: usize) -> Option<f64> {
    values.get(row).copied().flatten()
}

/// Build the payload for `row`. Returns `None` if the row does not exist.
pub fn material_detail(
    table: &ProjectedTable,
    dataset: &Dataset,
    errors: &ErrorSegmentSet,
    row: usize,
) -> Option<MaterialDetail> {
    let material = dataset.material(table.material_index(row)?)?;
    let row_errors = errors.get(row);
    let henry = table.columns(MetricFamily::Henry);
    let loading = table.columns(MetricFamily::Loading);

    let gas_detail = |slot: GasSlot| {
        let gas = table.pair().get(slot);
        let (henry_col, loading_col) = match slot {
            GasSlot::First => (&henry.x, &loading.x),
            GasSlot::Second => (&henry.y, &loading.y),
        };
        GasDetail {
            gas,
            isotherm_count: material.isotherm_count(gas),
            loading: pick(loading_col, row),
            loading_error: magnitude(row_errors.map(|e| &e.loading), slot),
            henry: pick(henry_col, row),
            henry_error: magnitude(row_errors.map(|e| &e.henry), slot),
        }
    };

    Some(MaterialDetail {
        material: material.id.clone(),
        gases: [gas_detail(GasSlot::First), gas_detail(GasSlot::Second)],
    })
}
