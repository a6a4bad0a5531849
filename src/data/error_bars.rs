//! Error crosses drawn around selected points.
//!
//! Each selected row gets one cross per metric family: a horizontal segment
//! spanning `x ± ex` and a vertical one spanning `y ± ey`. When a center
//! coordinate or an error magnitude is missing the cross collapses onto the
//! origin with zero magnitude, so renderers never see a hole.

use crate::data::dataset::{Dataset, GasRecord};
use crate::data::gas::GasSlot;
use crate::data::projection::{MetricFamily, PressureParams, ProjectedTable};
use crate::data::sampler::sample;

/// A line segment from `(x0, y0)` to `(x1, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Segment {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Segment {
    pub fn points(&self) -> [[f64; 2]; 2] {
        [[self.x0, self.y0], [self.x1, self.y1]]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorCross {
    pub horizontal: Segment,
    pub vertical: Segment,
    /// Error magnitude along x (gas 1).
    pub ex: f64,
    /// Error magnitude along y (gas 2).
    pub ey: f64,
    /// Set for the missing-data fallback; a measured `0 ± 0` at the origin is not collapsed.
    collapsed: bool,
}

impl Default for ErrorCross {
    fn default() -> Self {
        Self::collapsed()
    }
}

impl ErrorCross {
    /// Zero-length cross at the origin.
    pub fn collapsed() -> Self {
        Self {
            horizontal: Segment::default(),
            vertical: Segment::default(),
            ex: 0.0,
            ey: 0.0,
            collapsed: true,
        }
    }

    pub fn around(x: f64, y: f64, ex: f64, ey: f64) -> Self {
        Self {
            horizontal: Segment {
                x0: x - ex,
                y0: y,
                x1: x + ex,
                y1: y,
            },
            vertical: Segment {
                x0: x,
                y0: y - ey,
                x1: x,
                y1: y + ey,
            },
            ex,
            ey,
            collapsed: false,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }
}

/// Error crosses of one selected row.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RowErrors {
    pub row: usize,
    pub henry: ErrorCross,
    pub loading: ErrorCross,
    pub working_capacity: ErrorCross,
}

impl RowErrors {
    pub fn get(&self, family: MetricFamily) -> &ErrorCross {
        match family {
            MetricFamily::Henry => &self.henry,
            MetricFamily::Loading => &self.loading,
            MetricFamily::WorkingCapacity => &self.working_capacity,
        }
    }

    fn get_mut(&mut self, family: MetricFamily) -> &mut ErrorCross {
        match family {
            MetricFamily::Henry => &mut self.henry,
            MetricFamily::Loading => &mut self.loading,
            MetricFamily::WorkingCapacity => &mut self.working_capacity,
        }
    }
}

/// Error magnitude of one family for one gas record. Errors of the two
/// working-capacity endpoints add up.
fn family_error(record: &GasRecord, family: MetricFamily, params: &PressureParams) -> Option<f64> {
    match family {
        MetricFamily::Henry => record.henry_error,
        MetricFamily::Loading => sample(&record.loading_error, params.lp),
        MetricFamily::WorkingCapacity => Some(
            sample(&record.loading_error, params.p1)? + sample(&record.loading_error, params.p2)?,
        ),
    }
}

fn cross_for(
    table: &ProjectedTable,
    dataset: &Dataset,
    row: usize,
    family: MetricFamily,
) -> ErrorCross {
    let Some((x, y)) = table.columns(family).center(row) else {
        return ErrorCross::collapsed();
    };
    let material = table.material_index(row).and_then(|i| dataset.material(i));
    let params = table.params();
    let error = |slot: GasSlot| {
        material
            .and_then(|m| m.gas(table.pair().get(slot)))
            .and_then(|r| family_error(r, family, &params))
    };
    match (error(GasSlot::First), error(GasSlot::Second)) {
        (Some(ex), Some(ey)) => ErrorCross::around(x, y, ex, ey),
        _ => ErrorCross::collapsed(),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorSegmentSet {
    rows: Vec<RowErrors>,
}

impl ErrorSegmentSet {
    /// Full rebuild for every selected row and every family.
    pub fn build(table: &ProjectedTable, dataset: &Dataset, selected: &[usize]) -> Self {
        let rows = selected
            .iter()
            .map(|&row| RowErrors {
                row,
                henry: cross_for(table, dataset, row, MetricFamily::Henry),
                loading: cross_for(table, dataset, row, MetricFamily::Loading),
                working_capacity: cross_for(table, dataset, row, MetricFamily::WorkingCapacity),
            })
            .collect();
        Self { rows }
    }

    /// Recompute one family for the rows already present, leaving the others untouched.
    pub fn update_family(&mut self, table: &ProjectedTable, dataset: &Dataset, family: MetricFamily) {
        for entry in &mut self.rows {
            *entry.get_mut(family) = cross_for(table, dataset, entry.row, family);
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn rows(&self) -> &[RowErrors] {
        &self.rows
    }

    pub fn get(&self, row: usize) -> Option<&RowErrors> {
        self.rows.iter().find(|e| e.row == row)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
