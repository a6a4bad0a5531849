//! Per-material plotted columns for one gas pair.
//!
//! A [`ProjectedTable`] holds one row per material that has isotherms for
//! both gases of the pair. The row order is the index space selections refer
//! into; it only changes on a full rebuild (new gas pair). Pressure changes
//! patch the affected metric family in place.

use crate::data::dataset::{Dataset, GasRecord};
use crate::data::gas::{GasPair, GasSlot};
use crate::data::sampler::{sample, window};

/// The three plotted metric families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricFamily {
    /// Henry's constant (scalar per gas).
    Henry,
    /// Uptake at the selected pressure index `lp`.
    Loading,
    /// Uptake difference between `p2` and `p1`.
    WorkingCapacity,
}

impl MetricFamily {
    pub const ALL: [MetricFamily; 3] = [
        MetricFamily::Henry,
        MetricFamily::Loading,
        MetricFamily::WorkingCapacity,
    ];

    /// Short key (K / L / W) used for column naming.
    pub fn key(self) -> &'static str {
        match self {
            MetricFamily::Henry => "K",
            MetricFamily::Loading => "L",
            MetricFamily::WorkingCapacity => "W",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MetricFamily::Henry => "Initial Henry's constant",
            MetricFamily::Loading => "Uptake at selected pressure",
            MetricFamily::WorkingCapacity => "Working capacity in selected range",
        }
    }
}

/// Pressure indices on the 0.5 bar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressureParams {
    /// Index for the loading family.
    pub lp: usize,
    /// Lower working-capacity index.
    pub p1: usize,
    /// Upper working-capacity index.
    pub p2: usize,
}

impl Default for PressureParams {
    fn default() -> Self {
        Self { lp: 0, p1: 0, p2: 9 }
    }
}

/// Value of one family for one gas record.
fn family_value(record: &GasRecord, family: MetricFamily, params: &PressureParams) -> Option<f64> {
    match family {
        MetricFamily::Henry => record.henry,
        MetricFamily::Loading => sample(&record.loading, params.lp),
        MetricFamily::WorkingCapacity => {
            window(&record.loading, params.p1, params.p2).map(|(lo, hi)| hi - lo)
        }
    }
}

/// Significance (number of contributing isotherms) of one family for one gas record.
///
/// For the working capacity the two endpoint counts are summed, while the
/// value itself is a difference.
fn family_count(record: &GasRecord, family: MetricFamily, params: &PressureParams) -> Option<f64> {
    match family {
        MetricFamily::Henry => record.henry_count,
        MetricFamily::Loading => sample(&record.loading_count, params.lp),
        MetricFamily::WorkingCapacity => {
            window(&record.loading_count, params.p1, params.p2).map(|(lo, hi)| lo + hi)
        }
    }
}

fn add(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(a? + b?)
}

/// `num / den`, missing when either side is missing or the denominator is zero.
pub fn ratio(num: Option<f64>, den: Option<f64>) -> Option<f64> {
    let den = den?;
    if den == 0.0 {
        return None;
    }
    Some(num? / den)
}

/// x/y coordinates and significance of one family, one entry per row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricColumns {
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
    pub n_x: Vec<Option<f64>>,
    pub n_y: Vec<Option<f64>>,
    /// `n_x + n_y`, drives marker colour.
    pub n: Vec<Option<f64>>,
}

impl MetricColumns {
    fn with_capacity(rows: usize) -> Self {
        Self {
            x: Vec::with_capacity(rows),
            y: Vec::with_capacity(rows),
            n_x: Vec::with_capacity(rows),
            n_y: Vec::with_capacity(rows),
            n: Vec::with_capacity(rows),
        }
    }

    /// Both coordinates of a row, if both are present.
    pub fn center(&self, row: usize) -> Option<(f64, f64)> {
        let x = self.x.get(row).copied().flatten()?;
        let y = self.y.get(row).copied().flatten()?;
        Some((x, y))
    }
}

/// Derived ranking scores.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingColumns {
    /// Henry selectivity `K_y / K_x`.
    pub sel: Vec<Option<f64>>,
    /// `(L_y / L_x) * sel`.
    pub psa_loading: Vec<Option<f64>>,
    /// `(W_y / W_x) * sel`.
    pub psa_working_capacity: Vec<Option<f64>>,
}

fn psa(columns: &MetricColumns, sel: &[Option<f64>]) -> Vec<Option<f64>> {
    columns
        .x
        .iter()
        .zip(&columns.y)
        .zip(sel)
        .map(|((x, y), s)| Some(ratio(*y, *x)? * (*s)?))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedTable {
    pair: GasPair,
    params: PressureParams,
    /// Dataset index of each row.
    rows: Vec<usize>,
    labels: Vec<String>,
    henry: MetricColumns,
    loading: MetricColumns,
    working_capacity: MetricColumns,
    ranking: RankingColumns,
}

impl ProjectedTable {
    /// Full rebuild: row filter plus every column.
    pub fn build(dataset: &Dataset, pair: GasPair, params: PressureParams) -> Self {
        let rows: Vec<usize> = dataset
            .materials()
            .iter()
            .enumerate()
            .filter(|(_, m)| {
                GasSlot::BOTH
                    .iter()
                    .all(|slot| m.isotherm_count(pair.get(*slot)) > 0)
            })
            .map(|(i, _)| i)
            .collect();
        let labels = rows
            .iter()
            .filter_map(|&i| dataset.material(i).map(|m| m.id.clone()))
            .collect();

        let mut table = Self {
            pair,
            params,
            rows,
            labels,
            henry: MetricColumns::default(),
            loading: MetricColumns::default(),
            working_capacity: MetricColumns::default(),
            ranking: RankingColumns::default(),
        };
        for family in MetricFamily::ALL {
            let cols = table.project(dataset, family);
            *table.columns_mut(family) = cols;
        }
        table.ranking.sel = table
            .henry
            .x
            .iter()
            .zip(&table.henry.y)
            .map(|(x, y)| ratio(*y, *x))
            .collect();
        table.ranking.psa_loading = psa(&table.loading, &table.ranking.sel);
        table.ranking.psa_working_capacity = psa(&table.working_capacity, &table.ranking.sel);
        table
    }

    fn project(&self, dataset: &Dataset, family: MetricFamily) -> MetricColumns {
        let mut cols = MetricColumns::with_capacity(self.rows.len());
        for &i in &self.rows {
            let material = dataset.material(i);
            let value = |slot: GasSlot| {
                material
                    .and_then(|m| m.gas(self.pair.get(slot)))
                    .and_then(|r| family_value(r, family, &self.params))
            };
            let count = |slot: GasSlot| {
                material
                    .and_then(|m| m.gas(self.pair.get(slot)))
                    .and_then(|r| family_count(r, family, &self.params))
            };
            let (n_x, n_y) = (count(GasSlot::First), count(GasSlot::Second));
            cols.x.push(value(GasSlot::First));
            cols.y.push(value(GasSlot::Second));
            cols.n_x.push(n_x);
            cols.n_y.push(n_y);
            cols.n.push(add(n_x, n_y));
        }
        cols
    }

    /// Patch the loading family (and its ranking score) for a new `lp`.
    pub fn update_loading(&mut self, dataset: &Dataset, lp: usize) {
        self.params.lp = lp;
        self.loading = self.project(dataset, MetricFamily::Loading);
        self.ranking.psa_loading = psa(&self.loading, &self.ranking.sel);
    }

    /// Patch the working-capacity family (and its ranking score) for a new range.
    pub fn update_working_capacity(&mut self, dataset: &Dataset, p1: usize, p2: usize) {
        self.params.p1 = p1;
        self.params.p2 = p2;
        self.working_capacity = self.project(dataset, MetricFamily::WorkingCapacity);
        self.ranking.psa_working_capacity = psa(&self.working_capacity, &self.ranking.sel);
    }

    pub fn pair(&self) -> GasPair {
        self.pair
    }

    pub fn params(&self) -> PressureParams {
        self.params
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, row: usize) -> Option<&str> {
        self.labels.get(row).map(String::as_str)
    }

    /// Dataset index behind a table row.
    pub fn material_index(&self, row: usize) -> Option<usize> {
        self.rows.get(row).copied()
    }

    pub fn columns(&self, family: MetricFamily) -> &MetricColumns {
        match family {
            MetricFamily::Henry => &self.henry,
            MetricFamily::Loading => &self.loading,
            MetricFamily::WorkingCapacity => &self.working_capacity,
        }
    }

    fn columns_mut(&mut self, family: MetricFamily) -> &mut MetricColumns {
        match family {
            MetricFamily::Henry => &mut self.henry,
            MetricFamily::Loading => &mut self.loading,
            MetricFamily::WorkingCapacity => &mut self.working_capacity,
        }
    }

    pub fn ranking(&self) -> &RankingColumns {
        &self.ranking
    }
}
