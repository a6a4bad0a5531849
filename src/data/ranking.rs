//! Sortable view over the derived selectivity scores.

use std::cmp::Ordering;

use crate::data::projection::ProjectedTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankingColumn {
    #[default]
    Selectivity,
    PsaLoading,
    PsaWorkingCapacity,
}

impl RankingColumn {
    pub const ALL: [RankingColumn; 3] = [
        RankingColumn::Selectivity,
        RankingColumn::PsaLoading,
        RankingColumn::PsaWorkingCapacity,
    ];

    pub fn header(self) -> &'static str {
        match self {
            RankingColumn::Selectivity => "sel",
            RankingColumn::PsaLoading => "psa_L",
            RankingColumn::PsaWorkingCapacity => "psa_W",
        }
    }
}

/// One row of the ranking table, borrowed from a [`ProjectedTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingRow<'a> {
    /// Row index in the projected table (selection index space).
    pub row: usize,
    pub label: &'a str,
    pub sel: Option<f64>,
    pub psa_loading: Option<f64>,
    pub psa_working_capacity: Option<f64>,
}

impl RankingRow<'_> {
    pub fn value(&self, column: RankingColumn) -> Option<f64> {
        match column {
            RankingColumn::Selectivity => self.sel,
            RankingColumn::PsaLoading => self.psa_loading,
            RankingColumn::PsaWorkingCapacity => self.psa_working_capacity,
        }
    }
}

/// All rows in table order.
pub fn ranking_rows(table: &ProjectedTable) -> Vec<RankingRow<'_>> {
    let ranking = table.ranking();
    table
        .labels()
        .iter()
        .enumerate()
        .map(|(row, label)| RankingRow {
            row,
            label,
            sel: ranking.sel.get(row).copied().flatten(),
            psa_loading: ranking.psa_loading.get(row).copied().flatten(),
            psa_working_capacity: ranking.psa_working_capacity.get(row).copied().flatten(),
        })
        .collect()
}

/// Rows sorted by `column`, highest first; missing scores sink to the bottom.
/// Ties keep table order.
pub fn ranked_by(table: &ProjectedTable, column: RankingColumn) -> Vec<RankingRow<'_>> {
    let mut rows = ranking_rows(table);
    rows.sort_by(|a, b| match (a.value(column), b.value(column)) {
        (Some(va), Some(vb)) => vb.partial_cmp(&va).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    rows
}
