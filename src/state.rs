//! The interactive parameters: gas pair, pressure indices and selected rows.
//!
//! Only [`Explorer`](crate::controller::Explorer) mutates this state, through
//! its event methods; everything else reads it.

use crate::data::gas::GasPair;
use crate::data::projection::PressureParams;
use crate::error::{ExplorerError, Result};

/// How many rows are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Idle,
    Single(usize),
    Multi,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    pair: GasPair,
    pressure: PressureParams,
    /// Sorted, deduplicated row indices into the projected table.
    selected: Vec<usize>,
}

/// Check a working-capacity range.
pub fn validate_range(p1: usize, p2: usize) -> Result<()> {
    if p1 > p2 {
        return Err(ExplorerError::InvalidRange { p1, p2 });
    }
    Ok(())
}

/// Sort and deduplicate `indices`, rejecting any that fall outside `rows`.
pub fn normalize_selection(indices: &[usize], rows: usize) -> Result<Vec<usize>> {
    if let Some(&index) = indices.iter().find(|&&i| i >= rows) {
        return Err(ExplorerError::SelectionOutOfRange { index, rows });
    }
    let mut out = indices.to_vec();
    out.sort_unstable();
    out.dedup();
    Ok(out)
}

impl SelectionState {
    pub fn new(pair: GasPair, pressure: PressureParams) -> Result<Self> {
        validate_range(pressure.p1, pressure.p2)?;
        Ok(Self {
            pair,
            pressure,
            selected: Vec::new(),
        })
    }

    pub fn pair(&self) -> GasPair {
        self.pair
    }

    pub fn pressure(&self) -> PressureParams {
        self.pressure
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn mode(&self) -> SelectionMode {
        match self.selected.as_slice() {
            [] => SelectionMode::Idle,
            [row] => SelectionMode::Single(*row),
            _ => SelectionMode::Multi,
        }
    }

    /// New gas pair; row indices no longer mean anything, so the selection is dropped.
    pub(crate) fn set_pair(&mut self, pair: GasPair) {
        self.pair = pair;
        self.selected.clear();
    }

    pub(crate) fn set_lp(&mut self, lp: usize) {
        self.pressure.lp = lp;
    }

    pub(crate) fn set_wc_range(&mut self, p1: usize, p2: usize) -> Result<()> {
        validate_range(p1, p2)?;
        self.pressure.p1 = p1;
        self.pressure.p2 = p2;
        Ok(())
    }

    /// Replace the selection with already-normalised indices.
    pub(crate) fn set_selected(&mut self, selected: Vec<usize>) {
        self.selected = selected;
    }
}
