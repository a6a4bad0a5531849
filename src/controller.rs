//! The explorer engine: owns the selection state and every derived output,
//! and recomputes them in response to parameter and selection events.
//!
//! All mutation happens on the thread that owns the [`Explorer`]. Isotherm
//! workers only hand curves back through the loader's channel, which is
//! drained by [`Explorer::poll_isotherms`] (once per UI frame) or
//! [`Explorer::wait_isotherms`] (headless use and tests).

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::data::dataset::Dataset;
use crate::data::detail::{material_detail, DetailPayload};
use crate::data::error_bars::ErrorSegmentSet;
use crate::data::gas::{Gas, GasPair, GasSlot};
use crate::data::projection::{MetricFamily, PressureParams, ProjectedTable};
use crate::data::ranking::{ranked_by, RankingColumn, RankingRow};
use crate::error::Result;
use crate::isotherm::{CurveSet, IsothermCurve, IsothermFetch, IsothermLoader, LoaderEvent};
use crate::state::{normalize_selection, SelectionMode, SelectionState};

/// Notification that a published output changed. Renderers re-read the
/// corresponding getter on receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorerUpdate {
    /// New gas pair: rows and all columns changed.
    TableRebuilt,
    /// One metric family (and its ranking score) was patched in place.
    ColumnsPatched(MetricFamily),
    ErrorsRebuilt,
    ErrorsPatched(MetricFamily),
    ErrorsCleared,
    IsothermsCleared,
    IsothermAppended(GasSlot),
    DetailChanged,
}

pub struct Explorer {
    dataset: Arc<Dataset>,
    state: SelectionState,
    table: ProjectedTable,
    errors: ErrorSegmentSet,
    isotherms: [CurveSet; 2],
    detail: DetailPayload,
    loader: IsothermLoader,
    listeners: Vec<Sender<ExplorerUpdate>>,
}

impl Explorer {
    pub fn new(
        dataset: Arc<Dataset>,
        fetcher: Arc<dyn IsothermFetch>,
        pair: GasPair,
        pressure: PressureParams,
    ) -> Result<Self> {
        let state = SelectionState::new(pair, pressure)?;
        let table = ProjectedTable::build(&dataset, pair, pressure);
        info!(
            gas1 = %pair.first(),
            gas2 = %pair.second(),
            rows = table.len(),
            "explorer ready"
        );
        Ok(Self {
            dataset,
            state,
            table,
            errors: ErrorSegmentSet::default(),
            isotherms: Default::default(),
            detail: DetailPayload::Empty,
            loader: IsothermLoader::new(fetcher),
            listeners: Vec::new(),
        })
    }

    /// Receive an [`ExplorerUpdate`] for every published change.
    pub fn subscribe(&mut self) -> Receiver<ExplorerUpdate> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.listeners.push(tx);
        rx
    }

    /// Number of live subscribers. Dropped receivers are pruned on the next publish.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn publish(&mut self, update: ExplorerUpdate) {
        self.listeners.retain(|tx| tx.send(update).is_ok());
    }

    // ── Events ──────────────────────────────────────────────────────────────

    /// Switch the gas pair. Clears the selection and rebuilds the table.
    pub fn set_gas_pair(&mut self, gas1: Gas, gas2: Gas) -> Result<()> {
        let pair = GasPair::new(gas1, gas2)?;
        self.state.set_pair(pair);
        self.clear_selection_outputs();
        self.table = ProjectedTable::build(&self.dataset, pair, self.state.pressure());
        info!(%gas1, %gas2, rows = self.table.len(), "gas pair changed");
        self.publish(ExplorerUpdate::TableRebuilt);
        self.refresh_detail();
        Ok(())
    }

    /// Move the loading pressure index.
    pub fn set_pressure(&mut self, lp: usize) {
        self.state.set_lp(lp);
        self.table.update_loading(&self.dataset, lp);
        debug!(lp, "loading pressure changed");
        self.publish(ExplorerUpdate::ColumnsPatched(MetricFamily::Loading));
        self.patch_errors(MetricFamily::Loading);
    }

    /// Move the working-capacity range. Rejects `p1 > p2` without touching state.
    pub fn set_wc_range(&mut self, p1: usize, p2: usize) -> Result<()> {
        self.state.set_wc_range(p1, p2)?;
        self.table.update_working_capacity(&self.dataset, p1, p2);
        debug!(p1, p2, "working capacity range changed");
        self.publish(ExplorerUpdate::ColumnsPatched(MetricFamily::WorkingCapacity));
        self.patch_errors(MetricFamily::WorkingCapacity);
        Ok(())
    }

    /// Replace the selected rows.
    ///
    /// Empty clears errors and isotherms; a single row rebuilds its errors
    /// and starts loading its isotherms; several rows rebuild errors for all
    /// of them without loading isotherms.
    pub fn set_selection(&mut self, indices: &[usize]) -> Result<()> {
        let selected = normalize_selection(indices, self.table.len())?;
        self.state.set_selected(selected);
        self.reset_isotherms();

        match self.state.mode() {
            SelectionMode::Idle => {
                self.errors.clear();
                self.publish(ExplorerUpdate::ErrorsCleared);
            }
            SelectionMode::Single(row) => {
                self.rebuild_errors();
                self.start_isotherms(row);
            }
            SelectionMode::Multi => {
                self.rebuild_errors();
            }
        }
        debug!(selected = ?self.state.selected(), "selection changed");
        self.refresh_detail();
        Ok(())
    }

    /// Apply every isotherm that has arrived so far. Returns how many were appended.
    pub fn poll_isotherms(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.loader.try_next() {
            self.apply_isotherm(event);
            applied += 1;
        }
        applied
    }

    /// Block until the current isotherm workers finish (or `timeout` passes
    /// without a new curve). Returns how many curves were appended.
    pub fn wait_isotherms(&mut self, timeout: Duration) -> usize {
        let mut applied = 0;
        while let Some(event) = self.loader.next_timeout(timeout) {
            self.apply_isotherm(event);
            applied += 1;
        }
        applied
    }

    pub fn isotherms_loading(&self) -> bool {
        self.loader.is_loading()
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn clear_selection_outputs(&mut self) {
        self.reset_isotherms();
        self.errors.clear();
        self.publish(ExplorerUpdate::ErrorsCleared);
    }

    fn reset_isotherms(&mut self) {
        self.loader.cancel();
        for set in &mut self.isotherms {
            set.reset();
        }
        self.publish(ExplorerUpdate::IsothermsCleared);
    }

    fn rebuild_errors(&mut self) {
        self.errors = ErrorSegmentSet::build(&self.table, &self.dataset, self.state.selected());
        self.publish(ExplorerUpdate::ErrorsRebuilt);
    }

    fn patch_errors(&mut self, family: MetricFamily) {
        if self.state.selected().is_empty() {
            return;
        }
        self.errors.update_family(&self.table, &self.dataset, family);
        self.publish(ExplorerUpdate::ErrorsPatched(family));
        self.refresh_detail();
    }

    fn refresh_detail(&mut self) {
        self.detail = match self.state.mode() {
            SelectionMode::Single(row) => {
                material_detail(&self.table, &self.dataset, &self.errors, row)
                    .map_or(DetailPayload::Empty, DetailPayload::Material)
            }
            SelectionMode::Idle | SelectionMode::Multi => DetailPayload::Empty,
        };
        self.publish(ExplorerUpdate::DetailChanged);
    }

    fn start_isotherms(&mut self, row: usize) {
        let dataset = Arc::clone(&self.dataset);
        let Some(material) = self.table.material_index(row).and_then(|i| dataset.material(i))
        else {
            return;
        };
        for slot in GasSlot::BOTH {
            let Some(record) = material.gas(self.state.pair().get(slot)) else {
                continue;
            };
            self.isotherms[slot.index()].set_median(IsothermCurve::median(record));
            self.publish(ExplorerUpdate::IsothermAppended(slot));
            self.loader.start(slot, record.isotherms.clone());
        }
        debug!(material = %material.id, generation = self.loader.generation(), "isotherm load started");
    }

    fn apply_isotherm(&mut self, event: LoaderEvent) {
        let set = &mut self.isotherms[event.slot.index()];
        let color = set.next_color();
        set.push_fetched(IsothermCurve::from_fetched(event.reference, event.isotherm, color));
        self.publish(ExplorerUpdate::IsothermAppended(event.slot));
    }

    // ── Published data ──────────────────────────────────────────────────────

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn table(&self) -> &ProjectedTable {
        &self.table
    }

    pub fn errors(&self) -> &ErrorSegmentSet {
        &self.errors
    }

    pub fn isotherms(&self, slot: GasSlot) -> &CurveSet {
        &self.isotherms[slot.index()]
    }

    pub fn detail(&self) -> &DetailPayload {
        &self.detail
    }

    pub fn ranking(&self, column: RankingColumn) -> Vec<RankingRow<'_>> {
        ranked_by(&self.table, column)
    }
}
