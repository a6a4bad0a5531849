use egui::Ui;
use egui_table::{HeaderRow, Table, TableDelegate};
use tracing::{error, info};

use crate::controller::Explorer;
use crate::data::export::save_ranking_csv;
use crate::data::ranking::{RankingColumn, RankingRow};

fn score(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.3}")).unwrap_or_else(|| "–".to_string())
}

struct RankingDelegate<'a> {
    rows: &'a [RankingRow<'a>],
    selected: &'a [usize],
    sort: &'a mut RankingColumn,
    clicked_row: &'a mut Option<usize>,
}

impl TableDelegate for RankingDelegate<'_> {
    fn header_cell_ui(&mut self, ui: &mut egui::Ui, cell: &egui_table::HeaderCellInfo) {
        let col = cell.col_range.start;
        ui.add_space(4.0);
        if col == 0 {
            ui.strong("Material");
            return;
        }
        if let Some(column) = RankingColumn::ALL.get(col - 1).copied() {
            let active = *self.sort == column;
            let text = if active {
                format!("{} ⏷", column.header())
            } else {
                column.header().to_string()
            };
            if ui.selectable_label(active, text).clicked() {
                *self.sort = column;
            }
        }
    }

    fn cell_ui(&mut self, ui: &mut egui::Ui, cell: &egui_table::CellInfo) {
        let Some(r) = self.rows.get(cell.row_nr as usize) else {
            return;
        };
        ui.add_space(4.0);
        match cell.col_nr {
            0 => {
                let is_selected = self.selected.contains(&r.row);
                if ui.selectable_label(is_selected, r.label).clicked() {
                    *self.clicked_row = Some(r.row);
                }
            }
            c => {
                if let Some(column) = RankingColumn::ALL.get(c - 1).copied() {
                    ui.label(score(r.value(column)));
                }
            }
        }
    }
}

/// Ranking table of the derived selectivity scores with CSV export.
#[derive(Default)]
pub struct RankingPanel {
    sort: RankingColumn,
    status: Option<String>,
}

impl RankingPanel {
    /// Returns the table row the user clicked, if any.
    pub fn render(&mut self, ui: &mut Ui, explorer: &Explorer) -> Option<usize> {
        ui.horizontal(|ui| {
            ui.strong(format!("Ranking ({} materials)", explorer.table().len()));
            if ui.button("📄 Export ranking…").clicked() {
                self.export(explorer);
            }
        });
        if let Some(status) = &self.status {
            ui.weak(status);
        }

        let rows = explorer.ranking(self.sort);
        let mut clicked_row = None;
        let mut sort = self.sort;
        let mut delegate = RankingDelegate {
            rows: &rows,
            selected: explorer.state().selected(),
            sort: &mut sort,
            clicked_row: &mut clicked_row,
        };
        let cols = vec![
            egui_table::Column::new(160.0),
            egui_table::Column::new(80.0),
            egui_table::Column::new(80.0),
            egui_table::Column::new(80.0),
        ];
        Table::new()
            .id_salt("ranking_table")
            .num_rows(rows.len() as u64)
            .columns(cols)
            .headers(vec![HeaderRow::new(24.0)])
            .show(ui, &mut delegate);
        self.sort = sort;
        clicked_row
    }

    fn export(&mut self, explorer: &Explorer) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name("ranking.csv")
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            return;
        };
        match save_ranking_csv(&path, explorer.table()) {
            Ok(()) => {
                info!(path = %path.display(), "ranking exported");
                self.status = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "ranking export failed");
                self.status = Some(format!("Export failed: {e}"));
            }
        }
    }
}
