use egui::Ui;

use crate::controller::Explorer;
use crate::data::detail::{DetailPayload, GasDetail};
use crate::data::gas::GasSlot;

fn value_with_error(v: Option<f64>, err: Option<f64>) -> String {
    match (v, err) {
        (Some(v), Some(e)) => format!("{v:.4} ± {e:.4}"),
        (Some(v), None) => format!("{v:.4}"),
        (None, _) => "n/a".to_string(),
    }
}

fn gas_grid(ui: &mut Ui, g: &GasDetail) {
    egui::Grid::new(("detail_gas", g.gas.name()))
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            ui.label("Isotherms");
            ui.label(g.isotherm_count.to_string());
            ui.end_row();
            ui.label("Uptake");
            ui.label(value_with_error(g.loading, g.loading_error));
            ui.end_row();
            ui.label("Henry");
            ui.label(value_with_error(g.henry, g.henry_error));
            ui.end_row();
        });
}

/// Text summary of the selected material and links to its fetched isotherms.
pub fn render_detail(ui: &mut Ui, explorer: &Explorer) {
    let DetailPayload::Material(detail) = explorer.detail() else {
        ui.weak("Select a single material to see its details.");
        return;
    };

    ui.heading(&detail.material);
    for g in &detail.gases {
        ui.strong(g.gas.name());
        gas_grid(ui, g);
    }

    let sources: Vec<_> = GasSlot::BOTH
        .iter()
        .flat_map(|&slot| explorer.isotherms(slot).curves())
        .filter_map(|c| c.source_url.as_ref().map(|url| (c.label.as_str(), url.as_str())))
        .collect();
    if !sources.is_empty() {
        ui.separator();
        ui.strong("Sources");
        for (label, url) in sources {
            ui.hyperlink_to(label, url);
        }
    }
    if explorer.isotherms_loading() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading isotherms…");
        });
    }
}
