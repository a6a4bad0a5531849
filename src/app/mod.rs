//! The native explorer window.

mod run;

pub use run::run_explorer;

use std::time::Duration;

use eframe::egui;
use tracing::warn;

use crate::color_scheme::ColorScheme;
use crate::config::ExplorerConfig;
use crate::controller::Explorer;
use crate::data::gas::GasSlot;
use crate::data::projection::MetricFamily;
use crate::panels::{
    apply_click, render_detail, ControlAction, ControlsPanel, IsothermPanel, RankingPanel,
    ScatterPanel,
};

pub struct ExplorerApp {
    explorer: Explorer,
    controls: ControlsPanel,
    scatters: Vec<ScatterPanel>,
    isotherm_plots: [IsothermPanel; 2],
    ranking: RankingPanel,
    color_scheme: ColorScheme,
    scheme_applied: bool,
    last_error: Option<String>,
}

impl ExplorerApp {
    pub fn new(explorer: Explorer, cfg: &ExplorerConfig) -> Self {
        let error_color = cfg.color_scheme.error_color();
        let scatters = MetricFamily::ALL
            .iter()
            .map(|&family| ScatterPanel {
                error_color,
                ..ScatterPanel::new(family, cfg.color_low, cfg.color_high)
            })
            .collect();
        Self {
            explorer,
            controls: ControlsPanel::new(cfg),
            scatters,
            isotherm_plots: [
                IsothermPanel::new(GasSlot::First),
                IsothermPanel::new(GasSlot::Second),
            ],
            ranking: RankingPanel::default(),
            color_scheme: cfg.color_scheme,
            scheme_applied: false,
            last_error: None,
        }
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    fn report<T>(&mut self, result: crate::Result<T>) {
        match result {
            Ok(_) => self.last_error = None,
            Err(e) => {
                warn!(error = %e, "input rejected");
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn apply_control(&mut self, action: ControlAction) {
        match action {
            ControlAction::GasPair(g1, g2) => {
                let result = self.explorer.set_gas_pair(g1, g2);
                if result.is_err() {
                    let pair = self.explorer.state().pair();
                    self.controls.set_gases(pair.first(), pair.second());
                }
                self.report(result);
            }
            ControlAction::Pressure(lp) => {
                self.explorer.set_pressure(lp);
                self.last_error = None;
            }
            ControlAction::WorkingCapacity(p1, p2) => {
                let result = self.explorer.set_wc_range(p1, p2);
                self.report(result);
            }
        }
    }

    fn select(&mut self, rows: Vec<usize>) {
        let result = self.explorer.set_selection(&rows);
        self.report(result);
    }

    fn top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            let actions = ui
                .horizontal(|ui| {
                    let actions = self.controls.render(ui);
                    ui.separator();
                    self.theme_picker(ui);
                    actions
                })
                .inner;
            for action in actions {
                self.apply_control(action);
            }
            if let Some(err) = &self.last_error {
                ui.colored_label(egui::Color32::RED, err);
            }
        });
    }

    fn theme_picker(&mut self, ui: &mut egui::Ui) {
        let mut scheme = self.color_scheme;
        egui::ComboBox::from_id_salt("color_scheme")
            .selected_text(scheme.label())
            .show_ui(ui, |ui| {
                for s in ColorScheme::all() {
                    ui.selectable_value(&mut scheme, *s, s.label());
                }
            });
        if scheme != self.color_scheme {
            self.color_scheme = scheme;
            self.scheme_applied = false;
            for panel in &mut self.scatters {
                panel.error_color = scheme.error_color();
            }
        }
    }

    fn side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("detail_and_ranking")
            .resizable(true)
            .default_width(420.0)
            .show(ctx, |ui| {
                render_detail(ui, &self.explorer);
                ui.separator();
                if let Some(row) = self.ranking.render(ui, &self.explorer) {
                    self.select(vec![row]);
                }
            });
    }

    fn central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let h = ui.available_height();
            let mut click = None;
            ui.columns(self.scatters.len(), |cols| {
                for (ui, panel) in cols.iter_mut().zip(&self.scatters) {
                    ui.strong(panel.family.title());
                    ui.allocate_ui(egui::vec2(ui.available_width(), h * 0.5), |ui| {
                        if let Some(c) = panel.render(ui, &self.explorer) {
                            click = Some(c);
                        }
                    });
                }
            });
            if let Some(c) = click {
                let rows = apply_click(self.explorer.state().selected(), c);
                self.select(rows);
            }
            ui.separator();
            ui.columns(2, |cols| {
                for (ui, panel) in cols.iter_mut().zip(&self.isotherm_plots) {
                    panel.render(ui, &self.explorer);
                }
            });
        });
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.scheme_applied {
            self.color_scheme.apply(ctx);
            self.scheme_applied = true;
        }

        self.explorer.poll_isotherms();
        if self.explorer.isotherms_loading() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        self.top_panel(ctx);
        self.side_panel(ctx);
        self.central_panel(ctx);
    }
}
