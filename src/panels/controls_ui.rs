use egui::Ui;

use crate::config::ExplorerConfig;
use crate::data::gas::Gas;
use crate::data::sampler::{bar_to_index, PRESSURE_STEP_BAR};

/// A parameter change requested through the controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    GasPair(Gas, Gas),
    Pressure(usize),
    WorkingCapacity(usize, usize),
}

/// Gas pickers and pressure sliders. Slider values are in bar; actions carry grid indices.
pub struct ControlsPanel {
    gas1: Gas,
    gas2: Gas,
    pressure_bar: f64,
    wc_bar: (f64, f64),
    max_bar: f64,
}

impl ControlsPanel {
    pub fn new(cfg: &ExplorerConfig) -> Self {
        Self {
            gas1: cfg.gas1,
            gas2: cfg.gas2,
            pressure_bar: cfg.pressure_bar,
            wc_bar: cfg.wc_range_bar,
            max_bar: cfg.max_pressure_bar,
        }
    }

    /// Put the pickers back to an accepted pair after a rejected change.
    pub fn set_gases(&mut self, gas1: Gas, gas2: Gas) {
        self.gas1 = gas1;
        self.gas2 = gas2;
    }

    fn gas_combo(ui: &mut Ui, label: &str, value: &mut Gas) -> bool {
        let before = *value;
        egui::ComboBox::from_label(label)
            .selected_text(value.name())
            .show_ui(ui, |ui| {
                for g in Gas::ALL {
                    ui.selectable_value(value, g, g.name());
                }
            });
        *value != before
    }

    fn pressure_slider(ui: &mut Ui, value: &mut f64, max: f64, text: &str) -> bool {
        ui.add(
            egui::Slider::new(value, PRESSURE_STEP_BAR..=max)
                .step_by(PRESSURE_STEP_BAR)
                .suffix(" bar")
                .text(text),
        )
        .changed()
    }

    pub fn render(&mut self, ui: &mut Ui) -> Vec<ControlAction> {
        let mut actions = Vec::new();
        ui.horizontal(|ui| {
            let g1 = Self::gas_combo(ui, "Gas 1", &mut self.gas1);
            let g2 = Self::gas_combo(ui, "Gas 2", &mut self.gas2);
            if g1 || g2 {
                actions.push(ControlAction::GasPair(self.gas1, self.gas2));
            }

            ui.separator();

            if Self::pressure_slider(ui, &mut self.pressure_bar, self.max_bar, "Pressure") {
                actions.push(ControlAction::Pressure(bar_to_index(self.pressure_bar)));
            }

            ui.separator();

            ui.label("Working capacity:");
            let lo = Self::pressure_slider(ui, &mut self.wc_bar.0, self.max_bar, "from");
            let hi = Self::pressure_slider(ui, &mut self.wc_bar.1, self.max_bar, "to");
            if lo && self.wc_bar.0 > self.wc_bar.1 {
                self.wc_bar.1 = self.wc_bar.0;
            }
            if hi && self.wc_bar.1 < self.wc_bar.0 {
                self.wc_bar.0 = self.wc_bar.1;
            }
            if lo || hi {
                actions.push(ControlAction::WorkingCapacity(
                    bar_to_index(self.wc_bar.0),
                    bar_to_index(self.wc_bar.1),
                ));
            }
        });
        actions
    }
}
