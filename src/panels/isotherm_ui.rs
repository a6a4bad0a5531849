use egui::Ui;
use egui_plot::{Legend, Line, Plot};

use crate::controller::Explorer;
use crate::data::gas::GasSlot;

/// Isotherm plot for one gas of the selected material: the dataset's median
/// curve plus every curve fetched for it.
pub struct IsothermPanel {
    pub slot: GasSlot,
}

impl IsothermPanel {
    pub fn new(slot: GasSlot) -> Self {
        Self { slot }
    }

    pub fn render(&self, ui: &mut Ui, explorer: &Explorer) {
        let gas = explorer.state().pair().get(self.slot);
        let set = explorer.isotherms(self.slot);
        let (x_max, y_max) = (set.x_max(), set.y_max());

        ui.label(format!("{gas} isotherms"));
        Plot::new(("isotherms", self.slot.index()))
            .legend(Legend::default())
            .x_axis_label("Pressure (bar)")
            .y_axis_label("Uptake (mmol/g)")
            .include_x(0.0)
            .include_x(x_max)
            .include_y(0.0)
            .include_y(y_max)
            .show(ui, |plot_ui| {
                for curve in set.curves() {
                    plot_ui.line(
                        Line::new(curve.label.clone(), curve.points())
                            .color(curve.color)
                            .width(1.5),
                    );
                }
            });
    }
}
