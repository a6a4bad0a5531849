use egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, Points};

use crate::color_scheme::significance_color;
use crate::controller::Explorer;
use crate::data::projection::MetricFamily;

/// What a click on a scatter plot asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterClick {
    /// Plain click on a point.
    Select(usize),
    /// Shift-click on a point.
    Toggle(usize),
    /// Click on empty plot area.
    Clear,
}

/// Pick radius in screen pixels.
const PICK_RADIUS_PX: f32 = 8.0;

fn to_plot(v: f64, log: bool) -> f64 {
    if !log {
        v
    } else if v > 0.0 {
        v.log10()
    } else {
        f64::NAN
    }
}

fn axis_value(v: f64, log: bool) -> f64 {
    if log {
        10f64.powf(v)
    } else {
        v
    }
}

fn format_tick(v: f64) -> String {
    if v != 0.0 && (v.abs() >= 1e4 || v.abs() < 1e-2) {
        format!("{v:.1e}")
    } else {
        format!("{v:.3}")
    }
}

/// One scatter plot of a metric family: gas 1 on x, gas 2 on y, markers
/// colored by significance, error crosses for the selected rows.
pub struct ScatterPanel {
    pub family: MetricFamily,
    pub color_low: f64,
    pub color_high: f64,
    pub error_color: Color32,
}

impl ScatterPanel {
    pub fn new(family: MetricFamily, color_low: f64, color_high: f64) -> Self {
        Self {
            family,
            color_low,
            color_high,
            error_color: Color32::DARK_GRAY,
        }
    }

    fn log_axes(&self) -> bool {
        self.family == MetricFamily::Henry
    }

    /// Markers in plot coordinates, grouped by color.
    fn marker_groups(&self, explorer: &Explorer) -> Vec<(Color32, Vec<[f64; 2]>)> {
        let log = self.log_axes();
        let cols = explorer.table().columns(self.family);
        let mut groups: Vec<(Color32, Vec<[f64; 2]>)> = Vec::new();
        for row in 0..explorer.table().len() {
            let Some((x, y)) = cols.center(row) else {
                continue;
            };
            let p = [to_plot(x, log), to_plot(y, log)];
            if !p[0].is_finite() || !p[1].is_finite() {
                continue;
            }
            let color = significance_color(
                cols.n.get(row).copied().flatten(),
                self.color_low,
                self.color_high,
            );
            match groups.iter_mut().find(|(c, _)| *c == color) {
                Some((_, pts)) => pts.push(p),
                None => groups.push((color, vec![p])),
            }
        }
        groups
    }

    fn nearest_row(&self, explorer: &Explorer, transform: &egui_plot::PlotTransform, pos: egui::Pos2) -> Option<usize> {
        let log = self.log_axes();
        let cols = explorer.table().columns(self.family);
        let mut best: Option<(usize, f32)> = None;
        for row in 0..explorer.table().len() {
            let Some((x, y)) = cols.center(row) else {
                continue;
            };
            let p = egui_plot::PlotPoint::new(to_plot(x, log), to_plot(y, log));
            if !p.x.is_finite() || !p.y.is_finite() {
                continue;
            }
            let d = transform.position_from_point(&p).distance(pos);
            if d <= PICK_RADIUS_PX && best.is_none_or(|(_, bd)| d < bd) {
                best = Some((row, d));
            }
        }
        best.map(|(row, _)| row)
    }

    pub fn render(&self, ui: &mut Ui, explorer: &Explorer) -> Option<ScatterClick> {
        let log = self.log_axes();
        let pair = explorer.table().pair();
        let unit = match self.family {
            MetricFamily::Henry => "K_H",
            MetricFamily::Loading | MetricFamily::WorkingCapacity => "mmol/g",
        };
        let selected = explorer.state().selected();

        let plot = Plot::new(("scatter", self.family.key()))
            .legend(Legend::default())
            .x_axis_label(format!("{} ({unit})", pair.first()))
            .y_axis_label(format!("{} ({unit})", pair.second()))
            .allow_double_click_reset(true)
            .x_axis_formatter(move |x, _range| format_tick(axis_value(x.value, log)))
            .y_axis_formatter(move |y, _range| format_tick(axis_value(y.value, log)));

        let plot_resp = plot.show(ui, |plot_ui| {
            for (color, pts) in self.marker_groups(explorer) {
                plot_ui.points(Points::new("materials", pts).radius(3.0).color(color));
            }

            let cols = explorer.table().columns(self.family);
            for &row in selected {
                if let Some((x, y)) = cols.center(row) {
                    let p = [to_plot(x, log), to_plot(y, log)];
                    if p[0].is_finite() && p[1].is_finite() {
                        plot_ui.points(
                            Points::new("selected", vec![p])
                                .radius(6.0)
                                .filled(false)
                                .color(self.error_color),
                        );
                    }
                }
            }

            for row_errors in explorer.errors().rows() {
                let cross = row_errors.get(self.family);
                if cross.is_collapsed() {
                    continue;
                }
                for seg in [cross.horizontal, cross.vertical] {
                    let pts: Vec<[f64; 2]> = seg
                        .points()
                        .iter()
                        .map(|p| [to_plot(p[0], log), to_plot(p[1], log)])
                        .collect();
                    if pts.iter().all(|p| p[0].is_finite() && p[1].is_finite()) {
                        plot_ui.line(Line::new("error", pts).color(self.error_color).width(1.5));
                    }
                }
            }
        });

        if !plot_resp.response.clicked() {
            return None;
        }
        let pos = plot_resp.response.interact_pointer_pos()?;
        let shift = ui.input(|i| i.modifiers.shift);
        Some(match self.nearest_row(explorer, &plot_resp.transform, pos) {
            Some(row) if shift => ScatterClick::Toggle(row),
            Some(row) => ScatterClick::Select(row),
            None => ScatterClick::Clear,
        })
    }
}

/// Apply a click to the current selection.
pub fn apply_click(selected: &[usize], click: ScatterClick) -> Vec<usize> {
    match click {
        ScatterClick::Select(row) => vec![row],
        ScatterClick::Toggle(row) => {
            let mut next: Vec<usize> = selected.iter().copied().filter(|&r| r != row).collect();
            if next.len() == selected.len() {
                next.push(row);
            }
            next
        }
        ScatterClick::Clear => Vec::new(),
    }
}
