//! Colours: the UI theme, the significance colormap for scatter markers and
//! the palette for isotherm curves.

use egui::{Color32, Context, Visuals};
use serde::{Deserialize, Serialize};

/// Spectral palette (10 steps, purple → red) shared by the significance
/// colormap and the fetched isotherm curves.
pub const SPECTRAL10: [Color32; 10] = [
    Color32::from_rgb(0x5e, 0x4f, 0xa2),
    Color32::from_rgb(0x32, 0x88, 0xbd),
    Color32::from_rgb(0x66, 0xc2, 0xa5),
    Color32::from_rgb(0xab, 0xdd, 0xa4),
    Color32::from_rgb(0xe6, 0xf5, 0x98),
    Color32::from_rgb(0xfe, 0xe0, 0x8b),
    Color32::from_rgb(0xfd, 0xae, 0x61),
    Color32::from_rgb(0xf4, 0x6d, 0x43),
    Color32::from_rgb(0xd5, 0x3e, 0x4f),
    Color32::from_rgb(0x9e, 0x01, 0x42),
];

/// Colour of the median isotherm curve and of error crosses.
pub const MEDIAN_CURVE_COLOR: Color32 = Color32::BLACK;

/// Markers whose significance is missing or below the colormap range.
pub const LOW_COLOR: Color32 = Color32::GRAY;
/// Markers above the colormap range.
pub const HIGH_COLOR: Color32 = Color32::RED;

/// Linear colormap over `[low, high]` on the spectral palette.
pub fn significance_color(n: Option<f64>, low: f64, high: f64) -> Color32 {
    let Some(n) = n.filter(|n| n.is_finite()) else {
        return LOW_COLOR;
    };
    if n < low {
        return LOW_COLOR;
    }
    if n > high {
        return HIGH_COLOR;
    }
    let span = (high - low).max(f64::EPSILON);
    let bin = ((n - low) / span * SPECTRAL10.len() as f64) as usize;
    SPECTRAL10[bin.min(SPECTRAL10.len() - 1)]
}

/// Visual theme of the explorer window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    Dark,
    /// Light background; the median curve and error crosses are black.
    #[default]
    Light,
    SolarizedLight,
}

impl ColorScheme {
    pub fn all() -> &'static [ColorScheme] {
        &[ColorScheme::Dark, ColorScheme::Light, ColorScheme::SolarizedLight]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColorScheme::Dark => "Dark",
            ColorScheme::Light => "Light",
            ColorScheme::SolarizedLight => "Solarized Light",
        }
    }

    pub fn apply(&self, ctx: &Context) {
        match self {
            ColorScheme::Dark => ctx.set_visuals(Visuals::dark()),
            ColorScheme::Light => ctx.set_visuals(Visuals::light()),
            ColorScheme::SolarizedLight => {
                let mut v = Visuals::light();
                let base3 = Color32::from_rgb(253, 246, 227);
                let base2 = Color32::from_rgb(238, 232, 213);
                let base00 = Color32::from_rgb(101, 123, 131);
                v.panel_fill = base3;
                v.window_fill = base2;
                v.extreme_bg_color = base3;
                v.faint_bg_color = base2;
                v.override_text_color = Some(base00);
                v.widgets.noninteractive.bg_fill = base2;
                v.widgets.noninteractive.fg_stroke.color = base00;
                v.widgets.inactive.bg_fill = base2;
                v.widgets.inactive.fg_stroke.color = base00;
                ctx.set_visuals(v);
            }
        }
    }

    /// Colour for error crosses that stays visible on this theme.
    pub fn error_color(&self) -> Color32 {
        match self {
            ColorScheme::Dark => Color32::WHITE,
            ColorScheme::Light | ColorScheme::SolarizedLight => Color32::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colormap_edges() {
        assert_eq!(significance_color(None, 3.0, 90.0), LOW_COLOR);
        assert_eq!(significance_color(Some(2.0), 3.0, 90.0), LOW_COLOR);
        assert_eq!(significance_color(Some(91.0), 3.0, 90.0), HIGH_COLOR);
        assert_eq!(significance_color(Some(3.0), 3.0, 90.0), SPECTRAL10[0]);
        assert_eq!(significance_color(Some(90.0), 3.0, 90.0), SPECTRAL10[9]);
    }
}
