//! Configuration for the explorer window and its starting parameters.
//!
//! Stored as YAML. Every field has a default, so a partial file (or none at
//! all) is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color_scheme::ColorScheme;
use crate::data::gas::{Gas, GasPair};
use crate::data::projection::PressureParams;
use crate::data::sampler::bar_to_index;
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Native window title.
    pub title: String,
    /// Dataset JSON file.
    pub dataset: Option<PathBuf>,
    /// Directory holding one JSON file per isotherm reference.
    pub isotherm_dir: Option<PathBuf>,
    pub gas1: Gas,
    pub gas2: Gas,
    /// Initial pressure of the uptake plot, in bar.
    pub pressure_bar: f64,
    /// Initial working-capacity range, in bar.
    pub wc_range_bar: (f64, f64),
    /// Upper end of the pressure sliders, in bar.
    pub max_pressure_bar: f64,
    /// Significance at which the marker colormap starts.
    pub color_low: f64,
    /// Significance at which the marker colormap saturates.
    pub color_high: f64,
    pub color_scheme: ColorScheme,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            title: "Separation explorer".to_string(),
            dataset: None,
            isotherm_dir: None,
            gas1: Gas::CarbonDioxide,
            gas2: Gas::Nitrogen,
            pressure_bar: 0.5,
            wc_range_bar: (0.5, 5.0),
            max_pressure_bar: 20.0,
            color_low: 3.0,
            color_high: 90.0,
            color_scheme: ColorScheme::default(),
        }
    }
}

impl ExplorerConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&s)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let s = serde_yaml::to_string(self)?;
        std::fs::write(path, s)?;
        Ok(())
    }

    /// The configured gas pair; fails if both gases are the same.
    pub fn gas_pair(&self) -> Result<GasPair> {
        GasPair::new(self.gas1, self.gas2)
    }

    /// Starting pressure indices derived from the bar values.
    pub fn pressure_params(&self) -> PressureParams {
        PressureParams {
            lp: bar_to_index(self.pressure_bar),
            p1: bar_to_index(self.wc_range_bar.0),
            p2: bar_to_index(self.wc_range_bar.1),
        }
    }

    /// Highest selectable pressure index.
    pub fn max_pressure_index(&self) -> usize {
        bar_to_index(self.max_pressure_bar)
    }
}
