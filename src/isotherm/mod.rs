//! Isotherm curves shown for the selected material.
//!
//! Curves come from two places: a synthetic "median" curve built from the
//! material's own loading sequence, and raw isotherms resolved through an
//! [`IsothermFetch`] implementation on worker threads (see [`loader`]).

pub mod fetch;
pub mod loader;

use egui::Color32;

use crate::color_scheme::{MEDIAN_CURVE_COLOR, SPECTRAL10};
use crate::data::dataset::GasRecord;
use crate::data::sampler::index_to_bar;

pub use fetch::DirectoryFetcher;
pub use loader::{IsothermLoader, LoaderEvent};

/// Lower bound of the isotherm plot axes before any curve arrives.
pub const AXIS_FLOOR: f64 = 1.0;

/// A parsed isotherm as returned by a fetch collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedIsotherm {
    pub label: String,
    /// Uptake in mmol/g, parallel to `pressure`.
    pub loading: Vec<f64>,
    /// Pressure in bar.
    pub pressure: Vec<f64>,
    pub source_url: Option<String>,
    /// Temperature in K.
    pub temperature: Option<f64>,
}

/// Resolves an isotherm reference into a curve. May be slow; it is only
/// ever called from worker threads. `None` means the reference has no
/// usable curve and is dropped silently.
pub trait IsothermFetch: Send + Sync {
    fn fetch(&self, reference: &str) -> Option<FetchedIsotherm>;
}

impl<F> IsothermFetch for F
where
    F: Fn(&str) -> Option<FetchedIsotherm> + Send + Sync,
{
    fn fetch(&self, reference: &str) -> Option<FetchedIsotherm> {
        self(reference)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IsothermCurve {
    pub label: String,
    pub pressure: Vec<f64>,
    pub loading: Vec<f64>,
    /// Reference the curve was resolved from; `None` for the median curve.
    pub reference: Option<String>,
    pub source_url: Option<String>,
    pub temperature: Option<f64>,
    pub color: Color32,
}

impl IsothermCurve {
    /// The always-present baseline: the material's median loading on the pressure grid.
    /// Grid points without a value are skipped.
    pub fn median(record: &GasRecord) -> Self {
        let (pressure, loading): (Vec<f64>, Vec<f64>) = record
            .loading
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (index_to_bar(i), v)))
            .unzip();
        Self {
            label: "median".to_string(),
            pressure,
            loading,
            reference: None,
            source_url: None,
            temperature: None,
            color: MEDIAN_CURVE_COLOR,
        }
    }

    pub fn from_fetched(reference: String, fetched: FetchedIsotherm, color: Color32) -> Self {
        Self {
            label: fetched.label,
            pressure: fetched.pressure,
            loading: fetched.loading,
            reference: Some(reference),
            source_url: fetched.source_url,
            temperature: fetched.temperature,
            color,
        }
    }

    pub fn points(&self) -> Vec<[f64; 2]> {
        self.pressure
            .iter()
            .zip(&self.loading)
            .map(|(p, l)| [*p, *l])
            .collect()
    }
}

fn finite_max(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
}

/// Curves for one gas slot plus the axis upper bounds covering them.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSet {
    curves: Vec<IsothermCurve>,
    x_max: f64,
    y_max: f64,
}

impl Default for CurveSet {
    fn default() -> Self {
        Self {
            curves: Vec::new(),
            x_max: AXIS_FLOOR,
            y_max: AXIS_FLOOR,
        }
    }
}

impl CurveSet {
    /// Drop all curves and reset the axis bounds to the floor.
    pub fn reset(&mut self) {
        self.curves.clear();
        self.x_max = AXIS_FLOOR;
        self.y_max = AXIS_FLOOR;
    }

    /// Insert the median curve. It always stays the first entry and does not move the bounds.
    pub fn set_median(&mut self, curve: IsothermCurve) {
        self.curves.insert(0, curve);
    }

    /// Append a resolved curve and grow the bounds to cover it.
    pub fn push_fetched(&mut self, curve: IsothermCurve) {
        if let Some(x) = finite_max(&curve.pressure) {
            self.x_max = self.x_max.max(x);
        }
        if let Some(y) = finite_max(&curve.loading) {
            self.y_max = self.y_max.max(y);
        }
        self.curves.push(curve);
    }

    /// Colour for the next fetched curve (palette cycles in arrival order).
    pub fn next_color(&self) -> Color32 {
        let fetched = self.curves.iter().filter(|c| c.reference.is_some()).count();
        SPECTRAL10[fetched % SPECTRAL10.len()]
    }

    pub fn curves(&self) -> &[IsothermCurve] {
        &self.curves
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetched(max_p: f64, max_l: f64) -> FetchedIsotherm {
        FetchedIsotherm {
            label: "x".into(),
            loading: vec![0.0, max_l],
            pressure: vec![0.1, max_p],
            source_url: None,
            temperature: Some(298.0),
        }
    }

    #[test]
    fn median_skips_holes() {
        let rec = GasRecord {
            loading: vec![Some(1.0), None, Some(3.0)],
            ..Default::default()
        };
        let c = IsothermCurve::median(&rec);
        assert_eq!(c.pressure, vec![0.5, 1.5]);
        assert_eq!(c.loading, vec![1.0, 3.0]);
        assert_eq!(c.reference, None);
    }

    #[test]
    fn bounds_grow_but_never_below_floor() {
        let mut set = CurveSet::default();
        set.push_fetched(IsothermCurve::from_fetched("a".into(), fetched(0.5, 0.2), Color32::RED));
        assert_eq!((set.x_max(), set.y_max()), (AXIS_FLOOR, AXIS_FLOOR));
        set.push_fetched(IsothermCurve::from_fetched("b".into(), fetched(10.0, 4.0), Color32::RED));
        assert_eq!((set.x_max(), set.y_max()), (10.0, 4.0));
        set.reset();
        assert!(set.is_empty());
        assert_eq!(set.x_max(), AXIS_FLOOR);
    }

    #[test]
    fn median_stays_first() {
        let mut set = CurveSet::default();
        set.push_fetched(IsothermCurve::from_fetched("a".into(), fetched(2.0, 2.0), Color32::RED));
        set.set_median(IsothermCurve::median(&GasRecord::default()));
        assert_eq!(set.curves()[0].label, "median");
        assert_eq!(set.next_color(), SPECTRAL10[1]);
    }
}
