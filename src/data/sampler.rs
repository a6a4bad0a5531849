//! Bounds-safe access into pressure-indexed curves.
//!
//! Curves are recorded on a fixed grid (index 0 = 0.5 bar, step 0.5 bar) and
//! may be shorter than the grid or contain holes. Any access that cannot be
//! answered yields `None`, never a panic.

/// Spacing of the pressure grid in bar.
pub const PRESSURE_STEP_BAR: f64 = 0.5;

/// Value of `curve` at `index`, or `None` if the curve is too short or has a hole there.
#[inline]
pub fn sample(curve: &[Option<f64>], index: usize) -> Option<f64> {
    curve.get(index).copied().flatten()
}

/// Values at two indices, or `None` if either one is missing.
#[inline]
pub fn window(curve: &[Option<f64>], i: usize, j: usize) -> Option<(f64, f64)> {
    Some((sample(curve, i)?, sample(curve, j)?))
}

/// Pressure in bar of a grid index.
#[inline]
pub fn index_to_bar(index: usize) -> f64 {
    (index as f64 + 1.0) * PRESSURE_STEP_BAR
}

/// Grid index nearest to a pressure in bar. Pressures below the first step map to 0.
pub fn bar_to_index(bar: f64) -> usize {
    let steps = (bar / PRESSURE_STEP_BAR).round();
    if steps < 1.0 || !steps.is_finite() {
        0
    } else {
        steps as usize - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_curve_is_missing() {
        assert_eq!(sample(&[], 0), None);
        assert_eq!(window(&[], 0, 1), None);
    }

    #[test]
    fn out_of_range_is_missing() {
        let c = [Some(1.0), Some(2.0)];
        assert_eq!(sample(&c, 1), Some(2.0));
        assert_eq!(sample(&c, 2), None);
        assert_eq!(sample(&c, usize::MAX), None);
        assert_eq!(window(&c, 0, 1), Some((1.0, 2.0)));
        assert_eq!(window(&c, 0, 5), None);
        assert_eq!(window(&c, 5, 0), None);
    }

    #[test]
    fn holes_are_missing() {
        let c = [Some(1.0), None, Some(3.0)];
        assert_eq!(sample(&c, 1), None);
        assert_eq!(window(&c, 0, 1), None);
        assert_eq!(window(&c, 0, 2), Some((1.0, 3.0)));
    }

    #[test]
    fn bar_index_mapping() {
        assert_eq!(bar_to_index(0.5), 0);
        assert_eq!(bar_to_index(5.0), 9);
        assert_eq!(bar_to_index(20.0), 39);
        assert_eq!(bar_to_index(0.0), 0);
        assert_eq!(index_to_bar(9), 5.0);
    }
}
