use log::debug;

use crate::utils::{map, map_array, map_pow};

// Exponent of the simple pipeline's gamma-style remap
pub const SIMPLE_EXPONENT: f32 = 0.7;

// Stretch raw synthesized noise so its observed extremes sit exactly on [low, high]
pub fn stretch_to_range(grid: &mut [f32], low: f32, high: f32) {
    map_array(grid, low, high);
}

// Final pass of the full pipeline.
//
// The min/max scan starts from the opposite bounds (min from `max_altitude`,
// max from `min_altitude`), so the target range
// [max(observed_min, min_altitude), min(observed_max, max_altitude)]
// always lies inside the bounds. The grid is never stretched past what it
// already spans. A flat grid has nothing to stretch and drops to `min_altitude`.
pub fn normalize_to_bounds(grid: &mut [f32], min_altitude: f32, max_altitude: f32) {
    let (lo, hi) = grid
        .iter()
        .fold((max_altitude, min_altitude), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    if hi <= lo {
        debug!("flat grid, filling with min altitude {min_altitude}");
        grid.fill(min_altitude);
        return;
    }

    let out_lo = lo.max(min_altitude);
    let out_hi = hi.min(max_altitude);
    debug!("normalizing [{lo:.3}, {hi:.3}] -> [{out_lo:.3}, {out_hi:.3}]");
    for v in grid.iter_mut() {
        // Guard against the last ulp of rounding past the bounds
        *v = map(*v, lo, hi, out_lo, out_hi).clamp(min_altitude, max_altitude);
    }
}

// Simple pipeline: power-curve remap of raw noise onto [min_altitude, max_altitude]
pub fn normalize_pow(grid: &mut [f32], min_altitude: f32, max_altitude: f32) {
    map_pow(grid, min_altitude, max_altitude, SIMPLE_EXPONENT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::min_max;

    #[test]
    fn stretch_hits_exact_bounds() {
        let mut g = vec![-0.4, 0.0, 0.7, 0.1];
        stretch_to_range(&mut g, -1.0, 1.0);
        let (lo, hi) = min_max(&g);
        assert_eq!(lo, -1.0);
        assert!((hi - 1.0).abs() < 1e-6);
    }

    #[test]
    fn overshoot_is_squeezed_into_bounds() {
        let mut g = vec![-30.0, 0.0, 25.0];
        normalize_to_bounds(&mut g, -10.0, 10.0);
        assert_eq!(g[0], -10.0);
        assert_eq!(g[2], 10.0);
        assert!(g[1] > -10.0 && g[1] < 10.0);
    }

    #[test]
    fn undershoot_is_not_expanded() {
        let mut g = vec![-2.0, 0.5, 3.0];
        let before = g.clone();
        normalize_to_bounds(&mut g, -10.0, 10.0);
        for (a, b) in g.iter().zip(&before) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn one_sided_overshoot() {
        let mut g = vec![-2.0, 4.0, 40.0];
        normalize_to_bounds(&mut g, -10.0, 10.0);
        assert!((g[0] + 2.0).abs() < 1e-5);
        assert_eq!(g[2], 10.0);
    }

    #[test]
    fn flat_grid_drops_to_min_altitude() {
        let mut g = vec![0.0; 9];
        normalize_to_bounds(&mut g, -10.0, 10.0);
        assert!(g.iter().all(|&v| v == -10.0));
    }

    #[test]
    fn pow_covers_bounds() {
        let mut g = vec![-0.8, -0.1, 0.3, 0.9];
        normalize_pow(&mut g, -10.0, 10.0);
        let (lo, hi) = min_max(&g);
        assert_eq!(lo, -10.0);
        assert!((hi - 10.0).abs() < 1e-5);
    }
}
