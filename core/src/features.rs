use log::{debug, trace, warn};
use rand::Rng;

use crate::biome::BiomeField;
use crate::heightmap::Heightmap;
use crate::utils::{distance, sigmoid_prime};

// Peak target heights are scaled by this after the random draw
pub const PEAK_HEIGHT_SCALE: f32 = 4.0;
// Peaks aim at least this far up the altitude range
pub const PEAK_FLOOR_FRACTION: f32 = 0.8;
// Peak radius is drawn from [40, 60)
pub const PEAK_RADIUS_BASE: f32 = 40.0;
pub const PEAK_RADIUS_SPREAD: f32 = 20.0;

// River depression applied at every cell of the path
pub const RIVER_DEPTH: f32 = 3.0;
pub const RIVER_RADIUS: f32 = 4.0;

// Neighbor visiting order as (dx, dy): W, E, S, N, then the diagonals.
// On ties the first lowest neighbor wins, so this order fixes the river path.
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, -1),
    (1, 1),
    (1, -1),
];

// Add `height_coef * sigmoid'(d / radius_coef)` to every cell, where d is the
// Euclidean distance from (cx, cy). Negative heights dig a depression instead.
pub fn smooth_hill(hm: &mut Heightmap, cx: f32, cy: f32, height_coef: f32, radius_coef: f32) {
    let width = hm.width();
    for (row, cells) in hm.data.chunks_exact_mut(width).enumerate() {
        for (col, cell) in cells.iter_mut().enumerate() {
            let d = distance(cx, cy, col as f32, row as f32);
            *cell += height_coef * sigmoid_prime(d / radius_coef);
        }
    }
}

// Target height for a peak rising from `alt`: somewhere between the top fifth of
// the altitude range and the maximum, picked by `draw` in [0, 1), times 4.
// Never asks for more than 4x the headroom left above `alt`.
pub fn peak_height(alt: f32, min_altitude: f32, max_altitude: f32, draw: f32) -> f32 {
    let max_h = max_altitude - alt;
    let min_h = ((max_altitude - min_altitude) * PEAK_FLOOR_FRACTION + min_altitude - alt).max(0.0);
    let scaled_max = max_h * PEAK_HEIGHT_SCALE;
    let drawn = (draw * (max_h - min_h) + min_h) * PEAK_HEIGHT_SCALE;
    scaled_max.min(drawn)
}

// Raise a smooth hill over every peak-generating field.
//
// Draw order, per field in creation order: one draw for the target height
// (taken for every field, peak-generating or not), then one draw for the
// radius if the field generates peaks and the height is nonzero.
// Returns the number of hills raised.
pub fn inject_peaks<R: Rng>(
    hm: &mut Heightmap,
    fields: &[BiomeField],
    min_altitude: f32,
    max_altitude: f32,
    rng: &mut R,
) -> usize {
    let mut raised = 0;
    for field in fields {
        let alt = hm.get(field.cy, field.cx);
        let h = peak_height(alt, min_altitude, max_altitude, rng.random::<f32>());
        if !field.kind.generates_peaks() {
            continue;
        }
        if h == 0.0 {
            warn!("peak at ({}, {}) already at max altitude, skipped", field.cx, field.cy);
            continue;
        }
        let radius = rng.random::<f32>() * PEAK_RADIUS_SPREAD + PEAK_RADIUS_BASE;
        trace!(
            "peak at ({}, {}): height {h:.3}, radius {radius:.2}",
            field.cx, field.cy
        );
        smooth_hill(hm, field.cx as f32, field.cy as f32, h, radius);
        raised += 1;
    }
    debug!("raised {raised} peaks");
    raised
}

// Walk downhill from (x, y): always step to the lowest 8-connected neighbor
// that is strictly lower than the current cell. Stops when no neighbor is lower
// or the current cell is at or below zero (that cell is not part of the path).
pub fn trace_river(hm: &Heightmap, mut x: usize, mut y: usize) -> Vec<(usize, usize)> {
    let (width, height) = (hm.width() as isize, hm.height() as isize);
    let mut path = Vec::new();

    loop {
        let current = hm.get(y, x);
        if current <= 0.0 {
            break;
        }
        path.push((x, y));

        let mut best: Option<(usize, usize)> = None;
        let mut best_value = current;
        for &(dx, dy) in &NEIGHBORS {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if nx < 0 || nx >= width || ny < 0 || ny >= height {
                continue;
            }
            let v = hm.get(ny as usize, nx as usize);
            if v < best_value {
                best_value = v;
                best = Some((nx as usize, ny as usize));
            }
        }

        match best {
            Some((nx, ny)) => {
                x = nx;
                y = ny;
            }
            None => break,
        }
    }
    path
}

// Trace a river from (x, y) and dig a shallow depression along it.
// Not part of the default pipeline; `GeneratorOptions::carve_river` turns it on.
pub fn carve_river(hm: &mut Heightmap, x: usize, y: usize) -> Vec<(usize, usize)> {
    let path = trace_river(hm, x, y);
    if path.is_empty() {
        warn!("river source ({x}, {y}) is already under water");
    }
    debug!("carving river of {} cells from ({x}, {y})", path.len());
    for &(px, py) in &path {
        smooth_hill(hm, px as f32, py as f32, -RIVER_DEPTH, RIVER_RADIUS);
    }
    path
}
