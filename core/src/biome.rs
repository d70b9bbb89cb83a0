use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};
use crate::options::{BiomeWeight, GeneratorOptions};
use crate::utils::{distance, lerp};

// The fixed set of biome kinds. Each one supplies a strength falloff and a
// height band through the match arms below instead of a trait object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiomeKind {
    Ocean,
    Plains,
    Hills,
    Mountains,
    HighPeaks,
}

impl BiomeKind {
    pub const ALL: [BiomeKind; 5] = [
        BiomeKind::Ocean,
        BiomeKind::Plains,
        BiomeKind::Hills,
        BiomeKind::Mountains,
        BiomeKind::HighPeaks,
    ];

    // Only high peaks get a smooth hill injected on top of the blend
    pub fn generates_peaks(self) -> bool {
        matches!(self, BiomeKind::HighPeaks)
    }

    // Falloff radius as a fraction of the longer grid side
    fn spread(self) -> f32 {
        match self {
            BiomeKind::Ocean => 0.35,
            BiomeKind::Plains => 0.30,
            BiomeKind::Hills => 0.25,
            BiomeKind::Mountains => 0.20,
            BiomeKind::HighPeaks => 0.15,
        }
    }

    // Elevation band (low, high) this biome maps its input onto.
    // Ocean sits below the water level, the others climb above it. A water level
    // outside the altitude range is pinned to the nearest bound first.
    fn band(self, min_altitude: f32, max_altitude: f32, water_level: f32) -> (f32, f32) {
        let water_level = water_level.clamp(min_altitude, max_altitude);
        let sea = water_level - min_altitude;
        let land = max_altitude - water_level;
        match self {
            BiomeKind::Ocean => (water_level - 0.75 * sea, water_level - 0.05 * sea),
            BiomeKind::Plains => (water_level, water_level + 0.15 * land),
            BiomeKind::Hills => (water_level + 0.05 * land, water_level + 0.4 * land),
            BiomeKind::Mountains => (water_level + 0.2 * land, water_level + 0.75 * land),
            BiomeKind::HighPeaks => (water_level + 0.4 * land, max_altitude),
        }
    }
}

// One biome influence region anchored at a grid cell.
// Lives for a single generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct BiomeField {
    pub kind: BiomeKind,
    pub cx: usize,
    pub cy: usize,
    band: (f32, f32),
    input_range: (f32, f32),
}

impl BiomeField {
    pub fn new(kind: BiomeKind, cx: usize, cy: usize, options: &GeneratorOptions) -> Self {
        Self {
            kind,
            cx,
            cy,
            band: kind.band(options.min_altitude, options.max_altitude, options.water_level),
            input_range: options.blend_input_range,
        }
    }

    // Influence of this field at cell (x, y).
    // Inverse-quadratic falloff: 1 at the center, never reaches zero,
    // so every cell always has some total strength to divide by.
    pub fn strength(&self, x: usize, y: usize, width: usize, height: usize) -> f32 {
        let radius = (self.kind.spread() * width.max(height) as f32).max(1.0);
        let d = distance(self.cx as f32, self.cy as f32, x as f32, y as f32) / radius;
        let q = 1.0 + d * d;
        1.0 / (q * q)
    }

    // Remap a raw elevation (expected in the blend input range) into this biome's band
    pub fn height(&self, raw: f32) -> f32 {
        let (lo, hi) = self.input_range;
        let t = ((raw - lo) / (hi - lo)).clamp(0.0, 1.0);
        lerp(self.band.0, self.band.1, t)
    }
}

// Divide every weight by the total so they sum to 1.
// A zero total cannot be sampled from and yields `None`.
pub fn normalize_distribution(biomes: &[BiomeWeight]) -> Option<Vec<BiomeWeight>> {
    let total: f64 = biomes.iter().map(|b| b.weight).sum();
    if total <= 0.0 || !total.is_finite() {
        return None;
    }
    Some(
        biomes
            .iter()
            .map(|b| BiomeWeight::new(b.biome, b.weight / total))
            .collect(),
    )
}

// Cumulative-weight selection: walk the distribution in order until the running
// sum meets `draw`. Zero-weight entries are never picked.
pub fn pick_biome(normalized: &[BiomeWeight], draw: f64) -> Option<BiomeKind> {
    let mut acc = 0.0;
    for entry in normalized {
        acc += entry.weight;
        if entry.weight > 0.0 && acc >= draw {
            return Some(entry.biome);
        }
    }
    // Rounding can leave the running sum a hair under 1.0
    normalized.iter().rev().find(|b| b.weight > 0.0).map(|b| b.biome)
}

// Create `number_of_biomes` fields. Per field the RNG is drawn exactly three
// times, in this order: biome kind, center x, center y.
pub fn place_biomes<R: Rng>(
    options: &GeneratorOptions,
    rng: &mut R,
) -> Result<Vec<BiomeField>> {
    if options.number_of_biomes == 0 {
        return Ok(Vec::new());
    }
    let normalized = normalize_distribution(&options.biomes).ok_or(
        TerrainError::EmptyBiomeDistribution {
            number_of_biomes: options.number_of_biomes,
        },
    )?;

    let mut fields = Vec::with_capacity(options.number_of_biomes);
    for _ in 0..options.number_of_biomes {
        let draw: f64 = rng.random();
        let kind = pick_biome(&normalized, draw).ok_or(TerrainError::EmptyBiomeDistribution {
            number_of_biomes: options.number_of_biomes,
        })?;
        let cx = (rng.random::<f64>() * options.width.saturating_sub(1) as f64).floor() as usize;
        let cy = (rng.random::<f64>() * options.height.saturating_sub(1) as f64).floor() as usize;
        trace!("biome {kind:?} at ({cx}, {cy})");
        fields.push(BiomeField::new(kind, cx, cy, options));
    }
    Ok(fields)
}

// Replace every cell by the strength-weighted mean of each field's height for it:
// sum(s_i * h_i(raw)) / sum(s_i). With no fields the grid is left as is.
pub fn blend(grid: &mut [f32], width: usize, height: usize, fields: &[BiomeField]) {
    if fields.is_empty() {
        return;
    }
    for (y, row) in grid.chunks_exact_mut(width).take(height).enumerate() {
        for (x, cell) in row.iter_mut().enumerate() {
            let raw = *cell;
            let mut total_strength = 0.0f32;
            let mut total_height = 0.0f32;
            for field in fields {
                let s = field.strength(x, y, width, height);
                total_strength += s;
                total_height += s * field.height(raw);
            }
            debug_assert!(total_strength > 0.0);
            *cell = total_height / total_strength;
        }
    }
}

// Scatter the biome fields and blend the grid through them.
// Returns the fields so the feature pass can reuse them.
pub fn composite<R: Rng>(
    grid: &mut [f32],
    options: &GeneratorOptions,
    rng: &mut R,
) -> Result<Vec<BiomeField>> {
    let fields = place_biomes(options, rng)?;
    debug!("blending {} biome fields", fields.len());
    blend(grid, options.width, options.height, &fields);
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn weights(pairs: &[(BiomeKind, f64)]) -> Vec<BiomeWeight> {
        pairs.iter().map(|&(b, w)| BiomeWeight::new(b, w)).collect()
    }

    #[test]
    fn normalize_sums_to_one() {
        let n = normalize_distribution(&weights(&[
            (BiomeKind::Ocean, 2.0),
            (BiomeKind::Hills, 6.0),
        ]))
        .unwrap();
        assert_eq!(n[0].weight, 0.25);
        assert_eq!(n[1].weight, 0.75);
    }

    #[test]
    fn normalize_rejects_zero_total() {
        assert!(normalize_distribution(&weights(&[(BiomeKind::Plains, 0.0)])).is_none());
        assert!(normalize_distribution(&[]).is_none());
    }

    #[test]
    fn pick_walks_cumulative_weights() {
        let n = weights(&[
            (BiomeKind::Ocean, 0.25),
            (BiomeKind::Plains, 0.5),
            (BiomeKind::HighPeaks, 0.25),
        ]);
        assert_eq!(pick_biome(&n, 0.0), Some(BiomeKind::Ocean));
        assert_eq!(pick_biome(&n, 0.25), Some(BiomeKind::Ocean));
        assert_eq!(pick_biome(&n, 0.26), Some(BiomeKind::Plains));
        assert_eq!(pick_biome(&n, 0.75), Some(BiomeKind::Plains));
        assert_eq!(pick_biome(&n, 0.99), Some(BiomeKind::HighPeaks));
    }

    #[test]
    fn pick_skips_zero_weights() {
        let n = weights(&[(BiomeKind::Ocean, 0.0), (BiomeKind::Hills, 1.0)]);
        assert_eq!(pick_biome(&n, 0.0), Some(BiomeKind::Hills));
        assert_eq!(pick_biome(&[], 0.5), None);
    }

    #[test]
    fn scaled_distributions_draw_the_same_sequence() {
        let small = GeneratorOptions {
            width: 32,
            height: 32,
            number_of_biomes: 20,
            biomes: weights(&[(BiomeKind::Ocean, 1.0), (BiomeKind::Mountains, 1.0)]),
            ..Default::default()
        };
        let large = GeneratorOptions {
            biomes: weights(&[(BiomeKind::Ocean, 5.0), (BiomeKind::Mountains, 5.0)]),
            ..small.clone()
        };
        let a = place_biomes(&small, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        let b = place_biomes(&large, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        let kinds = |f: &[BiomeField]| f.iter().map(|x| x.kind).collect::<Vec<_>>();
        assert_eq!(kinds(&a), kinds(&b));
        assert_eq!(a.iter().map(|f| (f.cx, f.cy)).collect::<Vec<_>>(),
                   b.iter().map(|f| (f.cx, f.cy)).collect::<Vec<_>>());
    }

    #[test]
    fn placement_consumes_three_draws_per_field() {
        let opts = GeneratorOptions {
            width: 16,
            height: 16,
            number_of_biomes: 4,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        place_biomes(&opts, &mut rng).unwrap();
        let after_placement: f64 = rng.random();

        let mut reference = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..12 {
            let _: f64 = reference.random();
        }
        assert_eq!(after_placement, reference.random::<f64>());
    }

    #[test]
    fn centers_stay_inside_grid() {
        let opts = GeneratorOptions {
            width: 7,
            height: 3,
            number_of_biomes: 50,
            ..Default::default()
        };
        let fields = place_biomes(&opts, &mut ChaCha8Rng::seed_from_u64(5)).unwrap();
        assert!(fields.iter().all(|f| f.cx < 7 && f.cy < 3));
    }

    #[test]
    fn strength_peaks_at_center_and_stays_positive() {
        let opts = GeneratorOptions::default();
        let field = BiomeField::new(BiomeKind::Hills, 10, 10, &opts);
        assert_eq!(field.strength(10, 10, 64, 64), 1.0);
        assert!(field.strength(20, 10, 64, 64) < field.strength(12, 10, 64, 64));
        assert!(field.strength(10_000, 10_000, 64, 64) > 0.0);
    }

    #[test]
    fn height_maps_into_band() {
        let opts = GeneratorOptions::default();
        let ocean = BiomeField::new(BiomeKind::Ocean, 0, 0, &opts);
        let peaks = BiomeField::new(BiomeKind::HighPeaks, 0, 0, &opts);
        assert!(ocean.height(1.0) < opts.water_level);
        assert!(ocean.height(-1.0) >= opts.min_altitude);
        assert_eq!(peaks.height(1.0), opts.max_altitude);
        assert!(peaks.height(-1.0) > opts.water_level);
        // Out-of-range input is clamped onto the band ends
        assert_eq!(peaks.height(5.0), peaks.height(1.0));
    }

    #[test]
    fn every_band_fits_the_altitude_range() {
        let opts = GeneratorOptions {
            min_altitude: -4.0,
            max_altitude: 30.0,
            water_level: 2.0,
            ..Default::default()
        };
        for kind in BiomeKind::ALL {
            let field = BiomeField::new(kind, 0, 0, &opts);
            let (lo, hi) = (field.height(-1.0), field.height(1.0));
            assert!(lo <= hi, "{kind:?} band is inverted");
            assert!(lo >= opts.min_altitude && hi <= opts.max_altitude + 1e-4, "{kind:?} escapes bounds");
            assert_eq!(kind == BiomeKind::Ocean, hi < opts.water_level);
        }
    }

    #[test]
    fn bands_stay_ordered_when_water_is_outside_the_range() {
        for water_level in [-25.0, 40.0] {
            let opts = GeneratorOptions {
                min_altitude: -4.0,
                max_altitude: 30.0,
                water_level,
                ..Default::default()
            };
            for kind in BiomeKind::ALL {
                let field = BiomeField::new(kind, 0, 0, &opts);
                let (lo, hi) = (field.height(-1.0), field.height(1.0));
                assert!(lo <= hi, "{kind:?} band is inverted at water {water_level}");
                assert!(lo >= opts.min_altitude && hi <= opts.max_altitude + 1e-4);
            }
        }
    }

    #[test]
    fn place_reports_requested_count_on_empty_distribution() {
        let opts = GeneratorOptions {
            number_of_biomes: 3,
            biomes: weights(&[(BiomeKind::Ocean, 0.0), (BiomeKind::Hills, 0.0)]),
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            place_biomes(&opts, &mut rng),
            Err(TerrainError::EmptyBiomeDistribution { number_of_biomes: 3 })
        ));
    }

    #[test]
    fn height_respects_blend_input_range() {
        let opts = GeneratorOptions {
            blend_input_range: (0.0, 1.0),
            ..Default::default()
        };
        let plains = BiomeField::new(BiomeKind::Plains, 0, 0, &opts);
        assert_eq!(plains.height(0.0), opts.water_level);
        assert_eq!(plains.height(-1.0), opts.water_level);
    }

    #[test]
    fn blend_single_field_is_its_height_function() {
        let opts = GeneratorOptions {
            width: 3,
            height: 2,
            ..Default::default()
        };
        let field = BiomeField::new(BiomeKind::Mountains, 1, 1, &opts);
        let mut grid = vec![-1.0, -0.5, 0.0, 0.25, 0.5, 1.0];
        let expected: Vec<f32> = grid.iter().map(|&v| field.height(v)).collect();
        blend(&mut grid, 3, 2, std::slice::from_ref(&field));
        for (g, e) in grid.iter().zip(&expected) {
            assert!((g - e).abs() < 1e-5);
        }
    }

    #[test]
    fn blend_without_fields_is_noop() {
        let mut grid = vec![0.3f32; 9];
        blend(&mut grid, 3, 3, &[]);
        assert!(grid.iter().all(|&v| v == 0.3));
    }

    #[test]
    fn blend_result_lies_between_field_heights() {
        let opts = GeneratorOptions {
            width: 16,
            height: 16,
            ..Default::default()
        };
        let ocean = BiomeField::new(BiomeKind::Ocean, 0, 0, &opts);
        let peaks = BiomeField::new(BiomeKind::HighPeaks, 15, 15, &opts);
        let mut grid = vec![0.0f32; 256];
        blend(&mut grid, 16, 16, &[ocean.clone(), peaks.clone()]);
        let lo = ocean.height(0.0);
        let hi = peaks.height(0.0);
        assert!(grid.iter().all(|&v| v >= lo - 1e-4 && v <= hi + 1e-4));
        // Each corner leans towards its own field
        assert!(grid[0] < grid[255]);
    }
}
