// The two generation entry points.
// Both run synchronously over the caller's buffer and never resize it.
// Options and buffer are checked up front: on error the heightmap is left untouched.

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::biome::composite;
use crate::error::{Result, TerrainError};
use crate::features::{carve_river, inject_peaks};
use crate::fractal2::Fractal2D;
use crate::heightmap::Heightmap;
use crate::normalize::{normalize_pow, normalize_to_bounds, stretch_to_range};
use crate::options::GeneratorOptions;

fn check(heightmap: &Heightmap, options: &GeneratorOptions) -> Result<()> {
    options.validate()?;
    if heightmap.width() != options.width || heightmap.height() != options.height {
        return Err(TerrainError::GridSizeMismatch {
            options_width: options.width,
            options_height: options.height,
            width: heightmap.width(),
            height: heightmap.height(),
        });
    }
    // `data` is public, so its length can drift from the dimensions
    let expected = options.width * options.height;
    if heightmap.data.len() != expected {
        return Err(TerrainError::DimensionMismatch {
            expected,
            actual: heightmap.data.len(),
        });
    }
    Ok(())
}

fn detail(options: &GeneratorOptions) -> Fractal2D {
    Fractal2D::new(options.seed, options.roughness, options.level_of_detail)
        .with_kernel(options.noise_kernel)
}

// Full pipeline: fractal detail, stretch onto the blend input range, biome
// blend, peak injection, optional river, then normalization into the
// altitude bounds.
//
// Every random draw comes from one ChaCha8 stream seeded with `options.seed`,
// in this order: per biome field (kind, x, y); per field the peak height and,
// for raised peaks, the radius; finally the river source (x, y) if enabled.
pub fn generate(heightmap: &mut Heightmap, options: &GeneratorOptions) -> Result<()> {
    check(heightmap, options)?;
    let (width, height) = (options.width, options.height);
    debug!("generating {width}x{height} terrain, seed {}", options.seed);

    heightmap.water_level = options.water_level;
    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);

    detail(options).apply(&mut heightmap.data, width, height);

    let (blend_lo, blend_hi) = options.blend_input_range;
    stretch_to_range(&mut heightmap.data, blend_lo, blend_hi);

    let fields = composite(&mut heightmap.data, options, &mut rng)?;

    inject_peaks(
        heightmap,
        &fields,
        options.min_altitude,
        options.max_altitude,
        &mut rng,
    );

    if options.carve_river {
        let x = (rng.random::<f64>() * (width - 1) as f64).floor() as usize;
        let y = (rng.random::<f64>() * (height - 1) as f64).floor() as usize;
        carve_river(heightmap, x, y);
    }

    normalize_to_bounds(&mut heightmap.data, options.min_altitude, options.max_altitude);
    Ok(())
}

// Lightweight pipeline: fractal detail and a power-curve remap into the
// altitude bounds. No biomes, no features, no random draws.
// With `level_of_detail == 0` the grid is returned as it was.
pub fn generate_simple(heightmap: &mut Heightmap, options: &GeneratorOptions) -> Result<()> {
    check(heightmap, options)?;
    if options.level_of_detail == 0 {
        debug!("level of detail is 0, leaving heightmap untouched");
        return Ok(());
    }
    detail(options).apply(&mut heightmap.data, options.width, options.height);
    normalize_pow(&mut heightmap.data, options.min_altitude, options.max_altitude);
    Ok(())
}
