// terragen: deterministic procedural heightmap synthesis
// noise -> fractal detail -> biome blend -> peaks -> normalize
pub mod biome;
pub mod error;
pub mod features;
pub mod fractal2;
pub mod generator;
pub mod heightmap;
pub mod normalize;
pub mod options;
pub mod perlin2;
pub mod simplex2;
pub mod utils;

pub use biome::{BiomeField, BiomeKind};
pub use error::{Result, TerrainError};
pub use fractal2::Fractal2D;
pub use generator::{generate, generate_simple};
pub use heightmap::Heightmap;
pub use options::{BiomeWeight, GeneratorOptions, NoiseKernel};
pub use perlin2::Perlin2D;
pub use simplex2::Simplex2D;

// Coherent 2D noise: a pure function of (seed, x, y).
// Implementations build their lookup tables once in `new` and never mutate them,
// so sampling order has no effect on the values returned.
pub trait NoiseSource {
    // Sample noise at (x, y), roughly in [-1, 1]
    fn sample(&self, x: f64, y: f64) -> f64;
}

// Pseudorandom permutation of 0..256, duplicated into 512 entries so lookups
// like perm[i + 1] never need a modulo.
pub(crate) fn permutation_table(seed: u64, salt: u64) -> [u8; 512] {
    let mut p: Vec<u8> = (0..=255u8).collect();
    // xorshift64 is stuck at zero, so nudge that one state off it
    let mut x = match seed ^ salt {
        0 => salt,
        s => s,
    };
    let mut rng = || {
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        x
    };
    // Fisher–Yates shuffle
    for i in (1..256).rev() {
        let j = (rng() % (i as u64 + 1)) as usize;
        p.swap(i, j);
    }
    let mut perm = [0u8; 512];
    for (i, slot) in perm.iter_mut().enumerate() {
        *slot = p[i & 255];
    }
    perm
}

#[cfg(test)]
mod tests {
    use super::permutation_table;

    #[test]
    fn permutation_is_a_doubled_shuffle() {
        let perm = permutation_table(42, 0xABCD);
        let mut seen = [false; 256];
        for &v in &perm[..256] {
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(perm[..256], perm[256..]);
    }

    #[test]
    fn permutation_depends_on_seed() {
        assert_ne!(permutation_table(1, 7), permutation_table(2, 7));
        assert_eq!(permutation_table(3, 7), permutation_table(3, 7));
    }
}
