// Generator configuration and its default values.
// A partial RON document deserializes by taking every missing key from
// `GeneratorOptions::default`; in-process callers get the same merge through
// struct-update syntax.

use serde::{Deserialize, Serialize};

use crate::biome::BiomeKind;
use crate::error::{Result, TerrainError};

// Which gradient-noise kernel feeds the fractal synthesizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoiseKernel {
    #[default]
    Simplex,
    Perlin,
}

// One entry of the biome distribution. Weights are relative and need not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiomeWeight {
    pub biome: BiomeKind,
    pub weight: f64,
}

impl BiomeWeight {
    pub const fn new(biome: BiomeKind, weight: f64) -> Self {
        Self { biome, weight }
    }
}

// Immutable configuration of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    pub width: usize,
    pub height: usize,
    pub seed: u64, // noise tables and the biome/feature RNG stream
    pub roughness: f64, // first octave samples noise at roughness / 80
    pub level_of_detail: usize, // octave count
    pub min_altitude: f32,
    pub max_altitude: f32,
    // Copied onto the heightmap; biome bands are anchored on it
    pub water_level: f32,
    pub number_of_biomes: usize,
    // Relative frequency of each biome kind, walked in order when sampling
    pub biomes: Vec<BiomeWeight>,
    pub noise_kernel: NoiseKernel,
    // Range the biome height functions read their input in. The full pipeline
    // stretches raw noise onto this range right before blending.
    pub blend_input_range: (f32, f32),
    // Carve one river after peak injection
    pub carve_river: bool,
}

pub const DEFAULT_BIOMES: [BiomeWeight; 5] = [
    BiomeWeight::new(BiomeKind::Ocean, 2.0),
    BiomeWeight::new(BiomeKind::Plains, 3.0),
    BiomeWeight::new(BiomeKind::Hills, 2.0),
    BiomeWeight::new(BiomeKind::Mountains, 2.0),
    BiomeWeight::new(BiomeKind::HighPeaks, 1.0),
];

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            seed: 0,
            roughness: 10.0,
            level_of_detail: 6,
            min_altitude: -10.0,
            max_altitude: 10.0,
            water_level: 0.0,
            number_of_biomes: 8,
            biomes: DEFAULT_BIOMES.to_vec(),
            noise_kernel: NoiseKernel::Simplex,
            blend_input_range: (-1.0, 1.0),
            carve_river: false,
        }
    }
}

impl GeneratorOptions {
    // Options sized to match an existing grid, everything else default.
    pub fn for_grid(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    // Parse a (possibly partial) RON document. Missing keys take their defaults.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(TerrainError::Parse)
    }

    pub fn to_ron_string(&self) -> Result<String> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(2);
        ron::ser::to_string_pretty(self, pretty).map_err(TerrainError::Serialize)
    }

    // Total weight of the biome distribution.
    pub fn total_biome_weight(&self) -> f64 {
        self.biomes.iter().map(|b| b.weight).sum()
    }

    // Reject anything the pipeline cannot run on. Called before the grid is touched.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TerrainError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let (min, max) = (self.min_altitude, self.max_altitude);
        if !min.is_finite() || !max.is_finite() || max <= min {
            return Err(TerrainError::InvalidAltitudeRange { min, max });
        }
        if !self.roughness.is_finite() || self.roughness < 0.0 {
            return Err(TerrainError::InvalidRoughness(self.roughness));
        }
        if let Some(bad) = self
            .biomes
            .iter()
            .find(|b| !b.weight.is_finite() || b.weight < 0.0)
        {
            return Err(TerrainError::NegativeBiomeWeight {
                biome: bad.biome,
                weight: bad.weight,
            });
        }
        if self.number_of_biomes > 0 && self.total_biome_weight() <= 0.0 {
            return Err(TerrainError::EmptyBiomeDistribution {
                number_of_biomes: self.number_of_biomes,
            });
        }
        let (low, high) = self.blend_input_range;
        if !low.is_finite() || !high.is_finite() || high <= low {
            return Err(TerrainError::InvalidBlendRange { low, high });
        }
        Ok(())
    }
}
