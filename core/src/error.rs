use crate::biome::BiomeKind;

// Every fault the generator can report.
// All of them are configuration problems caught before the grid is touched,
// so nothing here is retryable: the same options always fail the same way.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("grid size mismatch: expected {expected} cells, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("options describe a {options_width}x{options_height} grid but the heightmap is {width}x{height}")]
    GridSizeMismatch {
        options_width: usize,
        options_height: usize,
        width: usize,
        height: usize,
    },

    #[error("max altitude ({max}) must be greater than min altitude ({min})")]
    InvalidAltitudeRange { min: f32, max: f32 },

    #[error("roughness must be a finite non-negative number, got {0}")]
    InvalidRoughness(f64),

    #[error("biome {biome:?} has an invalid weight {weight}")]
    NegativeBiomeWeight { biome: BiomeKind, weight: f64 },

    #[error("biome distribution has zero total weight but {number_of_biomes} biomes were requested")]
    EmptyBiomeDistribution { number_of_biomes: usize },

    #[error("biome blend input range [{low}, {high}] is empty")]
    InvalidBlendRange { low: f32, high: f32 },

    #[error("failed to parse generator options: {0}")]
    Parse(#[source] ron::error::SpannedError),

    #[error("failed to serialize generator options: {0}")]
    Serialize(#[source] ron::Error),
}

pub type Result<T> = std::result::Result<T, TerrainError>;
