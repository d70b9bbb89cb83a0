use crate::error::{Result, TerrainError};

// 2D height map: flat row-major Vec<f32> of size width×height
// access as `data[row * width + col]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    width: usize,
    height: usize,
    pub data: Vec<f32>,
    // Elevation below which a cell counts as water
    pub water_level: f32,
}

impl Heightmap {
    // Zero-filled grid
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TerrainError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![0.0; width * height],
            water_level: 0.0,
        })
    }

    // Wrap an existing buffer (e.g. pixels coming from an importer)
    pub fn from_data(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TerrainError::InvalidDimensions { width, height });
        }
        if data.len() != width * height {
            return Err(TerrainError::DimensionMismatch {
                expected: width * height,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
            water_level: 0.0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[self.index(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        let k = self.index(row, col);
        self.data[k] = value;
    }

    // Smallest and largest elevation in the grid
    pub fn min_max(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}
