use log::{debug, trace};

use crate::options::NoiseKernel;
use crate::{NoiseSource, Perlin2D, Simplex2D};

// Divides roughness into the base sampling frequency
const ROUGHNESS_SCALE: f64 = 80.0;
// Frequency multiplier per octave
pub const FREQUENCY_STEP: f64 = 3.0;
// Amplitude decay per octave
pub const AMPLITUDE_STEP: f64 = 0.3;

// Multi-octave fractal detail (fBm-style) accumulated onto a row-major grid.
// Coarse low-frequency octaves dominate, each later octave samples 3x finer
// noise at 0.3x the weight of the previous one.
pub struct Fractal2D {
    seed: u64,
    kernel: NoiseKernel,
    roughness: f64, // drives the base frequency: roughness / 80
    octaves: usize,
    amplitude: f64, // weight of the first octave
}

impl Fractal2D {
    pub fn new(seed: u64, roughness: f64, octaves: usize) -> Self {
        Self {
            seed,
            kernel: NoiseKernel::Simplex,
            roughness,
            octaves,
            amplitude: 1.0,
        }
    }

    pub fn with_kernel(mut self, kernel: NoiseKernel) -> Self {
        self.kernel = kernel;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    // Add every octave into `grid` in place.
    // The grid is not cleared first; callers wanting a clean start pre-zero it.
    pub fn apply(&self, grid: &mut [f32], width: usize, height: usize) {
        debug_assert_eq!(grid.len(), width * height);
        match self.kernel {
            NoiseKernel::Simplex => self.accumulate(&Simplex2D::new(self.seed), grid, width, height),
            NoiseKernel::Perlin => self.accumulate(&Perlin2D::new(self.seed), grid, width, height),
        }
    }

    fn accumulate<N: NoiseSource>(&self, noise: &N, grid: &mut [f32], width: usize, height: usize) {
        let mut freq = self.roughness / ROUGHNESS_SCALE;
        let mut amplitude = self.amplitude;
        debug!(
            "fractal detail: {} octaves over {}x{}, base frequency {:.4}",
            self.octaves, width, height, freq
        );

        for octave in 0..self.octaves {
            trace!("octave {octave}: frequency {freq:.4}, amplitude {amplitude:.4}");
            for (row, cells) in grid.chunks_exact_mut(width).take(height).enumerate() {
                let ny = row as f64 * freq;
                for (col, cell) in cells.iter_mut().enumerate() {
                    let nx = col as f64 * freq;
                    *cell += (amplitude * noise.sample(nx, ny)) as f32;
                }
            }
            freq *= FREQUENCY_STEP;
            amplitude *= AMPLITUDE_STEP;
        }
    }
}
