use crate::{NoiseSource, permutation_table};

// Salt mixed into the seed before shuffling the permutation table
const SIMPLEX_SALT: u64 = 0x1234_5678_9ABC_DEF0;

// Gradient directions: the 12 edge midpoints of a cube projected onto the plane
const GRAD3: [(i8, i8); 12] = [
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (0, 1),
    (0, -1),
];

// Single-octave 2D Simplex noise, Ken Perlin's simplex algorithm.
// Simplex divides space into triangles rather than squares,
// which gives better isotropy than classic Perlin.
// Octave summation is the job of `Fractal2D`.
#[derive(Clone)]
pub struct Simplex2D {
    perm: [u8; 512],
}

impl Simplex2D {
    pub fn new(seed: u64) -> Self {
        Self {
            perm: permutation_table(seed, SIMPLEX_SALT),
        }
    }

    #[inline]
    fn dot(g: (i8, i8), x: f64, y: f64) -> f64 {
        (g.0 as f64) * x + (g.1 as f64) * y
    }

    // Contribution of one simplex corner at local offset (x, y)
    #[inline]
    fn corner(gi: usize, x: f64, y: f64) -> f64 {
        // Circular radius of influence
        let t = 0.5 - x * x - y * y;
        if t > 0.0 {
            let t_sq = t * t;
            t_sq * t_sq * Self::dot(GRAD3[gi], x, y)
        } else {
            0.0
        }
    }

    // Raw 2D Simplex noise at (xin, yin), roughly [-1, +1]
    fn raw_noise(&self, xin: f64, yin: f64) -> f64 {
        const SQRT_3: f64 = 1.732_050_807_568_877_2;
        // Skew the square grid into a rhombus of equilateral triangles and back
        const F2: f64 = 0.5 * (SQRT_3 - 1.0);
        const G2: f64 = (3.0 - SQRT_3) / 6.0;

        let s = (xin + yin) * F2;
        let i = (xin + s).floor() as i64;
        let j = (yin + s).floor() as i64;

        let t = (i + j) as f64 * G2;
        let x0 = xin - (i as f64 - t);
        let y0 = yin - (j as f64 - t);

        // Lower or upper triangle of the cell
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        // Hash the three corners; the double lookup mixes i and j
        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let gi0 = (self.perm[ii + self.perm[jj] as usize] as usize) % 12;
        let gi1 = (self.perm[ii + i1 + self.perm[jj + j1] as usize] as usize) % 12;
        let gi2 = (self.perm[ii + 1 + self.perm[jj + 1] as usize] as usize) % 12;

        let n = Self::corner(gi0, x0, y0) + Self::corner(gi1, x1, y1) + Self::corner(gi2, x2, y2);

        // Scale to roughly [-1, 1]
        70.0 * n
    }
}

impl NoiseSource for Simplex2D {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.raw_noise(x, y)
    }
}
