use crate::{NoiseSource, permutation_table};

const PERLIN_SALT: u64 = 0xDEAD_BEEF_CAFE_BABE;

// Single-octave 2D Perlin (gradient) noise
#[derive(Clone)]
pub struct Perlin2D {
    perm: [u8; 512],
}

impl Perlin2D {
    pub fn new(seed: u64) -> Self {
        Self {
            perm: permutation_table(seed, PERLIN_SALT),
        }
    }

    // Fade function as defined by Ken Perlin: 6t^5 − 15t^4 + 10t^3
    // First and second derivatives are zero at t=0 and t=1
    #[inline]
    fn fade(t: f64) -> f64 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    #[inline]
    fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a + t * (b - a)
    }

    // Pick one of the gradient directions from the low 4 bits of the hash
    // and return its dot product with (x, y)
    #[inline]
    fn grad(hash: u8, x: f64, y: f64) -> f64 {
        let h = hash & 0xF;
        let u = if h < 8 { x } else { y };
        let v = if h < 8 { y } else { x };
        let sign_u = if (h & 1) == 0 { u } else { -u };
        let sign_v = if (h & 2) == 0 { v } else { -v };
        sign_u + sign_v
    }

    // Raw noise at (x, y), roughly [-1, +1]
    fn noise(&self, x: f64, y: f64) -> f64 {
        let xi = (x.floor() as i64 & 255) as usize;
        let yi = (y.floor() as i64 & 255) as usize;
        let xf = x - x.floor();
        let yf = y - y.floor();
        let u = Self::fade(xf);
        let v = Self::fade(yf);

        let p = &self.perm;
        let aa = p[p[xi] as usize + yi];
        let ab = p[p[xi] as usize + yi + 1];
        let ba = p[p[xi + 1] as usize + yi];
        let bb = p[p[xi + 1] as usize + yi + 1];

        let x1 = Self::lerp(Self::grad(aa, xf, yf), Self::grad(ba, xf - 1.0, yf), u);
        let x2 = Self::lerp(
            Self::grad(ab, xf, yf - 1.0),
            Self::grad(bb, xf - 1.0, yf - 1.0),
            u,
        );
        Self::lerp(x1, x2, v)
    }
}

impl NoiseSource for Perlin2D {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.noise(x, y)
    }
}
