// Small math helpers shared by every pass of the generator.
// All of them work on f32 since the height map stores f32 samples.

// Euclidean distance between (x1, y1) and (x2, y2)
#[inline]
pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    (dx * dx + dy * dy).sqrt()
}

// Logistic sigmoid 1 / (1 + e^-t)
#[inline]
pub fn sigmoid(t: f32) -> f32 {
    1.0 / (1.0 + (-t).exp())
}

// Derivative of the logistic sigmoid: a bell curve peaking at 0.25 for t = 0
// and decaying towards 0 on both sides
#[inline]
pub fn sigmoid_prime(t: f32) -> f32 {
    let s = sigmoid(t);
    s * (1.0 - s)
}

// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

// Linearly remap `v` from [in_lo, in_hi] to [out_lo, out_hi].
// An empty input range has no slope, so everything lands on `out_lo`.
#[inline]
pub fn map(v: f32, in_lo: f32, in_hi: f32, out_lo: f32, out_hi: f32) -> f32 {
    let span = in_hi - in_lo;
    if span == 0.0 || !span.is_finite() {
        return out_lo;
    }
    out_lo + (v - in_lo) * (out_hi - out_lo) / span
}

// Observed (min, max) of a slice
pub fn min_max(values: &[f32]) -> (f32, f32) {
    values
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

// Stretch the values so that the observed min/max land exactly on out_lo/out_hi
pub fn map_array(values: &mut [f32], out_lo: f32, out_hi: f32) {
    if values.is_empty() {
        return;
    }
    let (lo, hi) = min_max(values);
    for v in values.iter_mut() {
        *v = map(*v, lo, hi, out_lo, out_hi);
    }
}

// Normalize to [0, 1] via the observed min/max, raise to `exponent`,
// then remap to [out_lo, out_hi].
// Exponents below 1 lift low values, above 1 push them down (gamma curve).
pub fn map_pow(values: &mut [f32], out_lo: f32, out_hi: f32, exponent: f32) {
    if values.is_empty() {
        return;
    }
    let (lo, hi) = min_max(values);
    let range = hi - lo;
    if range == 0.0 || !range.is_finite() {
        values.fill(out_lo);
        return;
    }
    for v in values.iter_mut() {
        let t = ((*v - lo) / range).clamp(0.0, 1.0);
        *v = lerp(out_lo, out_hi, t.powf(exponent));
    }
}
