use std::path::Path;

use image::{Rgb, RgbImage};
use palette::{Gradient, LinSrgb};
use terragen::{GeneratorOptions, Heightmap, generate};

// Simple hillshade for a heightmap
// `z_scale` adjusts vertical exaggeration
fn hillshade(hm: &Heightmap, z_scale: f32) -> Vec<f32> {
    let (w, h) = (hm.width(), hm.height());
    let mut shade = vec![1.0; w * h];
    let azimuth = std::f32::consts::PI / 4.0;
    let altitude = std::f32::consts::PI / 4.0;
    let (sin_alt, cos_alt) = altitude.sin_cos();
    let (lx, ly, lz) = (azimuth.cos() * cos_alt, azimuth.sin() * cos_alt, sin_alt);

    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            let dzdx = (hm.get(y, x + 1) - hm.get(y, x - 1)) / 2.0 * z_scale;
            let dzdy = (hm.get(y + 1, x) - hm.get(y - 1, x)) / 2.0 * z_scale;
            let len = (dzdx * dzdx + dzdy * dzdy + 1.0).sqrt();
            let (nx, ny, nz) = (-dzdx / len, -dzdy / len, 1.0 / len);
            shade[y * w + x] = (nx * lx + ny * ly + nz * lz).max(0.0);
        }
    }
    shade
}

fn main() {
    env_logger::init();

    let size = 513;
    let options = GeneratorOptions {
        seed: 7,
        number_of_biomes: 12,
        ..GeneratorOptions::for_grid(size, size)
    };
    let mut hm = Heightmap::new(size, size).unwrap();
    generate(&mut hm, &options).unwrap();

    let shade = hillshade(&hm, 1.0);

    // Water below the water level, then sand, grass, rock and snow
    let water = (hm.water_level - options.min_altitude) / (options.max_altitude - options.min_altitude);
    let gradient = Gradient::with_domain(vec![
        (0.0, LinSrgb::new(0.0, 0.0, 0.3)),
        (water, LinSrgb::new(0.1, 0.3, 0.8)),
        (water + 0.02, LinSrgb::new(0.8, 0.8, 0.5)),
        (water + 0.2, LinSrgb::new(0.1, 0.6, 0.2)),
        (0.85, LinSrgb::new(0.5, 0.4, 0.3)),
        (1.0, LinSrgb::new(1.0, 1.0, 1.0)),
    ]);

    let mut img = RgbImage::new(size as u32, size as u32);
    for y in 0..size {
        for x in 0..size {
            let norm = (hm.get(y, x) - options.min_altitude) / (options.max_altitude - options.min_altitude);
            let col: LinSrgb = gradient.get(norm.clamp(0.0, 1.0));
            let rgb = col.into_format::<u8>();
            let light = (shade[y * size + x] * 0.5 + 0.5).clamp(0.0, 1.0);
            img.put_pixel(
                x as u32,
                y as u32,
                Rgb([
                    (rgb.red as f32 * light) as u8,
                    (rgb.green as f32 * light) as u8,
                    (rgb.blue as f32 * light) as u8,
                ]),
            );
        }
    }

    let path = Path::new("terrain_colored.png");
    img.save(path).unwrap();
    println!("Saved colored terrain to {:?}", path);
}
