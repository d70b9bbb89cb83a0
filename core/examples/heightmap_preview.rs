// Generates a 257×257 heightmap with both pipelines and saves grayscale previews:
// terrain_full.png   - noise + biomes + peaks
// terrain_simple.png - noise + power curve
// terrain_river.png  - full pipeline with the river carver switched on
// Set RUST_LOG=debug to follow the pipeline stages.

use std::path::Path;

use image::{GrayImage, Luma};
use terragen::{GeneratorOptions, Heightmap, generate, generate_simple};

fn save_grayscale(hm: &Heightmap, min_alt: f32, max_alt: f32, filename: &str) {
    let mut img = GrayImage::new(hm.width() as u32, hm.height() as u32);
    for row in 0..hm.height() {
        for col in 0..hm.width() {
            let norm = (hm.get(row, col) - min_alt) / (max_alt - min_alt);
            let gray = (norm.clamp(0.0, 1.0) * 255.0).round() as u8;
            img.put_pixel(col as u32, row as u32, Luma([gray]));
        }
    }
    img.save(Path::new(filename)).unwrap();
    println!("Saved {}", filename);
}

fn main() {
    env_logger::init();

    let size = 257;
    let options = GeneratorOptions {
        seed: 2025,
        roughness: 12.0,
        ..GeneratorOptions::for_grid(size, size)
    };

    let mut full = Heightmap::new(size, size).unwrap();
    generate(&mut full, &options).unwrap();
    save_grayscale(&full, options.min_altitude, options.max_altitude, "terrain_full.png");

    let mut simple = Heightmap::new(size, size).unwrap();
    generate_simple(&mut simple, &options).unwrap();
    save_grayscale(&simple, options.min_altitude, options.max_altitude, "terrain_simple.png");

    let river_options = GeneratorOptions {
        carve_river: true,
        ..options.clone()
    };
    let mut river = Heightmap::new(size, size).unwrap();
    generate(&mut river, &river_options).unwrap();
    save_grayscale(&river, options.min_altitude, options.max_altitude, "terrain_river.png");
}
