#![no_main]

use libfuzzer_sys::fuzz_target;
use favimesh::{greedy_mesh_with_stats, rasterize, PixelBuffer};
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    width: u8,
    height: u8,
    scale: u8,
    pixels: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let width = (input.width as usize).min(64);
    let height = (input.height as usize).min(64);
    let scale = (input.scale as usize).clamp(1, 4);

    // Ensure we have enough pixels (RGBA = 4 bytes per pixel)
    let expected_size = width * height * 4;
    if input.pixels.len() < expected_size {
        return;
    }
    let buffer = match PixelBuffer::new(input.pixels[..expected_size].to_vec(), width, height) {
        Ok(b) => b,
        Err(_) => return,
    };

    let (rects, stats) = greedy_mesh_with_stats(&buffer, scale).expect("valid input must mesh");
    assert_eq!(stats.seeds, rects.len());
    assert!(rects.len() <= width * height);
    assert!(stats.probes <= width * height * (width.max(height) + 3));
    assert!(rects.windows(2).all(|w| w[0].area() >= w[1].area()));

    // Painting the mesh back must reproduce every pixel exactly
    if scale == 1 {
        let painted = rasterize(&rects, width, height).expect("mesh stays inside the image");
        assert_eq!(painted, buffer);
    }
});
