#![no_main]

use libfuzzer_sys::fuzz_target;
use favimesh::{process_image, PixelBuffer, ProcessOptions, THEMES};
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    width: u8,
    height: u8,
    target_width: u8,
    theme: u8,
    pixels: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let width = input.width as usize;
    let height = (input.height as usize).min(128);

    let expected_size = width * height * 4;
    if input.pixels.len() < expected_size {
        return;
    }
    let buffer = PixelBuffer::new(input.pixels[..expected_size].to_vec(), width, height).unwrap();
    let palette = THEMES[input.theme as usize % THEMES.len()].palette();
    let opts = ProcessOptions {
        target_width: input.target_width as usize,
        scale: 1,
    };

    // The pipeline should never panic and must be deterministic
    let first = process_image(&buffer, &palette, &opts).expect("valid input must process");
    let second = process_image(&buffer, &palette, &opts).expect("valid input must process");
    assert_eq!(first, second);

    let covered: usize = first.mesh.iter().map(|r| r.area()).sum();
    assert_eq!(covered, first.width * first.height);
    assert!(first.width <= width.max(input.target_width as usize));
});
