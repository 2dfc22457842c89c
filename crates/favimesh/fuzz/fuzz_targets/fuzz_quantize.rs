#![no_main]

use libfuzzer_sys::fuzz_target;
use favimesh::{nearest_color, quantize, PixelBuffer, Rgb};
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    palette: Vec<[u8; 3]>,
    pixels: Vec<[u8; 4]>,
}

fuzz_target!(|input: FuzzInput| {
    let palette: Vec<Rgb> = input.palette.iter().copied().map(Rgb::from).collect();
    let width = input.pixels.len();
    let mut buffer = PixelBuffer::new(input.pixels.concat(), width, 1).unwrap();
    let original = buffer.clone();

    match quantize(&mut buffer, &palette) {
        Ok(()) => {
            for x in 0..width {
                let before = original.pixel(x, 0);
                let after = buffer.pixel(x, 0);
                let idx = nearest_color(Rgb::from_rgba(before), &palette).unwrap();
                assert_eq!(Rgb::from_rgba(after), palette[idx]);
                assert_eq!(after[3], before[3], "alpha must pass through");
            }
        }
        Err(_) => {
            assert!(palette.is_empty());
            assert_eq!(buffer, original);
        }
    }
});
