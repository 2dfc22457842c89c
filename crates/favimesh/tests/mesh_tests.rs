use favimesh::*;
use pretty_assertions::assert_eq;

/// Small deterministic generator so property tests cover many shapes.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }
}

const COLORS: [[u8; 4]; 4] = [
    [255, 0, 0, 255],
    [0, 255, 0, 255],
    [0, 0, 255, 255],
    [0, 0, 255, 128],
];

fn random_image(seed: u64, width: usize, height: usize, colors: usize) -> PixelBuffer {
    let mut rng = Lcg(seed);
    PixelBuffer::from_fn(width, height, |_, _| COLORS[rng.next() as usize % colors])
}

fn sizes() -> Vec<(usize, usize)> {
    vec![(1, 1), (1, 9), (9, 1), (2, 2), (5, 3), (8, 8), (16, 7), (31, 17)]
}

/// Counts how many rects cover each cell, in pre-scale coordinates.
fn coverage(rects: &[Rect], width: usize, height: usize, scale: usize) -> Vec<u32> {
    let mut grid = vec![0u32; width * height];
    for r in rects {
        assert_eq!(r.x % scale, 0);
        assert_eq!(r.y % scale, 0);
        assert_eq!(r.width % scale, 0);
        assert_eq!(r.height % scale, 0);
        assert!(r.width >= scale && r.height >= scale, "empty rect {r:?}");
        for y in r.y / scale..(r.y + r.height) / scale {
            for x in r.x / scale..(r.x + r.width) / scale {
                grid[y * width + x] += 1;
            }
        }
    }
    grid
}

#[test]
fn test_exact_tiling() {
    for (seed, (w, h)) in sizes().into_iter().enumerate() {
        for colors in 1..=COLORS.len() {
            for scale in [1, 3] {
                let img = random_image(seed as u64 * 31 + colors as u64, w, h, colors);
                let rects = greedy_mesh(&img, scale).unwrap();
                let grid = coverage(&rects, w, h, scale);
                assert!(
                    grid.iter().all(|&n| n == 1),
                    "{w}x{h} with {colors} colors is not tiled exactly"
                );
                assert!(rects.len() <= w * h);
            }
        }
    }
}

#[test]
fn test_color_fidelity() {
    for (seed, (w, h)) in sizes().into_iter().enumerate() {
        let img = random_image(seed as u64 + 7, w, h, 4);
        let rects = greedy_mesh(&img, 1).unwrap();
        let painted = rasterize(&rects, w, h).unwrap();
        assert_eq!(painted, img, "reconstructed {w}x{h} image differs");

        let scaled = greedy_mesh(&img, 2).unwrap();
        let painted = rasterize(&scaled, w * 2, h * 2).unwrap();
        for y in 0..h * 2 {
            for x in 0..w * 2 {
                assert_eq!(painted.pixel(x, y), img.pixel(x / 2, y / 2));
            }
        }
    }
}

#[test]
fn test_sorted_by_area_then_discovery() {
    for seed in 0..20 {
        let img = random_image(seed, 12, 9, 3);
        let rects = greedy_mesh(&img, 1).unwrap();
        for pair in rects.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.area() >= b.area(), "areas must not increase");
            if a.area() == b.area() {
                // seeds are discovered row-major, and a rect's seed is its top-left corner
                assert!(
                    (a.y, a.x) < (b.y, b.x),
                    "equal areas out of discovery order: {a:?} before {b:?}"
                );
            }
        }
    }
}

#[test]
fn test_seed_count_matches_rects() {
    let img = random_image(99, 20, 20, 2);
    let (rects, stats) = greedy_mesh_with_stats(&img, 1).unwrap();
    assert_eq!(stats.seeds, rects.len());
}

#[test]
fn test_deterministic() {
    let palette = Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255), Rgb::new(255, 0, 0)]).unwrap();
    let img = PixelBuffer::from_fn(17, 11, |x, y| [(x * 15) as u8, (y * 23) as u8, ((x ^ y) * 9) as u8, 255]);

    let first = greedy_mesh(&quantized(&img, &palette).unwrap(), 3).unwrap();
    let second = greedy_mesh(&quantized(&img, &palette).unwrap(), 3).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_single_color_quantized() {
    let img = PixelBuffer::from_fn(4, 4, |_, _| [255, 0, 0, 255]);
    let palette = [Rgb::new(0, 0, 0), Rgb::new(255, 0, 0), Rgb::new(255, 255, 255)];
    let rects = greedy_mesh(&quantized(&img, &palette).unwrap(), 1).unwrap();
    assert_eq!(
        rects,
        vec![Rect {
            x: 0,
            y: 0,
            width: 4,
            height: 4,
            color: MeshColor {
                r: 255,
                g: 0,
                b: 0,
                a: 1.0
            },
            z: 0,
        }]
    );
}

#[test]
fn test_checkerboard_no_diagonal_merge() {
    let a = [255, 255, 255, 255];
    let b = [0, 0, 0, 255];
    let img = PixelBuffer::new([a, b, b, a].concat(), 2, 2).unwrap();
    let rects = greedy_mesh(&img, 1).unwrap();
    assert_eq!(rects.len(), 4);
    for r in &rects {
        assert_eq!((r.width, r.height), (1, 1));
        assert_eq!(r.color.to_rgba(), img.pixel(r.x, r.y));
    }
}

#[test]
fn test_stripes() {
    let rows = PixelBuffer::from_fn(6, 4, |_, y| COLORS[y % 2]);
    let rects = greedy_mesh(&rows, 1).unwrap();
    assert_eq!(rects.len(), 4);
    assert!(rects.iter().all(|r| r.width == 6 && r.height == 1));

    let cols = PixelBuffer::from_fn(6, 4, |x, _| COLORS[x % 2]);
    let rects = greedy_mesh(&cols, 1).unwrap();
    assert_eq!(rects.len(), 6);
    assert!(rects.iter().all(|r| r.width == 1 && r.height == 4));
}

#[test]
fn test_scale_propagation() {
    let img = PixelBuffer::from_fn(2, 1, |_, _| [7, 7, 7, 255]);
    let rects = greedy_mesh(&img, 4).unwrap();
    assert_eq!(rects.len(), 1);
    assert_eq!((rects[0].x, rects[0].y, rects[0].width, rects[0].height), (0, 0, 8, 4));
}

#[test]
fn test_empty_input() {
    for (w, h) in [(0, 0), (0, 5), (5, 0)] {
        let img = PixelBuffer::new(Vec::new(), w, h).unwrap();
        assert_eq!(greedy_mesh(&img, 1).unwrap(), Vec::new());
    }
}

#[test]
fn test_probe_ceiling() {
    for (seed, (w, h)) in sizes().into_iter().enumerate() {
        let img = random_image(seed as u64, w, h, 2);
        let (_, stats) = greedy_mesh_with_stats(&img, 1).unwrap();
        assert!(stats.probes <= w * h * (w.max(h) + 3));
    }

    // checkerboard: every seed fails on its first probe in each direction
    let (w, h) = (32, 32);
    let board = PixelBuffer::from_fn(w, h, |x, y| COLORS[(x + y) % 2]);
    let (rects, stats) = greedy_mesh_with_stats(&board, 1).unwrap();
    assert_eq!(rects.len(), w * h);
    assert!(stats.probes <= 2 * w * h);
}

#[test]
fn test_staircase_rescans_rows() {
    // Each left-hand run is one cell narrower than the one above it, so every
    // vertical probe walks the full run before failing on its last cell.
    let (w, h) = (24, 24);
    let img = PixelBuffer::from_fn(w, h, |x, y| if x + y < w { COLORS[0] } else { COLORS[1] });
    let (rects, stats) = greedy_mesh_with_stats(&img, 1).unwrap();
    assert!(stats.probes > w * h);
    assert!(stats.probes <= w * h * (w.max(h) + 3));
    let grid = coverage(&rects, w, h, 1);
    assert!(grid.iter().all(|&n| n == 1));
    assert_eq!(rects[0].width, w);
}
