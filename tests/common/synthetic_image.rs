use prewitt_sched::{load_grid, Grid};

/// Generates a simple high-contrast checkerboard grid.
pub fn checkerboard(width: usize, height: usize, cell: usize) -> Grid {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = vec![0u16; width * height];
    for y in 0..height {
        for x in 0..width {
            let sum = x / cell + y / cell;
            img[y * width + x] = if sum & 1 == 0 { 32 } else { 220 };
        }
    }
    load_grid(width, height, 255, img).expect("valid checkerboard")
}

/// Deterministic pseudo-random texture in `[0, max_shades]`.
pub fn noise(width: usize, height: usize, max_shades: u16, seed: u64) -> Grid {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    let data = (0..width * height)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) % (u64::from(max_shades) + 1)) as u16
        })
        .collect();
    load_grid(width, height, max_shades, data).expect("valid noise grid")
}
