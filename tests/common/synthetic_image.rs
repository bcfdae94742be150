/// Generates a high-contrast RGB checkerboard, 3 bytes per pixel.
pub fn checkerboard_rgb(width: usize, height: usize, cell: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let sum = x / cell + y / cell;
            let px = if sum & 1 == 0 {
                [32u8, 40, 24]
            } else {
                [220u8, 210, 230]
            };
            img.extend_from_slice(&px);
        }
    }
    img
}

/// Deterministic pseudo-random RGB bytes (xorshift32).
pub fn noise_rgb(width: usize, height: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.max(1);
    (0..width * height * 3)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

/// Wraps pixel bytes in a canonical P6 header.
pub fn ppm_bytes(width: usize, height: usize, pixels: &[u8]) -> Vec<u8> {
    let mut bytes = format!("P6\n{width} {height}\n255\n").into_bytes();
    bytes.extend_from_slice(pixels);
    bytes
}
