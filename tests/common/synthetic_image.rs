use scan_stitch::image::PixelBuffer;

/// Deterministic xorshift64 generator for reproducible test content.
pub struct XorShift(u64);

impl XorShift {
    pub fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    pub fn next_u8(&mut self) -> u8 {
        (self.next_u64() >> 56) as u8
    }
}

/// Uniform RGB noise.
pub fn noise_rgb(width: usize, height: usize, seed: u64) -> PixelBuffer {
    let mut rng = XorShift::new(seed);
    let data = (0..width * height * 3).map(|_| rng.next_u8()).collect();
    PixelBuffer::new(width, height, data).expect("valid noise buffer")
}

/// Low-frequency colour page; neighbouring rows are similar, distant rows are not.
pub fn smooth_page(width: usize, height: usize) -> PixelBuffer {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        let yf = y as f64;
        for x in 0..width {
            let xf = x as f64;
            let r = 128.0 + 50.0 * (yf * 0.045).sin() + 35.0 * (yf * 0.0131 + xf * 0.02).sin()
                + 20.0 * (xf * 0.05).sin();
            let g = 128.0 + 45.0 * (yf * 0.037 + 1.0).sin() + 40.0 * (yf * 0.011 - xf * 0.013).cos();
            let b = 128.0 + 60.0 * (yf * 0.023 + xf * 0.007 + 2.0).sin();
            data.extend([r, g, b].map(|v| v.round().clamp(0.0, 255.0) as u8));
        }
    }
    PixelBuffer::new(width, height, data).expect("valid page buffer")
}

/// Rows `y0..y1` of `src`, optionally cut to the leftmost `width` columns.
pub fn rows(src: &PixelBuffer, y0: usize, y1: usize, width: Option<usize>) -> PixelBuffer {
    let view = src.band(y0, y1 - y0);
    let view = match width {
        Some(w) => view.with_width(w),
        None => view,
    };
    view.to_buffer().expect("non-empty slice")
}

/// Split `src` into a top scan of `top_h` rows and a bottom scan that repeats
/// the last `overlap` rows of the top scan.
pub fn split_with_overlap(src: &PixelBuffer, top_h: usize, overlap: usize) -> (PixelBuffer, PixelBuffer) {
    let top = rows(src, 0, top_h, None);
    let bottom = rows(src, top_h - overlap, src.height(), None);
    (top, bottom)
}

/// White `width × height` image with black rows `y0..y1`.
pub fn white_with_black_rows(width: usize, height: usize, y0: usize, y1: usize) -> PixelBuffer {
    let mut img = PixelBuffer::white(width, height).expect("valid dimensions");
    for y in y0..y1 {
        for x in 0..width {
            img.set_pixel(x, y, [0, 0, 0]);
        }
    }
    img
}

/// The two-pass letter scenario: a 20-row black band shared by both scans.
pub fn black_band_scans() -> (PixelBuffer, PixelBuffer) {
    (
        white_with_black_rows(100, 200, 180, 200),
        white_with_black_rows(100, 150, 0, 20),
    )
}

/// Add a constant to every sample, saturating.
pub fn brighten(src: &PixelBuffer, delta: u8) -> PixelBuffer {
    let data = src.as_bytes().iter().map(|v| v.saturating_add(delta)).collect();
    PixelBuffer::new(src.width(), src.height(), data).expect("same dimensions")
}
