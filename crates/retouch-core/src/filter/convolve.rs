//! Neighbourhood convolution filters (blur and sharpen).
//!
//! Kernels are small integer matrices with a divisor. Samples past the image
//! edge are replicated from the nearest edge pixel, so output dimensions
//! always match the input. Alpha is copied, never convolved.

use crate::buffer::PixelBuffer;

/// Square integer convolution kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    /// Side length (odd).
    pub size: usize,
    /// Row-major weights, `size * size` entries.
    pub weights: &'static [i32],
    /// Sum is divided by this before rounding.
    pub divisor: i32,
}

/// 5x5 ring kernel: averages the outer ring of the neighbourhood.
#[rustfmt::skip]
pub const BLUR: Kernel = Kernel {
    size: 5,
    weights: &[
        1, 1, 1, 1, 1,
        1, 0, 0, 0, 1,
        1, 0, 0, 0, 1,
        1, 0, 0, 0, 1,
        1, 1, 1, 1, 1,
    ],
    divisor: 16,
};

/// 3x3 edge-enhancing kernel.
#[rustfmt::skip]
pub const SHARPEN: Kernel = Kernel {
    size: 3,
    weights: &[
        -2, -2, -2,
        -2, 32, -2,
        -2, -2, -2,
    ],
    divisor: 16,
};

/// Convolve the color channels of `image` with `kernel`.
pub fn convolve(image: &PixelBuffer, kernel: &Kernel) -> PixelBuffer {
    debug_assert_eq!(kernel.weights.len(), kernel.size * kernel.size);

    let width = image.width() as i64;
    let height = image.height() as i64;
    let channels = image.channels();
    let samples = image.samples();
    let radius = (kernel.size / 2) as i64;
    let divisor = kernel.divisor as f32;

    let mut output = vec![0u8; samples.len()];

    for y in 0..height {
        for x in 0..width {
            let mut acc = [0i32; 3];

            for (k, &weight) in kernel.weights.iter().enumerate() {
                if weight == 0 {
                    continue;
                }
                let ky = (k / kernel.size) as i64 - radius;
                let kx = (k % kernel.size) as i64 - radius;
                let sx = (x + kx).clamp(0, width - 1);
                let sy = (y + ky).clamp(0, height - 1);
                let idx = (sy * width + sx) as usize * channels;

                for c in 0..3 {
                    acc[c] += weight * samples[idx + c] as i32;
                }
            }

            let dst = (y * width + x) as usize * channels;
            for c in 0..3 {
                output[dst + c] = (acc[c] as f32 / divisor).round().clamp(0.0, 255.0) as u8;
            }
            if channels == 4 {
                output[dst + 3] = samples[dst + 3];
            }
        }
    }

    image.with_samples(output)
}

/// Soften the image with the [`BLUR`] kernel.
pub fn blur(image: &PixelBuffer) -> PixelBuffer {
    convolve(image, &BLUR)
}

/// Enhance edges with the [`SHARPEN`] kernel.
pub fn sharpen(image: &PixelBuffer) -> PixelBuffer {
    convolve(image, &SHARPEN)
}
