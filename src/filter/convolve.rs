//! Interior-only 3×3 convolution over interleaved RGB.
//!
//! Each output row depends only on three rows of the untouched input, so rows
//! are independent and can be filtered in parallel with identical results.
use super::kernel::{apply, clamp_u8, Kernel3, SHARPEN_KERNEL};
use crate::error::Result;
use crate::image::{ImageView, ImageViewMut, RgbImage, CHANNELS};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Convolve every interior pixel of `input` with `kernel`, per channel,
/// clamping to [0, 255]. Border pixels are copied verbatim.
///
/// Returns a freshly allocated image of the same dimensions; `input` is not
/// modified. With `parallel` set (and the `parallel` feature enabled) rows are
/// distributed over the rayon pool.
pub fn convolve_interior<I>(input: &I, kernel: &Kernel3, parallel: bool) -> Result<RgbImage>
where
    I: ImageView<Sample = u8> + Sync,
{
    let w = input.width();
    let h = input.height();
    debug_assert_eq!(input.channels(), CHANNELS);

    let mut out = RgbImage::try_alloc(w, h)?;
    for (y, row) in input.rows().enumerate() {
        out.row_mut(y).copy_from_slice(row);
    }
    if w < 3 || h < 3 {
        return Ok(out);
    }

    let row_len = w * CHANNELS;
    let filter_row = |y: usize, dst: &mut [u8]| {
        let rows = [input.row(y - 1), input.row(y), input.row(y + 1)];
        for i in CHANNELS..row_len - CHANNELS {
            dst[i] = clamp_u8(apply(kernel, rows, i, CHANNELS));
        }
    };

    // Rows 1..h-1; row 0 and row h-1 keep their copied values.
    let interior = &mut out.bytes_mut()[row_len..(h - 1) * row_len];

    #[cfg(feature = "parallel")]
    {
        if parallel {
            interior
                .par_chunks_mut(row_len)
                .enumerate()
                .for_each(|(i, dst)| filter_row(i + 1, dst));
            return Ok(out);
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    interior
        .chunks_mut(row_len)
        .enumerate()
        .for_each(|(i, dst)| filter_row(i + 1, dst));
    Ok(out)
}

/// Apply [`SHARPEN_KERNEL`] to `input`.
pub fn sharpen<I>(input: &I, parallel: bool) -> Result<RgbImage>
where
    I: ImageView<Sample = u8> + Sync,
{
    convolve_interior(input, &SHARPEN_KERNEL, parallel)
}
