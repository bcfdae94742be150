//! Five-bucket luminance histogram.
//!
//! Luminance uses BT.709 weights rounded half-up:
//! `Y = floor(0.2126·R + 0.7152·G + 0.0722·B + 0.5)`.
//! Buckets are inclusive upper bounds 50, 101, 152, 203 and a final catch-all.
use crate::image::ImageView;
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub const BUCKET_COUNT: usize = 5;

/// Inclusive upper luminance of buckets 0..=3; everything above lands in bucket 4.
pub const BUCKET_UPPER_BOUNDS: [u8; BUCKET_COUNT - 1] = [50, 101, 152, 203];

/// Rounded BT.709 luminance of one RGB pixel.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.2126 * f64::from(r) + 0.7152 * f64::from(g) + 0.0722 * f64::from(b) + 0.5;
    // Max is 255.5 before flooring; the cast saturates regardless.
    y.floor() as u8
}

/// Bucket index for a luminance value; first matching upper bound wins.
#[inline]
pub fn bucket_for(y: u8) -> usize {
    BUCKET_UPPER_BOUNDS
        .iter()
        .position(|&upper| y <= upper)
        .unwrap_or(BUCKET_COUNT - 1)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuminanceHistogram {
    counts: [u64; BUCKET_COUNT],
}

impl LuminanceHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_counts(counts: [u64; BUCKET_COUNT]) -> Self {
        Self { counts }
    }

    /// Count every pixel of an interleaved RGB image.
    ///
    /// The parallel path reduces per-row partial histograms; addition is
    /// commutative so the result matches the sequential pass exactly.
    pub fn from_image<I>(image: &I, parallel: bool) -> Self
    where
        I: ImageView<Sample = u8> + Sync,
    {
        debug_assert_eq!(image.channels(), crate::image::CHANNELS);

        #[cfg(feature = "parallel")]
        {
            if parallel {
                return (0..image.height())
                    .into_par_iter()
                    .map(|y| Self::from_row(image.row(y)))
                    .reduce(Self::new, Self::merged);
            }
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        image
            .rows()
            .map(Self::from_row)
            .fold(Self::new(), Self::merged)
    }

    fn from_row(row: &[u8]) -> Self {
        let mut hist = Self::new();
        for px in row.chunks_exact(crate::image::CHANNELS) {
            hist.accumulate(px[0], px[1], px[2]);
        }
        hist
    }

    /// Add one pixel.
    #[inline]
    pub fn accumulate(&mut self, r: u8, g: u8, b: u8) {
        self.counts[bucket_for(luminance(r, g, b))] += 1;
    }

    fn merged(mut self, other: Self) -> Self {
        for (dst, src) in self.counts.iter_mut().zip(other.counts) {
            *dst += src;
        }
        self
    }

    pub fn counts(&self) -> &[u64; BUCKET_COUNT] {
        &self.counts
    }

    /// Number of pixels accumulated so far.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Space-separated counts, no trailing newline.
impl fmt::Display for LuminanceHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e] = self.counts;
        write!(f, "{a} {b} {c} {d} {e}")
    }
}
