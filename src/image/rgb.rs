//! Owned and borrowed 8-bit RGB buffers (interleaved, row-major, top-to-bottom).
//!
//! The byte length is always `3 * width * height`; constructors that accept raw
//! bytes check this and refuse anything else.
use super::traits::{ImageView, ImageViewMut};
use crate::error::{PipelineError, Result};

/// Samples per pixel (R, G, B).
pub const CHANNELS: usize = 3;

/// Number of bytes needed for a `width × height` RGB image, or `None` on overflow.
pub fn byte_len(width: usize, height: usize) -> Option<usize> {
    width.checked_mul(height)?.checked_mul(CHANNELS)
}

/// Reserve storage for a `width × height` image without filling it.
///
/// The returned vector is empty with capacity for exactly the pixel bytes.
/// Overflowing dimensions and allocator refusal both surface as
/// [`PipelineError::AllocationFailed`].
pub fn reserve_pixels(width: usize, height: usize) -> Result<Vec<u8>> {
    let alloc_failed = |bytes| PipelineError::AllocationFailed {
        width,
        height,
        bytes,
    };
    let bytes = byte_len(width, height).ok_or_else(|| alloc_failed(usize::MAX))?;
    let mut data = Vec::new();
    data.try_reserve_exact(bytes).map_err(|_| alloc_failed(bytes))?;
    Ok(data)
}

/// Owned RGB pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbImage {
    /// Allocate a zero-filled image.
    pub fn try_alloc(width: usize, height: usize) -> Result<Self> {
        let mut data = reserve_pixels(width, height)?;
        // Capacity is already reserved, so this cannot reallocate.
        data.resize(width * height * CHANNELS, 0);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap raw interleaved bytes; `None` if the length does not match.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (byte_len(width, height)? == data.len()).then_some(Self {
            width,
            height,
            data,
        })
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> [u8; 3],
    ) -> Result<Self> {
        let mut img = Self::try_alloc(width, height)?;
        for y in 0..height {
            for x in 0..width {
                img.set(x, y, f(x, y));
            }
        }
        Ok(img)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw interleaved bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub fn as_view(&self) -> RgbView<'_> {
        RgbView {
            w: self.width,
            h: self.height,
            data: &self.data,
        }
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * CHANNELS
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        let i = self.idx(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, px: [u8; 3]) {
        let i = self.idx(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&px);
    }
}

impl ImageView for RgbImage {
    type Sample = u8;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn channels(&self) -> usize {
        CHANNELS
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let len = self.width * CHANNELS;
        &self.data[y * len..(y + 1) * len]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        Some(&self.data)
    }
}

impl ImageViewMut for RgbImage {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let len = self.width * CHANNELS;
        &mut self.data[y * len..(y + 1) * len]
    }
}

/// Borrowed RGB view over externally owned bytes.
#[derive(Clone, Copy, Debug)]
pub struct RgbView<'a> {
    pub w: usize,
    pub h: usize,
    pub data: &'a [u8],
}

impl<'a> RgbView<'a> {
    /// Checked constructor; `None` unless `data.len() == 3 * w * h`.
    pub fn new(w: usize, h: usize, data: &'a [u8]) -> Option<Self> {
        (byte_len(w, h)? == data.len()).then_some(Self { w, h, data })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.w + x) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

impl<'a> ImageView for RgbView<'a> {
    type Sample = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn channels(&self) -> usize {
        CHANNELS
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let len = self.w * CHANNELS;
        &self.data[y * len..(y + 1) * len]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        Some(self.data)
    }
}
