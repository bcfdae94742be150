#![doc = include_str!("../README.md")]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod filter;
pub mod histogram;
pub mod image;
pub mod io;
pub mod pipeline;
pub mod ppm;

// --- High-level re-exports -------------------------------------------------

pub use crate::config::{PipelineConfig, RuntimeConfig};
pub use crate::error::{HeaderError, PipelineError};
pub use crate::histogram::LuminanceHistogram;
pub use crate::image::{RgbImage, RgbView};
pub use crate::pipeline::{process_image, Pipeline, PipelineStage};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use ppm_sharpen::prelude::*;
///
/// let img = RgbImage::from_fn(4, 4, |x, y| [(x * 60) as u8, (y * 60) as u8, 128]).unwrap();
/// let sharpened = sharpen(&img, false).unwrap();
/// let hist = LuminanceHistogram::from_image(&sharpened, false);
/// assert_eq!(hist.total(), 16);
/// ```
pub mod prelude {
    pub use crate::filter::sharpen;
    pub use crate::image::{ImageView, RgbImage, RgbView};
    pub use crate::ppm::{decode_ppm, encode_ppm, load_ppm, save_ppm};
    pub use crate::{LuminanceHistogram, PipelineConfig, PipelineError};
}
