//! 3×3 spatial filtering of RGB images.
//!
//! Only interior pixels (all four orthogonal neighbours present) are
//! filtered; the one-pixel border is copied from the input unchanged. Images
//! narrower or shorter than three pixels have no interior and come back as an
//! exact copy.

pub mod convolve;
pub mod kernel;

pub use convolve::{convolve_interior, sharpen};
pub use kernel::{Kernel3, SHARPEN_KERNEL};
