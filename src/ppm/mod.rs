//! Binary PPM (P6, max value 255) codec.
//!
//! - [`parse_header`]: validate the ASCII header and stop at the pixel data.
//! - [`read_pixels`] / [`decode_ppm`] / [`load_ppm`]: allocate and fill an
//!   [`RgbImage`](crate::image::RgbImage), failing on truncated input.
//! - [`encode_ppm`] / [`save_ppm`]: serialize an image back to P6 bytes.

pub mod header;
pub mod reader;
pub mod writer;

pub use header::{parse_header, ImageHeader, FORMAT_TAG, MAX_VALUE};
pub use reader::{decode_ppm, fill_pixels, load_ppm, read_pixels};
pub use writer::{encode_ppm, save_ppm};
