//! Pixel buffer allocation and fill from a P6 byte stream.
use super::header::{parse_header, ImageHeader};
use crate::error::{PipelineError, Result};
use crate::image::rgb::{reserve_pixels, RgbImage};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Read exactly `3 * width * height` bytes into `storage` and wrap them.
///
/// `storage` must be empty (as returned by [`reserve_pixels`]). If the source
/// runs dry first, the partial buffer is dropped and
/// [`PipelineError::TruncatedPixelData`] is returned.
pub fn fill_pixels<R: Read>(
    reader: &mut R,
    header: &ImageHeader,
    mut storage: Vec<u8>,
) -> Result<RgbImage> {
    let expected = header.width * header.height * crate::image::CHANNELS;
    storage.clear();
    reader
        .take(expected as u64)
        .read_to_end(&mut storage)
        .map_err(PipelineError::ReadFailed)?;

    let actual = storage.len();
    RgbImage::from_raw(header.width, header.height, storage)
        .ok_or(PipelineError::TruncatedPixelData { expected, actual })
}

/// Allocate and fill the pixel buffer for an already parsed header.
pub fn read_pixels<R: Read>(reader: &mut R, header: &ImageHeader) -> Result<RgbImage> {
    let storage = reserve_pixels(header.width, header.height)?;
    fill_pixels(reader, header, storage)
}

/// Decode a complete P6 image from a buffered reader.
pub fn decode_ppm<R: BufRead>(reader: &mut R) -> Result<RgbImage> {
    let header = parse_header(reader)?;
    debug!(
        "decode_ppm: header {}x{} maxval={}",
        header.width, header.height, header.max_value
    );
    let image = read_pixels(reader, &header)?;
    warn_on_trailing_bytes(reader);
    Ok(image)
}

/// Open `path` and decode it.
pub fn load_ppm(path: &Path) -> Result<RgbImage> {
    let file = File::open(path).map_err(|source| PipelineError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    decode_ppm(&mut BufReader::new(file))
}

/// Data past the declared pixel count is ignored, but worth a note.
pub(crate) fn warn_on_trailing_bytes<R: BufRead>(reader: &mut R) {
    if let Ok(buf) = reader.fill_buf() {
        if !buf.is_empty() {
            warn!("ignoring trailing bytes after pixel data");
        }
    }
}
