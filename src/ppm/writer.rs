use super::header::ImageHeader;
use crate::error::Result;
use crate::image::{ImageView, CHANNELS};
use crate::io::write_atomic;
use std::io::{self, Write};
use std::path::Path;

/// Serialize `image` as `P6\n{w} {h}\n255\n` followed by its raw RGB bytes.
pub fn encode_ppm<W, I>(writer: &mut W, image: &I) -> io::Result<()>
where
    W: Write,
    I: ImageView<Sample = u8>,
{
    if image.channels() != CHANNELS {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("P6 needs 3 channels, image has {}", image.channels()),
        ));
    }
    let header = ImageHeader::new(image.width(), image.height());
    write!(writer, "{header}")?;
    match image.as_slice() {
        Some(bytes) => writer.write_all(bytes)?,
        None => {
            for row in image.rows() {
                writer.write_all(row)?;
            }
        }
    }
    writer.flush()
}

/// Encode `image` into `path`. The file appears only once fully written.
pub fn save_ppm<I: ImageView<Sample = u8>>(image: &I, path: &Path) -> Result<()> {
    write_atomic(path, |w| encode_ppm(w, image))
}
