//! PPM P6 header parsing.
//!
//! The header is four whitespace-delimited ASCII tokens (tag, width, height,
//! max value) followed by exactly one whitespace byte. `#` comments may appear
//! between tokens and run to the end of the line. Parsing never closes or
//! otherwise tears down the source; on return the reader is positioned at the
//! first pixel byte.
use crate::error::{HeaderError, PipelineError, Result};
use std::fmt;
use std::io::BufRead;

pub const FORMAT_TAG: &str = "P6";
pub const MAX_VALUE: u16 = 255;

/// Longest token accepted before the header is declared malformed.
const MAX_TOKEN_LEN: usize = 32;

/// Validated P6 header. `width` and `height` are always positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: usize,
    pub height: usize,
    pub max_value: u16,
}

impl ImageHeader {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            max_value: MAX_VALUE,
        }
    }
}

/// Canonical serialized form: `P6\n{width} {height}\n255\n`.
impl fmt::Display for ImageHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{FORMAT_TAG}\n{} {}\n{}\n",
            self.width, self.height, self.max_value
        )
    }
}

/// Parse the header and advance `reader` to the start of pixel data.
pub fn parse_header<R: BufRead>(reader: &mut R) -> Result<ImageHeader> {
    let tag = next_token(reader, "format tag")?;
    if tag != FORMAT_TAG {
        return Err(HeaderError::BadTag(tag).into());
    }

    let width = parse_dimension(reader, "width")?;
    let height = parse_dimension(reader, "height")?;

    let max_value = parse_int(reader, "max value")?;
    if max_value != i64::from(MAX_VALUE) {
        return Err(HeaderError::UnsupportedMaxValue(max_value).into());
    }

    // Exactly one separator byte; whatever follows is pixel data.
    match peek(reader)? {
        Some(b) if b.is_ascii_whitespace() => reader.consume(1),
        _ => return Err(HeaderError::MissingSeparator.into()),
    }

    Ok(ImageHeader {
        width,
        height,
        max_value: MAX_VALUE,
    })
}

fn parse_dimension<R: BufRead>(reader: &mut R, field: &'static str) -> Result<usize> {
    let value = parse_int(reader, field)?;
    if value <= 0 {
        return Err(HeaderError::NonPositiveDimension { field, value }.into());
    }
    usize::try_from(value).map_err(|_| {
        HeaderError::NotANumber {
            field,
            token: value.to_string(),
        }
        .into()
    })
}

fn parse_int<R: BufRead>(reader: &mut R, field: &'static str) -> Result<i64> {
    let token = next_token(reader, field)?;
    token
        .parse::<i64>()
        .map_err(|_| HeaderError::NotANumber { field, token }.into())
}

fn peek<R: BufRead>(reader: &mut R) -> Result<Option<u8>> {
    let buf = reader.fill_buf().map_err(PipelineError::ReadFailed)?;
    Ok(buf.first().copied())
}

/// Skip whitespace and comments, then read bytes up to (not including) the
/// next whitespace byte or end of input.
fn next_token<R: BufRead>(reader: &mut R, field: &'static str) -> Result<String> {
    loop {
        match peek(reader)? {
            None => return Err(HeaderError::MissingToken(field).into()),
            Some(b'#') => skip_comment(reader)?,
            Some(b) if b.is_ascii_whitespace() => reader.consume(1),
            Some(_) => break,
        }
    }

    let mut token = Vec::new();
    while let Some(b) = peek(reader)? {
        if b.is_ascii_whitespace() {
            break;
        }
        if token.len() == MAX_TOKEN_LEN {
            return Err(HeaderError::NotANumber {
                field,
                token: String::from_utf8_lossy(&token).into_owned(),
            }
            .into());
        }
        token.push(b);
        reader.consume(1);
    }
    Ok(String::from_utf8_lossy(&token).into_owned())
}

fn skip_comment<R: BufRead>(reader: &mut R) -> Result<()> {
    let mut line = Vec::new();
    reader
        .read_until(b'\n', &mut line)
        .map_err(PipelineError::ReadFailed)?;
    Ok(())
}
