use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::{BYTES_PER_PIXEL, DecodedImage, MAGIC, OPAQUE};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a file could not be turned into a [`DecodedImage`].
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The source could not be read at all.
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a plain-text PPM file (expected magic P3)")]
    BadMagic,

    /// Width or height missing, non-numeric, zero or negative.
    #[error("invalid image dimensions")]
    BadDimensions,

    /// Max intensity missing, non-numeric or outside `1..=255`.
    #[error("invalid max color value")]
    BadMaxIntensity,

    /// Fewer than `width * height` RGB triples, or a non-numeric sample.
    #[error("pixel data is truncated or malformed")]
    TruncatedPixelData,

    /// A channel exceeded the declared max intensity under [`OutOfRange::Reject`].
    #[error("channel {index} has value {value}, outside 0..={max}")]
    ChannelOutOfRange { index: usize, value: i64, max: u16 },

    /// The pixel buffer could not be allocated, or exceeds the configured limit.
    #[error("cannot allocate a {width}x{height} pixel buffer")]
    OutOfMemory { width: u32, height: u32 },
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// What to do with a channel value outside `[0, max_intensity]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutOfRange {
    /// Fail the whole decode with [`DecodeError::ChannelOutOfRange`].
    #[default]
    Reject,
    /// Clamp into `[0, max_intensity]`.
    Clamp,
}

impl OutOfRange {
    fn apply(self, index: usize, value: i64, max: u16) -> Result<u8, DecodeError> {
        let max_value = i64::from(max);
        if (0..=max_value).contains(&value) {
            return Ok(value as u8);
        }
        match self {
            OutOfRange::Reject => Err(DecodeError::ChannelOutOfRange { index, value, max }),
            OutOfRange::Clamp => Ok(value.clamp(0, max_value) as u8),
        }
    }
}

/// Default upper bound on `width * height`.
pub const DEFAULT_MAX_PIXELS: u64 = 1 << 26;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    pub out_of_range: OutOfRange,
    /// Images with more pixels than this fail with [`DecodeError::OutOfMemory`].
    pub max_pixels: u64,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            out_of_range: OutOfRange::default(),
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read and decode a plain-text PPM file. The path becomes the source id.
///
/// The magic is checked straight off the file, so a file of another
/// format is rejected before the rest of it is read.
pub fn decode(path: &Path, options: &DecodeOptions) -> Result<DecodedImage, DecodeError> {
    let io_err = |source: io::Error| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = BufReader::new(File::open(path).map_err(io_err)?);
    if !read_magic(&mut reader).map_err(io_err)? {
        return Err(DecodeError::BadMagic);
    }

    let mut body = Vec::new();
    reader.read_to_end(&mut body).map_err(io_err)?;
    decode_body(path.display().to_string(), Tokens::new(&body), options)
}

/// Decode an in-memory P3 document.
///
/// Grammar (whitespace-delimited ASCII tokens):
///
/// ```text
/// P3 <width> <height> <max> (<r> <g> <b>){width*height}
/// ```
///
/// Tokens are consumed positionally, so a stream that runs dry after the
/// max intensity is `TruncatedPixelData`, never `BadMaxIntensity`. Tokens
/// after the last pixel are ignored. The pixel buffer is only allocated
/// once the header is valid.
pub fn decode_bytes(
    source_id: impl Into<String>,
    bytes: &[u8],
    options: &DecodeOptions,
) -> Result<DecodedImage, DecodeError> {
    let mut rest = bytes;
    if !matches!(read_magic(&mut rest), Ok(true)) {
        return Err(DecodeError::BadMagic);
    }
    decode_body(source_id, Tokens::new(rest), options)
}

/// Everything after the magic: header numbers, then pixel samples.
fn decode_body(
    source_id: impl Into<String>,
    mut tokens: Tokens<'_>,
    options: &DecodeOptions,
) -> Result<DecodedImage, DecodeError> {
    let width = tokens
        .next_int()
        .and_then(dimension)
        .ok_or(DecodeError::BadDimensions)?;
    let height = tokens
        .next_int()
        .and_then(dimension)
        .ok_or(DecodeError::BadDimensions)?;

    let max_intensity = tokens
        .next_int()
        .filter(|m| (1..=i64::from(u8::MAX)).contains(m))
        .ok_or(DecodeError::BadMaxIntensity)? as u16;

    let mut pixels = allocate(width, height, options)?;
    let samples = width as usize * height as usize * 3;

    for index in 0..samples {
        let value = tokens.next_int().ok_or(DecodeError::TruncatedPixelData)?;
        pixels.push(options.out_of_range.apply(index, value, max_intensity)?);
        if index % 3 == 2 {
            pixels.push(OPAQUE);
        }
    }

    Ok(DecodedImage::from_parts(
        source_id.into(),
        width,
        height,
        max_intensity,
        pixels,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Skip leading whitespace and match the two magic bytes, consuming only
/// what was examined. A longer first word leaves its tail in the reader,
/// so `P31 1 ...` reads as magic `P3` followed by `1`.
fn read_magic<R: BufRead>(reader: &mut R) -> io::Result<bool> {
    let expected = MAGIC.as_bytes();
    let mut matched = 0;
    loop {
        let (used, outcome) = {
            let buf = reader.fill_buf()?;
            if buf.is_empty() {
                return Ok(false);
            }
            let mut used = 0;
            let mut outcome = None;
            for &byte in buf {
                used += 1;
                if matched == 0 && byte.is_ascii_whitespace() {
                    continue;
                }
                if byte != expected[matched] {
                    outcome = Some(false);
                    break;
                }
                matched += 1;
                if matched == expected.len() {
                    outcome = Some(true);
                    break;
                }
            }
            (used, outcome)
        };
        reader.consume(used);
        if let Some(found) = outcome {
            return Ok(found);
        }
    }
}

fn dimension(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|v| *v > 0)
}

fn allocate(width: u32, height: u32, options: &DecodeOptions) -> Result<Vec<u8>, DecodeError> {
    let oom = || DecodeError::OutOfMemory { width, height };

    let pixel_count = u64::from(width) * u64::from(height);
    if pixel_count > options.max_pixels {
        return Err(oom());
    }
    let len = usize::try_from(pixel_count)
        .ok()
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or_else(oom)?;

    let mut pixels = Vec::new();
    pixels.try_reserve_exact(len).map_err(|_| oom())?;
    Ok(pixels)
}

/// Whitespace-delimited byte tokenizer.
struct Tokens<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Tokens { bytes, pos: 0 }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn next_token(&mut self) -> Option<&'a [u8]> {
        self.skip_whitespace();
        if self.pos == self.bytes.len() {
            return None;
        }
        let start = self.pos;
        while self.pos < self.bytes.len() && !self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        Some(&self.bytes[start..self.pos])
    }

    /// Next token as a decimal integer; `None` when missing or non-numeric.
    fn next_int(&mut self) -> Option<i64> {
        let token = self.next_token()?;
        std::str::from_utf8(token).ok()?.parse().ok()
    }
}
