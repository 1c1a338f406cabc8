use std::fmt;

use super::decoder::DecodeError;

/// Alpha value synthesized for every pixel; the source format has no alpha.
pub const OPAQUE: u8 = 255;

/// Bytes per stored pixel (`[R, G, B, A]`).
pub const BYTES_PER_PIXEL: usize = 4;

/// Magic token of the plain-text PPM variant.
pub const MAGIC: &str = "P3";

// ---------------------------------------------------------------------------
// DecodedImage – one fully decoded source file
// ---------------------------------------------------------------------------

/// A decoded image, immutable once built.
///
/// Pixels are stored row-major, top to bottom, as `[R, G, B, A]` quads in
/// memory order. That is the layout `egui::ColorImage::from_rgba_unmultiplied`
/// expects, so the buffer is handed to the renderer without reordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    source_id: String,
    width: u32,
    height: u32,
    max_intensity: u16,
    pixels: Vec<u8>,
}

impl DecodedImage {
    /// Assemble an image from a buffer the decoder already validated.
    pub(crate) fn from_parts(
        source_id: String,
        width: u32,
        height: u32,
        max_intensity: u16,
        pixels: Vec<u8>,
    ) -> Self {
        debug_assert!(width > 0 && height > 0);
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * BYTES_PER_PIXEL
        );
        DecodedImage {
            source_id,
            width,
            height,
            max_intensity,
            pixels,
        }
    }

    /// Build an image from packed RGB triples, synthesizing opaque alpha.
    ///
    /// Enforces the same rules as the decoder: positive dimensions, a max
    /// intensity in `1..=255`, exactly `width * height` triples and no
    /// channel above `max_intensity`.
    pub fn from_rgb(
        source_id: impl Into<String>,
        width: u32,
        height: u32,
        max_intensity: u16,
        rgb: &[u8],
    ) -> Result<Self, DecodeError> {
        if width == 0 || height == 0 {
            return Err(DecodeError::BadDimensions);
        }
        if max_intensity == 0 || max_intensity > u8::MAX as u16 {
            return Err(DecodeError::BadMaxIntensity);
        }
        let count = width as usize * height as usize;
        if rgb.len() != count * 3 {
            return Err(DecodeError::TruncatedPixelData);
        }
        if let Some((index, &value)) = rgb
            .iter()
            .enumerate()
            .find(|(_, v)| u16::from(**v) > max_intensity)
        {
            return Err(DecodeError::ChannelOutOfRange {
                index,
                value: i64::from(value),
                max: max_intensity,
            });
        }

        let mut pixels = Vec::with_capacity(count * BYTES_PER_PIXEL);
        for triple in rgb.chunks_exact(3) {
            pixels.extend_from_slice(&[triple[0], triple[1], triple[2], OPAQUE]);
        }
        Ok(Self::from_parts(
            source_id.into(),
            width,
            height,
            max_intensity,
            pixels,
        ))
    }

    /// Where the image came from; used as the window title.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Declared maximum channel value. Informational only, channels are not rescaled.
    pub fn max_intensity(&self) -> u16 {
        self.max_intensity
    }

    /// `[R, G, B, A]` quads, `width * height * 4` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// `(width, height)` as `usize`, the shape egui textures take.
    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }

    /// RGB of the pixel at `(x, y)`, or `None` outside the image.
    pub fn rgb_at(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let px = &self.pixels[offset..offset + 3];
        Some([px[0], px[1], px[2]])
    }

    /// Operator-facing details, logged after every successful load.
    pub fn summary(&self) -> Summary<'_> {
        Summary(self)
    }
}

/// Display adapter returned by [`DecodedImage::summary`].
pub struct Summary<'a>(&'a DecodedImage);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let img = self.0;
        write!(
            f,
            "{} (magic {MAGIC}, {}x{}, max color {})",
            img.source_id, img.width, img.height, img.max_intensity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgb_synthesizes_opaque_alpha() {
        let img = DecodedImage::from_rgb("mem", 2, 1, 255, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(img.pixels(), &[1, 2, 3, OPAQUE, 4, 5, 6, OPAQUE]);
        assert_eq!(img.size(), [2, 1]);
        assert_eq!(img.rgb_at(1, 0), Some([4, 5, 6]));
        assert_eq!(img.rgb_at(2, 0), None);
    }

    #[test]
    fn from_rgb_rejects_empty_dimensions() {
        assert!(matches!(
            DecodedImage::from_rgb("mem", 0, 1, 255, &[]),
            Err(DecodeError::BadDimensions)
        ));
        assert!(matches!(
            DecodedImage::from_rgb("mem", 1, 0, 255, &[]),
            Err(DecodeError::BadDimensions)
        ));
    }

    #[test]
    fn from_rgb_rejects_max_intensity_outside_one_byte() {
        assert!(matches!(
            DecodedImage::from_rgb("mem", 1, 1, 0, &[0, 0, 0]),
            Err(DecodeError::BadMaxIntensity)
        ));
        assert!(matches!(
            DecodedImage::from_rgb("mem", 1, 1, 256, &[0, 0, 0]),
            Err(DecodeError::BadMaxIntensity)
        ));
    }

    #[test]
    fn from_rgb_rejects_wrong_triple_count() {
        let err = DecodedImage::from_rgb("mem", 2, 2, 255, &[0; 9]).unwrap_err();
        assert!(matches!(err, DecodeError::TruncatedPixelData));
    }

    #[test]
    fn from_rgb_rejects_channels_above_max() {
        let err = DecodedImage::from_rgb("mem", 1, 1, 15, &[0, 16, 0]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::ChannelOutOfRange { index: 1, value: 16, max: 15 }
        ));
    }

    #[test]
    fn summary_mentions_path_and_size() {
        let img = DecodedImage::from_rgb("cat.ppm", 1, 1, 255, &[0, 0, 0]).unwrap();
        assert_eq!(
            img.summary().to_string(),
            "cat.ppm (magic P3, 1x1, max color 255)"
        );
    }
}
