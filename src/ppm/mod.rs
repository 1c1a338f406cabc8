/// Image layer: the plain-text PPM format and its decoded form.
///
/// Architecture:
/// ```text
///   file.ppm (P3)
///        │
///        ▼
///   ┌──────────┐
///   │ decoder   │  tokens → header checks → RGBA buffer
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ DecodedImage  │  immutable, [R, G, B, A] per pixel
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ encoder   │  back to P3 text (samples, round trips)
///   └──────────┘
/// ```

pub mod decoder;
pub mod encoder;
pub mod model;

pub use decoder::{DecodeError, DecodeOptions, OutOfRange, decode, decode_bytes};
pub use model::DecodedImage;
