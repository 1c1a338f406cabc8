use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::ppm::decoder::DEFAULT_MAX_PIXELS;
use crate::ppm::{DecodeOptions, OutOfRange};

// ---------------------------------------------------------------------------
// Viewer configuration
// ---------------------------------------------------------------------------

/// Optional JSON settings file. Every field has a default, so `{}` is valid.
///
/// ```json
/// {
///   "window": { "title": "imgv", "width": 500, "height": 500, "background": [0, 0, 255] },
///   "decode": { "out-of-range": "clamp", "max-pixels": 16777216 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub decode: DecodeConfig,
}

/// Window used while no image is loaded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Fallback background, RGB.
    pub background: [u8; 3],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "imgv".to_string(),
            width: 500,
            height: 500,
            background: [0, 0, 255],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct DecodeConfig {
    pub out_of_range: OutOfRange,
    pub max_pixels: u64,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            out_of_range: OutOfRange::default(),
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl From<&DecodeConfig> for DecodeOptions {
    fn from(cfg: &DecodeConfig) -> Self {
        DecodeOptions {
            out_of_range: cfg.out_of_range,
            max_pixels: cfg.max_pixels,
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing viewer config")
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check what serde defaults cannot express.
    pub fn validated(self) -> Result<Self> {
        ensure!(self.window.width > 0, "window.width must be greater than zero");
        ensure!(self.window.height > 0, "window.height must be greater than zero");
        ensure!(
            self.decode.max_pixels > 0,
            "decode.max-pixels must be greater than zero"
        );
        Ok(self)
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions::from(&self.decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = ViewerConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, ViewerConfig::default());
        assert_eq!(cfg.decode_options(), DecodeOptions::default());
    }

    #[test]
    fn zero_width_is_rejected() {
        let cfg = ViewerConfig::from_json_str(r#"{ "window": { "width": 0 } }"#).unwrap();
        let err = cfg.validated().unwrap_err();
        assert!(err.to_string().contains("window.width"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(ViewerConfig::from_json_str(r#"{ "windows": {} }"#).is_err());
    }
}
