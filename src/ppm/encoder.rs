use std::fmt::Write as _;
use std::path::Path;

use super::model::{BYTES_PER_PIXEL, DecodedImage, MAGIC};

/// Serialize an image back into the P3 grammar, one image row per line.
/// Alpha is dropped; the format has no place for it.
pub fn encode(image: &DecodedImage) -> String {
    let mut out = String::with_capacity(image.pixels().len() * 3 + 32);
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{MAGIC}");
    let _ = writeln!(out, "{} {}", image.width(), image.height());
    let _ = writeln!(out, "{}", image.max_intensity());

    let row_bytes = image.width() as usize * BYTES_PER_PIXEL;
    for row in image.pixels().chunks_exact(row_bytes) {
        let line: Vec<String> = row
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|px| format!("{} {} {}", px[0], px[1], px[2]))
            .collect();
        out.push_str(&line.join("  "));
        out.push('\n');
    }
    out
}

/// Encode `image` and write it to `path`.
pub fn write_file(path: &Path, image: &DecodedImage) -> std::io::Result<()> {
    std::fs::write(path, encode(image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ppm::decoder::{DecodeOptions, decode_bytes};

    #[test]
    fn writes_header_and_one_row_per_line() {
        let img = DecodedImage::from_rgb("mem", 2, 2, 255, &[
            255, 0, 0, 0, 255, 0, //
            0, 0, 255, 7, 8, 9,
        ])
        .unwrap();
        assert_eq!(
            encode(&img),
            "P3\n2 2\n255\n255 0 0  0 255 0\n0 0 255  7 8 9\n"
        );
    }

    #[test]
    fn decoding_the_encoding_gives_back_the_image() {
        let rgb: Vec<u8> = (0..4 * 3 * 3).map(|i| (i * 7 % 100) as u8).collect();
        let original = DecodedImage::from_rgb("round", 4, 3, 100, &rgb).unwrap();

        let text = encode(&original);
        let decoded = decode_bytes("round", text.as_bytes(), &DecodeOptions::default()).unwrap();

        assert_eq!(decoded.width(), 4);
        assert_eq!(decoded.height(), 3);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(decoded.rgb_at(x, y), original.rgb_at(x, y));
            }
        }
    }
}
