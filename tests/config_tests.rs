use std::fs;

use imgv::ppm::{DecodeOptions, OutOfRange};
use imgv::ViewerConfig;
use tempfile::tempdir;

#[test]
fn parse_kebab_case_config() {
    let json = r#"
{
  "window": { "title": "viewer", "width": 640, "height": 480, "background": [10, 20, 30] },
  "decode": { "out-of-range": "clamp", "max-pixels": 1000 }
}
"#;
    let cfg = ViewerConfig::from_json_str(json).unwrap().validated().unwrap();
    assert_eq!(cfg.window.title, "viewer");
    assert_eq!((cfg.window.width, cfg.window.height), (640, 480));
    assert_eq!(cfg.window.background, [10, 20, 30]);
    assert_eq!(
        cfg.decode_options(),
        DecodeOptions {
            out_of_range: OutOfRange::Clamp,
            max_pixels: 1000,
        }
    );
}

#[test]
fn partial_config_keeps_other_defaults() {
    let cfg = ViewerConfig::from_json_str(r#"{ "window": { "height": 300 } }"#).unwrap();
    assert_eq!(cfg.window.title, "imgv");
    assert_eq!(cfg.window.width, 500);
    assert_eq!(cfg.window.height, 300);
    assert_eq!(cfg.window.background, [0, 0, 255]);
    assert_eq!(cfg.decode.out_of_range, OutOfRange::Reject);
}

#[test]
fn unknown_policy_is_an_error() {
    let err = ViewerConfig::from_json_str(r#"{ "decode": { "out-of-range": "wrap" } }"#);
    assert!(err.is_err());
}

#[test]
fn zero_max_pixels_fails_validation() {
    let cfg = ViewerConfig::from_json_str(r#"{ "decode": { "max-pixels": 0 } }"#).unwrap();
    assert!(cfg.validated().is_err());
}

#[test]
fn reads_config_file_from_disk() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("imgv.json");
    fs::write(&path, r#"{ "window": { "title": "from disk" } }"#).unwrap();

    let cfg = ViewerConfig::from_json_file(&path).unwrap();
    assert_eq!(cfg.window.title, "from disk");
    assert!(ViewerConfig::from_json_file(tmp.path().join("nope.json")).is_err());
}
