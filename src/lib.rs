//! imgv: a minimal viewer for plain-text PPM (P3) images.
//!
//! The decoder and the display state live here; `main.rs` only wires up
//! the CLI, logging and the native window.

pub mod app;
pub mod config;
pub mod controller;
pub mod ppm;
pub mod resource;
pub mod ui;
pub mod window;

pub use app::ImgvApp;
pub use config::ViewerConfig;
pub use controller::{DisplayController, DisplaySession};
