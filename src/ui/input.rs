use std::path::PathBuf;

use eframe::egui::{self, Key};

// ---------------------------------------------------------------------------
// Inbound events
// ---------------------------------------------------------------------------

/// What the user asked for during one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Escape or Q.
    Quit,
    /// A dropped file or one picked in the open dialog.
    Open(PathBuf),
    /// Ctrl+O (Cmd+O on macOS).
    ShowOpenDialog,
}

/// This frame's input as requests: quit keys first, then the dialog
/// shortcut, then dropped files.
pub fn requests(ctx: &egui::Context) -> Vec<Request> {
    ctx.input(|i| {
        let mut out = Vec::new();

        if i.key_pressed(Key::Escape) || (i.key_pressed(Key::Q) && !i.modifiers.command) {
            out.push(Request::Quit);
        }
        if i.modifiers.command && i.key_pressed(Key::O) {
            out.push(Request::ShowOpenDialog);
        }

        out.extend(
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .map(Request::Open),
        );
        out
    })
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Blocking native file picker. `None` when the user cancels.
pub fn pick_image_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open image")
        .add_filter("Plain PPM", &["ppm", "pnm"])
        .add_filter("All files", &["*"])
        .pick_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, modifiers: egui::Modifiers) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }
    }

    fn run(raw: egui::RawInput) -> Vec<Request> {
        let ctx = egui::Context::default();
        let mut got = Vec::new();
        let _ = ctx.run(raw, |ctx| got = requests(ctx));
        got
    }

    #[test]
    fn quit_keys_and_drops_become_requests() {
        let mut raw = egui::RawInput::default();
        raw.events.push(key(Key::Escape, egui::Modifiers::NONE));
        raw.dropped_files.push(egui::DroppedFile {
            path: Some(PathBuf::from("a.ppm")),
            ..Default::default()
        });
        // Web drops carry bytes, not paths; nothing to load from disk.
        raw.dropped_files.push(egui::DroppedFile {
            name: "blob".into(),
            ..Default::default()
        });

        assert_eq!(
            run(raw),
            vec![Request::Quit, Request::Open(PathBuf::from("a.ppm"))]
        );
    }

    #[test]
    fn command_o_opens_the_dialog() {
        let mut raw = egui::RawInput::default();
        raw.modifiers = egui::Modifiers::COMMAND;
        raw.events.push(key(Key::O, egui::Modifiers::COMMAND));
        assert_eq!(run(raw), vec![Request::ShowOpenDialog]);
    }

    #[test]
    fn idle_frame_has_no_requests() {
        assert!(run(egui::RawInput::default()).is_empty());
    }
}
