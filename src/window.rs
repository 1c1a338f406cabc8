use eframe::egui;

use crate::config::WindowConfig;

/// The window operations a successful load drives.
pub trait WindowHandle {
    fn set_title(&mut self, title: &str);
    /// Size in image pixels.
    fn set_size(&mut self, width: u32, height: u32);
    fn request_redraw(&mut self);

    /// Longest texture side the renderer accepts, when already known.
    fn max_texture_side(&self) -> Option<usize> {
        None
    }
}

/// Size in egui points that covers `width x height` physical pixels.
pub fn logical_size(width: u32, height: u32, pixels_per_point: f32) -> egui::Vec2 {
    egui::vec2(width as f32, height as f32) / pixels_per_point
}

// ---------------------------------------------------------------------------
// Before the native window exists
// ---------------------------------------------------------------------------

/// Collects title and size from a startup load; the values then seed the
/// viewport builder.
///
/// The display scale is unknown until the window exists, so the builder
/// gets the raw pixel size; the app resends the size in points on its
/// first frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupWindow {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl StartupWindow {
    pub fn new(config: &WindowConfig) -> Self {
        Self {
            title: config.title.clone(),
            width: config.width,
            height: config.height,
        }
    }

    pub fn viewport(&self) -> egui::ViewportBuilder {
        egui::ViewportBuilder::default()
            .with_title(self.title.clone())
            .with_inner_size([self.width as f32, self.height as f32])
            .with_resizable(false)
            .with_drag_and_drop(true)
    }
}

impl WindowHandle for StartupWindow {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    // The first frame is drawn when the window opens.
    fn request_redraw(&mut self) {}
}

// ---------------------------------------------------------------------------
// Live egui viewport
// ---------------------------------------------------------------------------

/// Forwards window operations to the running egui viewport.
pub struct ViewportWindow<'a> {
    ctx: &'a egui::Context,
}

impl<'a> ViewportWindow<'a> {
    pub fn new(ctx: &'a egui::Context) -> Self {
        Self { ctx }
    }
}

impl WindowHandle for ViewportWindow<'_> {
    fn set_title(&mut self, title: &str) {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Title(title.to_string()));
    }

    fn set_size(&mut self, width: u32, height: u32) {
        let size = logical_size(width, height, self.ctx.pixels_per_point());
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::InnerSize(size));
    }

    fn request_redraw(&mut self) {
        self.ctx.request_repaint();
    }

    fn max_texture_side(&self) -> Option<usize> {
        Some(self.ctx.input(|i| i.max_texture_side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_window_records_the_last_load() {
        let mut window = StartupWindow::new(&WindowConfig::default());
        assert_eq!(window.title, "imgv");
        assert_eq!((window.width, window.height), (500, 500));

        window.set_title("a.ppm");
        window.set_size(3, 4);
        window.request_redraw();
        assert_eq!(window.title, "a.ppm");
        assert_eq!((window.width, window.height), (3, 4));
    }

    #[test]
    fn logical_size_divides_by_display_scale() {
        assert_eq!(logical_size(300, 200, 1.0), egui::vec2(300.0, 200.0));
        assert_eq!(logical_size(300, 200, 2.0), egui::vec2(150.0, 100.0));
        assert_eq!(logical_size(3, 3, 1.5), egui::vec2(2.0, 2.0));
    }

    #[test]
    fn viewport_window_sends_size_in_points() {
        let ctx = egui::Context::default();
        let mut raw = egui::RawInput::default();
        raw.viewports
            .entry(egui::ViewportId::ROOT)
            .or_default()
            .native_pixels_per_point = Some(2.0);

        let mut max_side = None;
        let output = ctx.run(raw, |ctx| {
            let mut window = ViewportWindow::new(ctx);
            window.set_size(640, 480);
            max_side = window.max_texture_side();
        });

        let commands = &output.viewport_output[&egui::ViewportId::ROOT].commands;
        assert!(commands.contains(&egui::ViewportCommand::InnerSize(egui::vec2(
            320.0, 240.0
        ))));
        assert!(max_side.is_some_and(|side| side > 0));
    }
}
