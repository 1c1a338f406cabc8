use eframe::egui::{self, Color32};

use crate::config::ViewerConfig;
use crate::controller::{DisplayController, DisplaySession};
use crate::ui::canvas::{self, CanvasTexture};
use crate::ui::input::{self, Request};
use crate::window::{ViewportWindow, WindowHandle};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ImgvApp {
    session: DisplaySession,
    controller: DisplayController,
    background: Color32,
    texture: Option<CanvasTexture>,
    /// The startup size was given in pixels; it is resent in points once.
    size_synced: bool,
}

impl ImgvApp {
    /// `session` may already hold an image loaded before the window opened.
    pub fn new(session: DisplaySession, config: &ViewerConfig) -> Self {
        Self {
            session,
            controller: DisplayController::new(config.decode_options()),
            background: canvas::background_color(config.window.background),
            texture: None,
            size_synced: false,
        }
    }

    pub fn session(&self) -> &DisplaySession {
        &self.session
    }

    pub fn texture(&self) -> Option<&CanvasTexture> {
        self.texture.as_ref()
    }

    /// One frame: apply input, then paint.
    pub fn ui(&mut self, ctx: &egui::Context) {
        if !self.size_synced {
            if let Some(image) = self.session.current() {
                ViewportWindow::new(ctx).set_size(image.width(), image.height());
            }
            self.size_synced = true;
        }

        for request in input::requests(ctx) {
            match request {
                Request::Quit => {
                    log::debug!("quit requested");
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
                Request::Open(path) => {
                    self.controller
                        .load(&mut self.session, &path, &mut ViewportWindow::new(ctx));
                }
                Request::ShowOpenDialog => {
                    if let Some(path) = input::pick_image_file() {
                        self.controller
                            .load(&mut self.session, &path, &mut ViewportWindow::new(ctx));
                    }
                }
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(self.background))
            .show(ctx, |ui| {
                canvas::image_canvas(ui, &self.session, &mut self.texture, self.background);
            });
    }
}

impl eframe::App for ImgvApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}
