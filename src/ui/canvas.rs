use eframe::egui::{Color32, ColorImage, Rect, TextureHandle, TextureOptions, Ui, pos2};

use crate::controller::DisplaySession;
use crate::window::logical_size;

// ---------------------------------------------------------------------------
// Image canvas (central panel)
// ---------------------------------------------------------------------------

/// GPU copy of the displayed image, tagged with the session generation it
/// was uploaded from. `handle` is `None` when the image did not fit in a
/// texture; that generation is then drawn as background only.
pub struct CanvasTexture {
    generation: u64,
    handle: Option<TextureHandle>,
    painted: Rect,
}

impl CanvasTexture {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Texture size in pixels, if the upload happened.
    pub fn size(&self) -> Option<[usize; 2]> {
        self.handle.as_ref().map(TextureHandle::size)
    }

    /// Where the image went on the last frame, in points.
    pub fn painted(&self) -> Rect {
        self.painted
    }
}

/// Draw the current image at one texel per physical pixel from the top-left
/// corner, or the fallback background when nothing is loaded. An image
/// whose side exceeds the texture limit (only possible for the startup
/// load, which runs before the limit is known) is logged and not drawn.
///
/// The texture is re-uploaded whenever the session generation moved, so the
/// first frame after a replacement already shows the new image. The
/// previous texture is freed when its handle is dropped.
pub fn image_canvas(
    ui: &mut Ui,
    session: &DisplaySession,
    texture: &mut Option<CanvasTexture>,
    background: Color32,
) {
    let area = ui.max_rect();
    ui.painter().rect_filled(area, 0.0, background);

    let Some(image) = session.current() else {
        *texture = None;
        return;
    };

    let stale = texture
        .as_ref()
        .map_or(true, |t| t.generation != session.generation());
    if stale {
        // Drop the previous texture before allocating the next one.
        *texture = None;

        let max_side = ui.ctx().input(|i| i.max_texture_side);
        let handle = if image.size().iter().any(|side| *side > max_side) {
            log::error!(
                "{} is {}x{}, larger than the maximum texture side {max_side}; not drawing it",
                image.source_id(),
                image.width(),
                image.height()
            );
            None
        } else {
            log::debug!(
                "uploading texture for {} (generation {})",
                image.source_id(),
                session.generation()
            );
            let pixels = ColorImage::from_rgba_unmultiplied(image.size(), image.pixels());
            Some(
                ui.ctx()
                    .load_texture(image.source_id(), pixels, TextureOptions::NEAREST),
            )
        };
        *texture = Some(CanvasTexture {
            generation: session.generation(),
            handle,
            painted: Rect::NOTHING,
        });
    }

    if let Some(t) = texture {
        if let Some(handle) = &t.handle {
            // One texel per physical pixel.
            let size = logical_size(image.width(), image.height(), ui.ctx().pixels_per_point());
            let rect = Rect::from_min_size(area.min, size);
            let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
            ui.painter().image(handle.id(), rect, uv, Color32::WHITE);
            t.painted = rect;
        }
    }
}

pub fn background_color(rgb: [u8; 3]) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}
