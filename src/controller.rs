use std::path::Path;

use thiserror::Error;

use crate::ppm::{self, DecodeError, DecodeOptions, DecodedImage};
use crate::resource::ImageResource;
use crate::window::WindowHandle;

// ---------------------------------------------------------------------------
// Display session
// ---------------------------------------------------------------------------

/// What the viewer is showing. One per process, owned by the app.
#[derive(Debug, Default)]
pub struct DisplaySession {
    resource: ImageResource,
}

impl DisplaySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&DecodedImage> {
        self.resource.current()
    }

    /// See [`ImageResource::generation`].
    pub fn generation(&self) -> u64 {
        self.resource.generation()
    }
}

// ---------------------------------------------------------------------------
// Display controller
// ---------------------------------------------------------------------------

/// Why a load left the display unchanged.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The image decoded but the renderer cannot hold it as one texture.
    #[error("{width}x{height} image exceeds the renderer's maximum texture side of {max_side}")]
    TooLargeForDisplay { width: u32, height: u32, max_side: usize },
}

/// Turns "show this file" requests into decode + swap + window updates.
#[derive(Debug, Clone, Default)]
pub struct DisplayController {
    options: DecodeOptions,
}

impl DisplayController {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode `path` and, if that works, make it the displayed image.
    ///
    /// A failed load is logged and leaves both the session and the window
    /// untouched. Returns whether the image was replaced.
    pub fn load(
        &self,
        session: &mut DisplaySession,
        path: &Path,
        window: &mut dyn WindowHandle,
    ) -> bool {
        match self.try_load(session, path, window) {
            Ok(()) => true,
            Err(e) => {
                let e = anyhow::Error::new(e);
                log::error!("Failed to load {}: {e:#}", path.display());
                false
            }
        }
    }

    /// [`load`](Self::load) with the failure reason instead of a log line.
    pub fn try_load(
        &self,
        session: &mut DisplaySession,
        path: &Path,
        window: &mut dyn WindowHandle,
    ) -> Result<(), LoadError> {
        let image = ppm::decode(path, &self.options)?;

        if let Some(max_side) = window.max_texture_side() {
            let longest = image.width().max(image.height());
            if usize::try_from(longest).map_or(true, |side| side > max_side) {
                return Err(LoadError::TooLargeForDisplay {
                    width: image.width(),
                    height: image.height(),
                    max_side,
                });
            }
        }

        log::info!("Loaded {}", image.summary());

        if let Some(old) = session.resource.replace(image) {
            session.resource.release(old);
        }

        // `replace` just succeeded, so there is a current image.
        if let Some(current) = session.resource.current() {
            window.set_title(current.source_id());
            window.set_size(current.width(), current.height());
        }
        window.request_redraw();
        Ok(())
    }
}
