use crate::ppm::DecodedImage;

// ---------------------------------------------------------------------------
// ImageResource – the single live image
// ---------------------------------------------------------------------------

/// Owns at most one [`DecodedImage`].
///
/// Replacement hands the previous image back to the caller, who releases it
/// after the swap. `generation` moves on every replacement so renderers can
/// tell that their uploaded copy is stale.
#[derive(Debug, Default)]
pub struct ImageResource {
    current: Option<DecodedImage>,
    generation: u64,
}

impl ImageResource {
    pub fn new() -> Self {
        Self::default()
    }

    /// The image on display, if any load has succeeded yet.
    pub fn current(&self) -> Option<&DecodedImage> {
        self.current.as_ref()
    }

    /// Bumped by every [`replace`](Self::replace); starts at 0 (nothing loaded).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Install `image` and return the one it displaced.
    #[must_use = "the displaced image should be passed to `release`"]
    pub fn replace(&mut self, image: DecodedImage) -> Option<DecodedImage> {
        self.generation += 1;
        self.current.replace(image)
    }

    /// Free a displaced image. Taking it by value makes a second release impossible.
    pub fn release(&mut self, image: DecodedImage) {
        log::trace!(
            "releasing {} ({} bytes)",
            image.source_id(),
            image.pixels().len()
        );
        drop(image);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str, rgb: [u8; 3]) -> DecodedImage {
        DecodedImage::from_rgb(name, 1, 1, 255, &rgb).unwrap()
    }

    #[test]
    fn starts_empty() {
        let res = ImageResource::new();
        assert!(res.current().is_none());
        assert_eq!(res.generation(), 0);
    }

    #[test]
    fn replace_returns_previous_image() {
        let mut res = ImageResource::new();
        assert!(res.replace(image("a", [1, 1, 1])).is_none());

        let old = res.replace(image("b", [2, 2, 2])).unwrap();
        assert_eq!(old.source_id(), "a");
        res.release(old);

        let current = res.current().unwrap();
        assert_eq!(current.source_id(), "b");
        assert_eq!(current.rgb_at(0, 0), Some([2, 2, 2]));
        assert_eq!(res.generation(), 2);
    }
}
