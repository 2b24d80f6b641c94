use filter_studio_domain::{Bitmap, FilterState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Editing,
}

/// The drawing target shown to the user. It keeps its size across clears, like a canvas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    content: Option<Bitmap>,
}

impl PixelSurface {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn content(&self) -> Option<&Bitmap> {
        self.content.as_ref()
    }

    pub fn is_blank(&self) -> bool {
        self.content.is_none()
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.content = None;
    }

    pub(crate) fn draw(&mut self, frame: Bitmap) {
        self.width = frame.width();
        self.height = frame.height();
        self.content = Some(frame);
    }

    pub(crate) fn clear(&mut self) {
        self.content = None;
    }
}

/// Everything that belongs to the image currently being edited.
#[derive(Debug, Default)]
pub struct EditingSession {
    filters: FilterState,
    image: Option<Bitmap>,
    surface: PixelSurface,
    dirty: bool,
}

impl EditingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        if self.image.is_some() {
            SessionState::Editing
        } else {
            SessionState::Empty
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn image(&self) -> Option<&Bitmap> {
        self.image.as_ref()
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    /// Set when the filters changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn filters_mut(&mut self) -> &mut FilterState {
        self.dirty = true;
        &mut self.filters
    }

    /// Replaces the image wholesale. Filter values are kept.
    pub(crate) fn attach_image(&mut self, image: Bitmap) {
        self.surface.resize(image.width(), image.height());
        self.image = Some(image);
        self.dirty = true;
    }

    pub(crate) fn present(&mut self, frame: Bitmap) {
        self.surface.draw(frame);
        self.dirty = false;
    }

    /// Back to `Empty`: drop the image, restore default filters, blank the surface.
    pub(crate) fn clear(&mut self) {
        self.image = None;
        self.filters.reset_all();
        self.surface.clear();
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use filter_studio_domain::ParameterName;

    use super::*;

    #[test]
    fn new_session_is_empty_with_default_filters() {
        let session = EditingSession::new();
        assert_eq!(session.state(), SessionState::Empty);
        assert!(session.filters().is_neutral());
        assert!(session.surface().is_blank());
    }

    #[test]
    fn attaching_image_resizes_surface_and_keeps_filters() {
        let mut session = EditingSession::new();
        session
            .filters_mut()
            .set(ParameterName::Contrast, 140.0)
            .expect("set");

        session.attach_image(Bitmap::filled(7, 3, [1, 2, 3, 255]).expect("bitmap"));
        assert_eq!(session.state(), SessionState::Editing);
        assert_eq!(
            (session.surface().width(), session.surface().height()),
            (7, 3)
        );
        assert!(session.surface().is_blank());
        assert_eq!(session.filters().get(ParameterName::Contrast).value, 140.0);
    }

    #[test]
    fn clear_returns_to_empty() {
        let mut session = EditingSession::new();
        let image = Bitmap::filled(2, 2, [9, 9, 9, 255]).expect("bitmap");
        session.attach_image(image.clone());
        session.present(image);
        session
            .filters_mut()
            .set(ParameterName::Sepia, 50.0)
            .expect("set");

        session.clear();
        assert_eq!(session.state(), SessionState::Empty);
        assert!(session.filters().is_neutral());
        assert!(session.surface().is_blank());
        assert!(!session.is_dirty());
    }
}
