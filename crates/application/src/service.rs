use filter_studio_domain::{find_preset, Bitmap, FilterParameter, GalleryEntry, ParameterName};

use crate::events::{EventBus, EventHandler, SessionEvent, SessionEventKind};
use crate::session::{EditingSession, SessionState};
use crate::{
    ApplicationError, ApplyPresetCommand, BootstrapGalleryCommand, Clock, DecodeQueue,
    DownloadCommand, ExportCommand, ExportSink, FilterRenderer, GalleryStore, ImageDecoder,
    ImageEncoder, ListGalleryQuery, LoadImageCommand, PollImageCommand, ResetCommand, SaveCommand,
    SetParameterCommand, ShowParameterQuery, SubmitImageCommand,
};

pub const EXPORT_FILE_NAME: &str = "edited-image.png";

pub struct EditorService {
    decoder: Box<dyn ImageDecoder>,
    decode_queue: Box<dyn DecodeQueue>,
    renderer: Box<dyn FilterRenderer>,
    encoder: Box<dyn ImageEncoder>,
    gallery: Box<dyn GalleryStore>,
    exporter: Box<dyn ExportSink>,
    clock: Box<dyn Clock>,
    events: EventBus,
}

impl EditorService {
    pub fn new(
        decoder: Box<dyn ImageDecoder>,
        decode_queue: Box<dyn DecodeQueue>,
        renderer: Box<dyn FilterRenderer>,
        encoder: Box<dyn ImageEncoder>,
        gallery: Box<dyn GalleryStore>,
        exporter: Box<dyn ExportSink>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            decoder,
            decode_queue,
            renderer,
            encoder,
            gallery,
            exporter,
            clock,
            events: EventBus::default(),
        }
    }

    pub fn subscribe(&mut self, kind: SessionEventKind, handler: EventHandler) {
        self.events.subscribe(kind, handler);
    }

    pub fn bootstrap_gallery(
        &self,
        _command: BootstrapGalleryCommand,
    ) -> Result<(), ApplicationError> {
        self.gallery.initialize()
    }

    /// Decodes on the calling thread and installs the image. A failed decode leaves the
    /// session untouched.
    pub fn load_image(
        &self,
        session: &mut EditingSession,
        command: LoadImageCommand,
    ) -> Result<(u32, u32), ApplicationError> {
        let image = self.decoder.decode(&command.bytes)?;
        Ok(self.install_image(session, image))
    }

    pub fn submit_image(&self, command: SubmitImageCommand) -> Result<u64, ApplicationError> {
        if command.bytes.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "image file must not be empty".to_string(),
            ));
        }
        self.decode_queue.submit(command.bytes)
    }

    /// Installs the newest finished background decode, if any. Image swap and first render
    /// happen together in this call.
    pub fn poll_image(
        &self,
        session: &mut EditingSession,
        _command: PollImageCommand,
    ) -> Result<Option<(u32, u32)>, ApplicationError> {
        let Some(decoded) = self.decode_queue.try_receive()? else {
            return Ok(None);
        };
        let image = decoded.image?;
        log::debug!("background decode #{} finished", decoded.sequence);
        Ok(Some(self.install_image(session, image)))
    }

    fn install_image(&self, session: &mut EditingSession, image: Bitmap) -> (u32, u32) {
        let (width, height) = (image.width(), image.height());
        session.attach_image(image);
        self.render(session);
        self.events.dispatch(&SessionEvent::ImageLoaded { width, height });
        (width, height)
    }

    pub fn show_parameter(
        &self,
        session: &EditingSession,
        query: ShowParameterQuery,
    ) -> Result<FilterParameter, ApplicationError> {
        Ok(*session.filters().lookup(&query.name)?)
    }

    /// Stores the clamped value, re-renders, and returns what was stored.
    pub fn set_parameter(
        &self,
        session: &mut EditingSession,
        command: SetParameterCommand,
    ) -> Result<f32, ApplicationError> {
        let name = command.name.parse::<ParameterName>()?;
        let stored = session.filters_mut().set(name, command.value)?;
        self.render(session);
        self.events
            .dispatch(&SessionEvent::ParameterChanged { name, value: stored });
        Ok(stored)
    }

    /// Applies all preset values, then renders exactly once.
    pub fn apply_preset(
        &self,
        session: &mut EditingSession,
        command: ApplyPresetCommand,
    ) -> Result<(), ApplicationError> {
        let preset = find_preset(&command.name)?;
        session.filters_mut().apply_preset(preset)?;
        self.render(session);
        self.events.dispatch(&SessionEvent::PresetApplied {
            preset: preset.name,
        });
        Ok(())
    }

    /// Redraws the surface from the loaded image and current filters. Does nothing while no
    /// image is loaded.
    pub fn render(&self, session: &mut EditingSession) {
        let Some(image) = session.image() else {
            return;
        };
        let composition = session.filters().composition();
        log::debug!(
            "render {}x{} with filter: {composition}",
            image.width(),
            image.height()
        );
        let frame = self.renderer.render(image, &composition);
        session.present(frame);
    }

    /// Encodes exactly what the surface currently shows.
    pub fn export(
        &self,
        session: &EditingSession,
        _command: ExportCommand,
    ) -> Result<Vec<u8>, ApplicationError> {
        let frame = session.surface().content().ok_or_else(|| {
            ApplicationError::InvalidInput("no image loaded; nothing to export".to_string())
        })?;
        self.encoder.encode_png(frame)
    }

    pub fn download(
        &self,
        session: &EditingSession,
        _command: DownloadCommand,
    ) -> Result<String, ApplicationError> {
        let blob = self.export(session, ExportCommand)?;
        let location = self.exporter.offer(EXPORT_FILE_NAME, &blob)?;
        log::info!("exported {} bytes to {location}", blob.len());
        Ok(location)
    }

    /// Appends the current result to the gallery, then clears the session. On any failure the
    /// session is left exactly as it was, and an unreadable gallery is never overwritten.
    pub fn save(
        &self,
        session: &mut EditingSession,
        _command: SaveCommand,
    ) -> Result<usize, ApplicationError> {
        if session.state() == SessionState::Empty {
            return Err(ApplicationError::InvalidInput(
                "no image loaded; nothing to save".to_string(),
            ));
        }
        let entry = GalleryEntry {
            rendered_image: self.export(session, ExportCommand)?,
            filters: session.filters().clone(),
            saved_at: Some(self.clock.now_timestamp_string()),
        };
        let gallery_len = self.gallery.append(&entry)?;

        log::info!("saved edit, gallery now holds {gallery_len} entries");
        session.clear();
        self.events.dispatch(&SessionEvent::Saved { gallery_len });
        Ok(gallery_len)
    }

    pub fn reset(&self, session: &mut EditingSession, _command: ResetCommand) {
        session.clear();
        self.events.dispatch(&SessionEvent::Reset);
    }

    /// Unreadable gallery data is treated as an empty gallery.
    pub fn list_gallery(&self, _query: ListGalleryQuery) -> Vec<GalleryEntry> {
        match self.gallery.load() {
            Ok(entries) => entries,
            Err(error) => {
                log::warn!("ignoring unreadable gallery: {error}");
                Vec::new()
            }
        }
    }
}
