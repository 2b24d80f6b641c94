mod error;
mod events;
mod ports;
mod service;
mod session;
mod use_cases;

pub use error::ApplicationError;
pub use events::{EventBus, EventHandler, SessionEvent, SessionEventKind};
pub use ports::{
    Clock, DecodeQueue, DecodedImage, ExportSink, FilterRenderer, GalleryStore, ImageDecoder,
    ImageEncoder,
};
pub use service::{EditorService, EXPORT_FILE_NAME};
pub use session::{EditingSession, PixelSurface, SessionState};
pub use use_cases::{
    ApplyPresetCommand, BootstrapGalleryCommand, DownloadCommand, ExportCommand,
    ListGalleryQuery, LoadImageCommand, PollImageCommand, ResetCommand, SaveCommand,
    SetParameterCommand, ShowParameterQuery, SubmitImageCommand,
};
