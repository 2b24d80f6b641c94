use filter_studio_domain::{Bitmap, FilterComposition, GalleryEntry};

use crate::ApplicationError;

pub trait ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Bitmap, ApplicationError>;
}

/// Result of a background decode, tagged with the submission it answers.
#[derive(Debug)]
pub struct DecodedImage {
    pub sequence: u64,
    pub image: Result<Bitmap, ApplicationError>,
}

/// Decodes off the editing thread; only the newest submission is ever delivered.
pub trait DecodeQueue {
    fn submit(&self, bytes: Vec<u8>) -> Result<u64, ApplicationError>;

    fn try_receive(&self) -> Result<Option<DecodedImage>, ApplicationError>;
}

pub trait FilterRenderer {
    /// Applies every effect of `composition`, in order, to a copy of `source`.
    fn render(&self, source: &Bitmap, composition: &FilterComposition) -> Bitmap;
}

pub trait ImageEncoder {
    fn encode_png(&self, bitmap: &Bitmap) -> Result<Vec<u8>, ApplicationError>;
}

pub trait GalleryStore {
    fn initialize(&self) -> Result<(), ApplicationError>;

    /// Returns an empty list when nothing was stored yet. Entries that cannot be read are
    /// skipped, not dropped from storage.
    fn load(&self) -> Result<Vec<GalleryEntry>, ApplicationError>;

    /// Reads the stored collection, pushes `entry` and writes the whole collection back.
    /// Stored entries are kept even when `load` skips them. Fails without writing when the
    /// stored collection cannot be read at all. Returns the new number of stored entries.
    fn append(&self, entry: &GalleryEntry) -> Result<usize, ApplicationError>;
}

pub trait ExportSink {
    /// Hands `bytes` to the user under `file_name`; returns where it ended up.
    fn offer(&self, file_name: &str, bytes: &[u8]) -> Result<String, ApplicationError>;
}

pub trait Clock {
    fn now_timestamp_string(&self) -> String;
}
