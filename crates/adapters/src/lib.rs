pub mod decode;
pub mod filters;
pub mod fs;
pub mod migrations;
pub mod presenters;
pub mod sqlite;

pub use decode::BackgroundDecodeQueue;
pub use filters::CpuFilterRenderer;
pub use fs::{FsExportSink, SystemClock};
pub use presenters::{
    present_gallery_row, present_parameter_row, present_preset_row, present_session_title,
};
pub use sqlite::SqliteGalleryStore;

use filter_studio_application::{ApplicationError, ImageDecoder, ImageEncoder};
use filter_studio_domain::Bitmap;
use image::codecs::png::PngEncoder;
use image::ColorType;

#[derive(Debug, Default)]
pub struct ImageCrateDecoder;

impl ImageDecoder for ImageCrateDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Bitmap, ApplicationError> {
        let image = image::load_from_memory(bytes)
            .map_err(|error| ApplicationError::Decode(error.to_string()))?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Bitmap::new(width, height, rgba.into_raw())
            .map_err(|error| ApplicationError::Decode(error.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct PngImageEncoder;

impl ImageEncoder for PngImageEncoder {
    fn encode_png(&self, bitmap: &Bitmap) -> Result<Vec<u8>, ApplicationError> {
        use image::ImageEncoder as _;

        let mut encoded = Vec::new();
        PngEncoder::new(&mut encoded)
            .write_image(
                bitmap.pixels(),
                bitmap.width(),
                bitmap.height(),
                ColorType::Rgba8,
            )
            .map_err(|error| ApplicationError::Encode(error.to_string()))?;
        Ok(encoded)
    }
}
