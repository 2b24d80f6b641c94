mod bitmap;
mod composition;
mod error;
mod filter_state;
mod gallery;
mod parameter;
mod preset;

pub use bitmap::{Bitmap, BYTES_PER_PIXEL};
pub use composition::{FilterComposition, FilterEffect, COMPOSITION_ORDER};
pub use error::DomainError;
pub use filter_state::FilterState;
pub use gallery::GalleryEntry;
pub use parameter::{FilterParameter, ParameterName, Unit};
pub use preset::{find_preset, Preset, PRESETS};
