mod clock;
mod export;

pub use clock::SystemClock;
pub use export::FsExportSink;
