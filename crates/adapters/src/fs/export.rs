use std::fs;
use std::path::PathBuf;

use filter_studio_application::{ApplicationError, ExportSink};

/// Writes exported images into a download directory.
#[derive(Debug, Clone)]
pub struct FsExportSink {
    dir: PathBuf,
}

impl FsExportSink {
    pub fn new(dir: String) -> Self {
        Self {
            dir: PathBuf::from(dir),
        }
    }
}

impl ExportSink for FsExportSink {
    fn offer(&self, file_name: &str, bytes: &[u8]) -> Result<String, ApplicationError> {
        if file_name.trim().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "export file name must not be empty".to_string(),
            ));
        }
        if !self.dir.as_os_str().is_empty() {
            fs::create_dir_all(&self.dir).map_err(|error| ApplicationError::Io(error.to_string()))?;
        }

        let target = self.dir.join(file_name);
        fs::write(&target, bytes).map_err(|error| ApplicationError::Io(error.to_string()))?;
        Ok(target.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_file_into_export_dir() {
        let dir = TempDir::new().expect("tempdir");
        let out_dir = dir.path().join("downloads");
        let sink = FsExportSink::new(out_dir.to_string_lossy().to_string());

        let location = sink
            .offer("edited-image.png", &[1, 2, 3])
            .expect("offer");
        assert_eq!(PathBuf::from(&location), out_dir.join("edited-image.png"));
        assert_eq!(fs::read(location).expect("read"), vec![1, 2, 3]);
    }

    #[test]
    fn later_export_overwrites_earlier_one() {
        let dir = TempDir::new().expect("tempdir");
        let sink = FsExportSink::new(dir.path().to_string_lossy().to_string());
        sink.offer("edited-image.png", &[1]).expect("first");
        let location = sink.offer("edited-image.png", &[2, 2]).expect("second");
        assert_eq!(fs::read(location).expect("read"), vec![2, 2]);
    }
}
