pub const GALLERY_PATH_ENV: &str = "FILTER_STUDIO_GALLERY";
pub const EXPORT_DIR_ENV: &str = "FILTER_STUDIO_EXPORT_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub gallery_path: String,
    pub export_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gallery_path: "gallery.sqlite3".to_string(),
            export_dir: ".".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            gallery_path: non_empty(GALLERY_PATH_ENV).unwrap_or(defaults.gallery_path),
            export_dir: non_empty(EXPORT_DIR_ENV).unwrap_or(defaults.export_dir),
        }
    }
}
