use serde::{Deserialize, Serialize};

use crate::FilterState;

/// A saved edit: the encoded output image plus the filters that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryEntry {
    #[serde(rename = "image", with = "hex::serde")]
    pub rendered_image: Vec<u8>,
    pub filters: FilterState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParameterName;

    #[test]
    fn image_bytes_are_stored_as_hex() {
        let mut filters = FilterState::default();
        filters.set(ParameterName::Sepia, 25.0).expect("set");
        let entry = GalleryEntry {
            rendered_image: vec![0x89, 0x50, 0x4e, 0x47],
            filters,
            saved_at: Some("1700000000".to_string()),
        };

        let json = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(json["image"], "89504e47");
        assert_eq!(json["savedAt"], "1700000000");
        assert_eq!(json["filters"]["sepia"]["value"], 25.0);
    }

    #[test]
    fn entries_without_timestamp_still_load() {
        let filters = serde_json::to_string(&FilterState::default()).expect("filters");
        let json = format!(r#"{{"image":"00ff","filters":{filters}}}"#);
        let entry: GalleryEntry = serde_json::from_str(&json).expect("parse");
        assert_eq!(entry.rendered_image, vec![0x00, 0xff]);
        assert_eq!(entry.saved_at, None);
        assert!(entry.filters.is_neutral());
    }
}
