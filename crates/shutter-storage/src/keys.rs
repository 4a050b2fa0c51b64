//! Shared key derivation for storage backends.
//!
//! Naming rule: the blob name is `{imageId}.jpg` in both containers, so the
//! image ID is the only correlation key between the raw upload and the
//! processed result. The extension is fixed regardless of the declared
//! content type.
//!
//! The image ID is treated as an opaque path segment here; backends reject
//! keys that would escape their root (`..`, leading `/`).

/// Blob name for an image: `{imageId}.jpg`.
pub fn blob_name(image_id: &str) -> String {
    format!("{}.jpg", image_id)
}

/// Full storage key for a blob within a container: `{container}/{imageId}.jpg`.
///
/// All backends must use this format for consistency.
pub fn object_key(container: &str, image_id: &str) -> String {
    format!("{}/{}.jpg", container, image_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_blob_name_is_id_plus_jpg() {
        let id = Uuid::new_v4().to_string();
        assert_eq!(blob_name(&id), format!("{}.jpg", id));
    }

    #[test]
    fn test_object_key_is_container_scoped() {
        let id = Uuid::new_v4().to_string();
        assert_eq!(object_key("raw", &id), format!("raw/{}.jpg", id));
        assert_eq!(
            object_key("processed", &id),
            format!("processed/{}.jpg", id)
        );
    }

    #[test]
    fn test_raw_and_processed_share_blob_name() {
        let id = Uuid::new_v4().to_string();
        let raw = object_key("raw", &id);
        let processed = object_key("processed", &id);
        assert_eq!(raw.split('/').next_back(), processed.split('/').next_back());
    }
}
