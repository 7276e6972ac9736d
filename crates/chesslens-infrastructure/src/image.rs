//! Loading capture images from disk.

use chesslens_core::capture::ImageUpload;
use chesslens_core::{LensError, Result};
use std::path::Path;
use tracing::debug;

/// Infers the MIME type from a filename extension using `mime_guess`.
fn infer_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}

/// Reads an image file into an [`ImageUpload`].
///
/// The content type comes from the extension. Non-image files are still
/// loaded; the capture workflow rejects them before prediction.
pub async fn load_image(path: impl AsRef<Path>) -> Result<ImageUpload> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| LensError::io(format!("Failed to read {}: {e}", path.display())))?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let content_type = infer_mime_type(path);
    debug!(file = %file_name, %content_type, bytes = bytes.len(), "Image loaded");

    Ok(ImageUpload::new(file_name, content_type, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_png_guesses_type() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("board.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let image = load_image(&path).await.unwrap();

        assert_eq!(image.file_name, "board.png");
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.len(), 4);
        assert!(image.is_image());
    }

    #[tokio::test]
    async fn test_load_text_file_is_not_an_image() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        std::fs::write(&path, "1. e4 e5").unwrap();

        let image = load_image(&path).await.unwrap();

        assert!(!image.is_image());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();

        let err = load_image(temp_dir.path().join("missing.jpg"))
            .await
            .unwrap_err();

        assert!(matches!(err, LensError::Io { .. }));
    }
}
