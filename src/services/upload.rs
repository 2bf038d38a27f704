/// Image file uploader
///
/// Turns a file the user picked into an `ImageBlob` plus a display name.
/// The bytes are kept exactly as read; only the format is sniffed (via the
/// image crate) to obtain the MIME type and reject non-image files before
/// they reach the registry.

use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::state::wardrobe::ImageBlob;

/// Formats the pickers offer and the uploader accepts.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// A successfully converted upload, ready to append to the registry.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Display name, taken from the file stem
    pub name: String,
    pub blob: ImageBlob,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Could not read the file: {0}")]
    Io(#[from] std::io::Error),

    #[error("The file is not a recognized image format")]
    UnrecognizedFormat,

    #[error("{0} images are not supported here")]
    UnsupportedFormat(&'static str),
}

/// Read an image file and sniff its format.
pub async fn load_image(path: PathBuf) -> Result<UploadedImage, UploadError> {
    let bytes = tokio::fs::read(&path).await?;

    let format = image::guess_format(&bytes).map_err(|_| UploadError::UnrecognizedFormat)?;
    let mime_type = match format {
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP => format.to_mime_type(),
        other => {
            return Err(UploadError::UnsupportedFormat(
                other.extensions_str().first().copied().unwrap_or("unknown"),
            ))
        }
    };

    let name = display_name(&path);
    tracing::debug!(name = %name, mime_type, size = bytes.len(), "image loaded");

    Ok(UploadedImage {
        name,
        blob: ImageBlob::new(bytes, mime_type),
    })
}

/// Display name for an uploaded file: the file stem, or the whole file
/// name if there is no stem.
fn display_name(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "untitled".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_an_io_error() {
        let result = load_image(PathBuf::from("/nonexistent/shirt.png")).await;
        assert!(matches!(result, Err(UploadError::Io(_))));
    }

    #[tokio::test]
    async fn test_non_image_bytes_are_rejected() {
        let dir = std::env::temp_dir();
        let path = dir.join("tryon_studio_upload_test.txt");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let result = load_image(path.clone()).await;
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(UploadError::UnrecognizedFormat)));
    }

    #[tokio::test]
    async fn test_png_bytes_produce_blob_and_stem_name() {
        // Minimal PNG header is enough for format sniffing
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0; 16]);

        let dir = std::env::temp_dir();
        let path = dir.join("white tee.png");
        std::fs::write(&path, &bytes).unwrap();

        let uploaded = load_image(path.clone()).await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(uploaded.name, "white tee");
        assert_eq!(uploaded.blob.mime_type, "image/png");
        assert_eq!(uploaded.blob.bytes, bytes);
    }

    #[test]
    fn test_display_name_falls_back_to_file_name() {
        assert_eq!(display_name(Path::new("/a/b/jeans.jpeg")), "jeans");
        assert_eq!(display_name(Path::new(".profile")), ".profile");
    }
}
