/// Result image export
///
/// Saves a successful job record's image to disk. File names are built
/// from the constituent item names: lower-cased, non-alphanumerics
/// replaced with underscores, joined with dashes behind an `outfit-`
/// prefix, with the extension taken from the image's MIME type.

use std::path::PathBuf;

use crate::state::combos::WorkItem;
use crate::state::wardrobe::ImageBlob;

/// Default directory offered by the save dialog.
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Suggested file name for a generated look, e.g.
/// `outfit-white_tee-blue_jeans.png`.
pub fn artifact_file_name(work: &WorkItem, image: &ImageBlob) -> String {
    let names: Vec<String> = work.item_names().iter().map(|name| sanitize(name)).collect();
    format!("outfit-{}.{}", names.join("-"), extension_for(&image.mime_type))
}

/// Write the image bytes to the chosen path.
pub async fn save_image(path: PathBuf, image: ImageBlob) -> Result<PathBuf, String> {
    tokio::fs::write(&path, &image.bytes)
        .await
        .map_err(|e| format!("Could not save {}: {}", path.display(), e))?;

    tracing::info!(path = %path.display(), size = image.bytes.len(), "result saved");
    Ok(path)
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        // The service returns PNG unless told otherwise
        _ => "png",
    }
}
