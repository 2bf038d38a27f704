/// External collaborators consumed by the core
///
/// - gemini.rs: the image generation service client
/// - upload.rs: file-to-image-blob conversion for user picks
/// - export.rs: saving result images to disk

pub mod export;
pub mod gemini;
pub mod upload;
