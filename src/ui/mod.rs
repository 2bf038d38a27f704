/// Presentation widgets
///
/// Pure view code: these modules read the session state and emit
/// `Message` intents, nothing else.

pub mod gallery;
pub mod wardrobe;
