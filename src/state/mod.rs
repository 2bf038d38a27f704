/// State management module
///
/// This module holds the whole try-on workflow as plain data with
/// synchronous transitions:
/// - Item registry and image blobs (wardrobe.rs)
/// - Combination builder for generation batches (combos.rs)
/// - Sequential job runner state (jobs.rs)
/// - Phase controller and the top-level session store (session.rs)

pub mod combos;
pub mod jobs;
pub mod session;
pub mod wardrobe;
