//! Virtual Try-On Studio
//!
//! A native desktop app for a two-phase virtual try-on workflow: garments
//! are composited onto a model photo by a generative image service, one
//! sequential batch of combinations at a time, then a chosen result is
//! styled with accessories. The workflow core lives in [`state`]; external
//! collaborators (the generation API, file uploads, downloads) live in
//! [`services`].

pub mod app;
pub mod config;
pub mod services;
pub mod state;
pub mod ui;
