//! Virtual try-on toolkit - overlays a user photo onto clothing images
//!
//! Wraps the Fal AI queue API in a typed generation client, persists the user
//! photo and API key in a local settings store, and routes trigger events to
//! generation outcomes the way the companion browser extension does.

pub mod app;
pub mod error;
pub mod fal;
pub mod models;
pub mod photo;
pub mod prompts;
pub mod router;
pub mod settings;

pub use error::{Error, Result};
