//! Persisted user settings
//!
//! A narrow read/write interface over the two values the extension keeps in
//! local storage: the Fal AI API key and the user's photo. Settings are read,
//! never written, while a generation is in flight.

pub mod file;
pub mod mock;

pub use file::FileSettingsStore;
pub use mock::MockSettingsStore;

use crate::models::UserPhoto;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn api_key(&self) -> Result<Option<String>>;
    async fn set_api_key(&self, key: &str) -> Result<()>;
    async fn user_photo(&self) -> Result<Option<UserPhoto>>;
    async fn set_user_photo(&self, photo: &UserPhoto) -> Result<()>;
    async fn remove_user_photo(&self) -> Result<()>;
}
