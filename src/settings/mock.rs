use super::SettingsStore;
use crate::models::UserPhoto;
use crate::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockSettingsStore {
    api_key: Arc<Mutex<Option<String>>>,
    user_photo: Arc<Mutex<Option<UserPhoto>>>,
    read_count: Arc<Mutex<usize>>,
}

impl MockSettingsStore {
    pub fn new() -> Self {
        Self {
            api_key: Arc::new(Mutex::new(None)),
            user_photo: Arc::new(Mutex::new(None)),
            read_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_api_key(self, key: String) -> Self {
        *self.api_key.lock().unwrap() = Some(key);
        self
    }

    pub fn with_user_photo(self, photo: UserPhoto) -> Self {
        *self.user_photo.lock().unwrap() = Some(photo);
        self
    }

    pub fn get_read_count(&self) -> usize {
        *self.read_count.lock().unwrap()
    }
}

impl Default for MockSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsStore for MockSettingsStore {
    async fn api_key(&self) -> Result<Option<String>> {
        *self.read_count.lock().unwrap() += 1;
        Ok(self.api_key.lock().unwrap().clone())
    }

    async fn set_api_key(&self, key: &str) -> Result<()> {
        *self.api_key.lock().unwrap() = Some(key.trim().to_string());
        Ok(())
    }

    async fn user_photo(&self) -> Result<Option<UserPhoto>> {
        *self.read_count.lock().unwrap() += 1;
        Ok(self.user_photo.lock().unwrap().clone())
    }

    async fn set_user_photo(&self, photo: &UserPhoto) -> Result<()> {
        *self.user_photo.lock().unwrap() = Some(photo.clone());
        Ok(())
    }

    async fn remove_user_photo(&self) -> Result<()> {
        *self.user_photo.lock().unwrap() = None;
        Ok(())
    }
}
