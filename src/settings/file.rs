use super::SettingsStore;
use crate::models::UserPhoto;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk settings document. Keys match the local-storage keys used by the
/// browser extension (`falApiKey` / `userPhoto`).
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    fal_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_photo: Option<UserPhoto>,
}

pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    async fn load(&self) -> Result<SettingsDocument> {
        if !self.path.exists() {
            return Ok(SettingsDocument::default());
        }

        let contents = tokio::fs::read_to_string(&self.path).await?;
        serde_json::from_str(&contents).map_err(|e| {
            Error::Settings(format!(
                "Corrupt settings file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    async fn save(&self, document: &SettingsDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(document)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn api_key(&self) -> Result<Option<String>> {
        Ok(self.load().await?.fal_api_key)
    }

    async fn set_api_key(&self, key: &str) -> Result<()> {
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(Error::Settings("Please enter a valid API key".to_string()));
        }

        let mut document = self.load().await?;
        document.fal_api_key = Some(trimmed.to_string());
        self.save(&document).await
    }

    async fn user_photo(&self) -> Result<Option<UserPhoto>> {
        Ok(self.load().await?.user_photo)
    }

    async fn set_user_photo(&self, photo: &UserPhoto) -> Result<()> {
        let mut document = self.load().await?;
        document.user_photo = Some(photo.clone());
        self.save(&document).await
    }

    async fn remove_user_photo(&self) -> Result<()> {
        let mut document = self.load().await?;
        document.user_photo = None;
        self.save(&document).await
    }
}
