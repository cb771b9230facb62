//! Application orchestration for the virtual try-on CLI surfaces.

use crate::fal::{FalClient, TryOnService};
use crate::models::{Config, UserPhoto};
use crate::router::{Router, RouterRequest, RouterResponse, TriggerEvent};
use crate::settings::{FileSettingsStore, SettingsStore};
use crate::{Error, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::info;

/// Wires the settings store and generation client to the CLI commands that
/// stand in for the extension's popup and context-menu surfaces.
pub struct App {
    settings: Arc<dyn SettingsStore>,
    tryon: Arc<dyn TryOnService>,
    fallback_api_key: Option<String>,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub settings: Arc<dyn SettingsStore>,
    pub tryon: Arc<dyn TryOnService>,
    pub fallback_api_key: Option<String>,
}

impl App {
    /// Build an app from concrete service dependencies.
    pub fn with_services(services: AppServices) -> Self {
        Self {
            settings: services.settings,
            tryon: services.tryon,
            fallback_api_key: services.fallback_api_key,
        }
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    pub fn new() -> Self {
        let config = Config::from_env();

        let settings = Arc::new(FileSettingsStore::new(Path::new(&config.settings_path)));
        let tryon = Arc::new(FalClient::new().with_queue_url(config.queue_url.clone()));

        info!("Using settings file: {}", config.settings_path);

        Self::with_services(AppServices {
            settings,
            tryon,
            fallback_api_key: config.fal_api_key,
        })
    }

    pub async fn set_api_key(&self, key: &str) -> Result<()> {
        self.settings.set_api_key(key).await?;
        info!("API key saved successfully");
        Ok(())
    }

    pub async fn set_photo(&self, path: &Path) -> Result<()> {
        let photo = UserPhoto::from_file(path)?;
        self.settings.set_user_photo(&photo).await?;
        info!("Saved user photo {} ({} bytes encoded)", photo.name, photo.data.len());
        Ok(())
    }

    pub async fn remove_photo(&self) -> Result<()> {
        self.settings.remove_user_photo().await?;
        info!("Removed user photo");
        Ok(())
    }

    /// One-line summary of the persisted settings.
    pub async fn status(&self) -> Result<String> {
        let key = self.settings.api_key().await?;
        let photo = self.settings.user_photo().await?;

        let key_line = match (&key, &self.fallback_api_key) {
            (Some(_), _) => "API key: saved",
            (None, Some(_)) => "API key: from environment (FAL_KEY)",
            (None, None) => "API key: not set",
        };
        let photo_line = match &photo {
            Some(photo) => format!("User photo: {} (uploaded {})", photo.name, photo.created_at),
            None => "User photo: not set".to_string(),
        };

        Ok(format!("{}\n{}", key_line, photo_line))
    }

    /// Run one try-on for a product image URL through the router channel.
    pub async fn try_on(&self, product_image_url: &str) -> Result<RouterResponse> {
        let router = Router::new(
            self.tryon.clone(),
            self.settings.clone(),
            self.fallback_api_key.clone(),
        );

        let (tx, rx) = mpsc::channel(1);
        let server = tokio::spawn(router.serve(rx));

        let (reply_tx, reply_rx) = oneshot::channel();
        tx.send(RouterRequest {
            event: TriggerEvent::ImageSelected {
                image_url: product_image_url.to_string(),
            },
            reply: reply_tx,
        })
        .await
        .map_err(|_| Error::Generic("Router channel closed unexpectedly".to_string()))?;

        let response = reply_rx
            .await
            .map_err(|_| Error::Generic("Router dropped the reply channel".to_string()))?;

        drop(tx);
        let _ = server.await;

        Ok(response)
    }
}
