//! Message routing between the trigger, generation, and presentation surfaces
//!
//! Models the extension's ambient event listeners as explicit typed
//! request/response messages over a tokio channel. Each trigger event runs as
//! one logical task to a terminal outcome; there is no cancellation.

use crate::fal::TryOnService;
use crate::models::TryOnRequest;
use crate::prompts;
use crate::settings::SettingsStore;
use crate::Result;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info};

/// Event from the trigger surface (a context-menu click on a product image).
#[derive(Debug, Clone)]
pub enum TriggerEvent {
    ImageSelected { image_url: String },
}

/// Response relayed back to the presentation surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterResponse {
    /// The user photo prerequisite is not satisfied.
    UploadPromptRequired { message: String },
    /// Generation succeeded; consumers apply the URL to every matching image.
    Generated { image_url: String },
    /// Generation failed with a human-readable reason.
    Failed { error: String },
}

/// One request/response exchange over the router channel.
#[derive(Debug)]
pub struct RouterRequest {
    pub event: TriggerEvent,
    pub reply: oneshot::Sender<RouterResponse>,
}

pub struct Router {
    tryon: Arc<dyn TryOnService>,
    settings: Arc<dyn SettingsStore>,
    /// Process-level credential used when the settings store has no key.
    fallback_api_key: Option<String>,
}

/// Strip the query string so cache-busted variants of the same product image
/// resolve to one canonical URL.
pub fn normalize_product_url(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

impl Router {
    pub fn new(
        tryon: Arc<dyn TryOnService>,
        settings: Arc<dyn SettingsStore>,
        fallback_api_key: Option<String>,
    ) -> Self {
        Self {
            tryon,
            settings,
            fallback_api_key,
        }
    }

    /// Drain the channel until every sender has hung up.
    pub async fn serve(self, mut requests: mpsc::Receiver<RouterRequest>) {
        while let Some(request) = requests.recv().await {
            let response = self.handle(request.event).await;
            // The requester may have gone away; nothing left to notify.
            let _ = request.reply.send(response);
        }
    }

    pub async fn handle(&self, event: TriggerEvent) -> RouterResponse {
        match event {
            TriggerEvent::ImageSelected { image_url } => self.handle_selection(&image_url).await,
        }
    }

    async fn handle_selection(&self, image_url: &str) -> RouterResponse {
        let photo = match self.settings.user_photo().await {
            Ok(Some(photo)) => photo,
            Ok(None) => {
                info!("No user photo saved, prompting for upload");
                return RouterResponse::UploadPromptRequired {
                    message: prompts::UPLOAD_PROMPT.to_string(),
                };
            }
            Err(e) => {
                error!("Failed to read user photo from settings: {}", e);
                return RouterResponse::Failed {
                    error: e.to_string(),
                };
            }
        };

        let api_key = match self.resolve_api_key().await {
            Ok(key) => key,
            Err(e) => {
                error!("Failed to read API key from settings: {}", e);
                return RouterResponse::Failed {
                    error: e.to_string(),
                };
            }
        };

        let product_image = normalize_product_url(image_url);
        info!("Starting virtual try-on for {}", product_image);

        let request = TryOnRequest::new(&photo.data, product_image);
        match self.tryon.generate(&request, api_key.as_deref()).await {
            Ok(result) => {
                info!("Virtual try-on generation successful");
                RouterResponse::Generated {
                    image_url: result.image_url,
                }
            }
            Err(e) => {
                error!("Virtual try-on generation failed: {}", e);
                RouterResponse::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn resolve_api_key(&self) -> Result<Option<String>> {
        if let Some(key) = self.settings.api_key().await? {
            return Ok(Some(key));
        }
        Ok(self.fallback_api_key.clone())
    }
}
