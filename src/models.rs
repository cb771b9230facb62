//! Data models and structures
//!
//! Defines the core data structures for try-on requests, the Fal AI queue
//! protocol, and persisted user settings.

use serde::{Deserialize, Serialize};

/// Payload submitted to the Fal AI queue.
///
/// `image_urls` is ordered: the person photo first, the garment image second.
/// Each entry may be a remote URL or an inline data URI; both are passed
/// through untouched.
#[derive(Debug, Clone, Serialize)]
pub struct TryOnRequest {
    pub prompt: String,
    pub image_urls: Vec<String>,
    pub num_images: u32,
    pub output_format: String,
}

impl TryOnRequest {
    pub fn new(user_photo: &str, product_image: &str) -> Self {
        Self {
            prompt: crate::prompts::VIRTUAL_TRYON.to_string(),
            image_urls: vec![user_photo.to_string(), product_image.to_string()],
            num_images: 1,
            output_format: "jpeg".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QueueSubmitResponse {
    pub request_id: String,
    pub status_url: Option<String>,
    pub response_url: Option<String>,
}

/// Identifies one in-flight job. Discarded once a terminal status is reached.
#[derive(Debug, Clone)]
pub struct JobHandle {
    pub request_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueueStatus {
    InQueue,
    InProgress,
    Completed,
    Failed,
}

impl QueueStatus {
    /// Statuses from which no further transition occurs.
    pub fn is_terminal(&self) -> bool {
        matches!(self, QueueStatus::Completed | QueueStatus::Failed)
    }
}

#[derive(Debug, Deserialize)]
pub struct QueueStatusResponse {
    pub status: QueueStatus,
    pub queue_position: Option<u32>,
    pub logs: Option<Vec<LogEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogEntry {
    pub message: String,
    pub timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TryOnResponse {
    pub images: Vec<OutputImage>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OutputImage {
    pub url: String,
}

/// Outcome of one successful generation: exactly one image URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub image_url: String,
    pub description: Option<String>,
}

/// The user's photo as persisted in settings.
///
/// Field names match the storage keys used by the extension this tool
/// interoperates with (`data`/`name`/`createdAt`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserPhoto {
    pub data: String,
    pub name: String,
    pub created_at: String,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Process-level fallback credential; the settings store takes priority.
    pub fal_api_key: Option<String>,
    pub queue_url: String,
    pub settings_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            fal_api_key: std::env::var("FAL_KEY").ok().filter(|k| !k.is_empty()),
            queue_url: std::env::var("FAL_QUEUE_URL")
                .unwrap_or_else(|_| "https://queue.fal.run/fal-ai/nano-banana".to_string()),
            settings_path: std::env::var("TRYON_SETTINGS_PATH")
                .unwrap_or_else(|_| "tryon-settings.json".to_string()),
        }
    }
}
