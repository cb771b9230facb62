use super::TryOnService;
use crate::models::{GenerationResult, TryOnRequest};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockTryOnClient {
    image_urls: Arc<Mutex<Vec<String>>>,
    fail_generation: Arc<Mutex<bool>>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<TryOnRequest>>>,
}

impl MockTryOnClient {
    pub fn new() -> Self {
        Self {
            image_urls: Arc::new(Mutex::new(Vec::new())),
            fail_generation: Arc::new(Mutex::new(false)),
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_image_url(self, url: String) -> Self {
        self.image_urls.lock().unwrap().push(url);
        self
    }

    pub fn with_generation_failure(self) -> Self {
        *self.fail_generation.lock().unwrap() = true;
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_request(&self) -> Option<TryOnRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl Default for MockTryOnClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TryOnService for MockTryOnClient {
    async fn generate(
        &self,
        request: &TryOnRequest,
        api_key: Option<&str>,
    ) -> Result<GenerationResult> {
        api_key
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingCredential)?;

        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        *self.last_request.lock().unwrap() = Some(request.clone());

        if *self.fail_generation.lock().unwrap() {
            return Err(Error::GenerationFailed);
        }

        let urls = self.image_urls.lock().unwrap();
        if urls.is_empty() {
            // Default mock response
            Ok(GenerationResult {
                image_url: "https://mock-fal.example.com/generated.jpeg".to_string(),
                description: None,
            })
        } else {
            let index = (*count - 1) % urls.len();
            Ok(GenerationResult {
                image_url: urls[index].clone(),
                description: None,
            })
        }
    }
}
