use super::TryOnService;
use crate::models::{
    GenerationResult, JobHandle, QueueStatus, QueueStatusResponse, QueueSubmitResponse,
    TryOnRequest, TryOnResponse,
};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const DEFAULT_QUEUE_URL: &str = "https://queue.fal.run/fal-ai/nano-banana";

/// Delay between queue status checks.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Hard cap on status checks (~5 minutes at the default interval).
pub const MAX_POLL_ATTEMPTS: u32 = 60;

pub struct FalClient {
    client: Client,
    base_url: String,
    poll_interval: Duration,
}

impl FalClient {
    pub fn new() -> Self {
        Self::new_with_client(Client::new())
    }

    /// Build a client reusing an existing HTTP connection pool.
    pub fn new_with_client(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_QUEUE_URL.to_string(),
            poll_interval: POLL_INTERVAL,
        }
    }

    /// Point the client at a different queue endpoint.
    pub fn with_queue_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Override the delay between status checks. The cap stays at
    /// [`MAX_POLL_ATTEMPTS`] iterations regardless of the interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    async fn submit(&self, request: &TryOnRequest, api_key: &str) -> Result<JobHandle> {
        tracing::debug!("Submitting try-on request to Fal AI queue");

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Key {}", api_key))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send submit request: {}", e);
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let code = status.as_u16();
            return Err(match code {
                401 => Error::InvalidCredential,
                402 => Error::InsufficientBalance,
                _ => {
                    let body = response.text().await.unwrap_or_default();
                    tracing::error!("Submit request failed (status {}): {}", code, body);
                    Error::SubmissionFailed { status: code, body }
                }
            });
        }

        let body = response.text().await?;
        let submit: QueueSubmitResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Submit response had no request id: {}\nBody: {}", e, body);
            Error::SubmissionFailed {
                status: status.as_u16(),
                body: body.clone(),
            }
        })?;

        Ok(JobHandle {
            request_id: submit.request_id,
        })
    }

    async fn check_status(&self, job: &JobHandle, api_key: &str) -> Result<QueueStatusResponse> {
        let url = format!("{}/requests/{}/status", self.base_url, job.request_id);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Key {}", api_key))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Status check failed (status {})", status);
            return Err(Error::PollFailed {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }

    /// Poll until the job reaches a terminal status.
    ///
    /// Cooperative fixed-interval loop: each iteration sleeps for the poll
    /// interval before issuing one status check. Exceeding
    /// [`MAX_POLL_ATTEMPTS`] fails with [`Error::Timeout`].
    async fn poll_until_terminal(
        &self,
        job: &JobHandle,
        api_key: &str,
    ) -> Result<QueueStatusResponse> {
        for attempt in 1..=MAX_POLL_ATTEMPTS {
            tokio::time::sleep(self.poll_interval).await;

            let response = self.check_status(job, api_key).await?;
            tracing::debug!(
                "Status check {}/{}: {:?} (queue position: {:?})",
                attempt,
                MAX_POLL_ATTEMPTS,
                response.status,
                response.queue_position
            );

            if response.status.is_terminal() {
                return Ok(response);
            }
        }

        tracing::error!(
            "Job {} still pending after {} status checks",
            job.request_id,
            MAX_POLL_ATTEMPTS
        );
        Err(Error::Timeout)
    }

    async fn fetch_result(&self, job: &JobHandle, api_key: &str) -> Result<GenerationResult> {
        let url = format!("{}/requests/{}", self.base_url, job.request_id);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Key {}", api_key))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Result fetch failed (status {})", status);
            return Err(Error::ResultFetchFailed {
                status: status.as_u16(),
            });
        }

        let result: TryOnResponse = response.json().await?;

        // A completed job with zero output images is still a failure.
        let image = result.images.first().ok_or(Error::NoImageProduced)?;

        Ok(GenerationResult {
            image_url: image.url.clone(),
            description: result.description,
        })
    }
}

impl Default for FalClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TryOnService for FalClient {
    async fn generate(
        &self,
        request: &TryOnRequest,
        api_key: Option<&str>,
    ) -> Result<GenerationResult> {
        let api_key = api_key
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingCredential)?;

        let job = self.submit(request, api_key).await?;
        tracing::info!("Request submitted, request_id: {}", job.request_id);

        let terminal = self.poll_until_terminal(&job, api_key).await?;

        match terminal.status {
            QueueStatus::Completed => {
                tracing::info!("Job {} completed, fetching result", job.request_id);
                self.fetch_result(&job, api_key).await
            }
            // poll_until_terminal only returns terminal statuses, so this is FAILED.
            _ => {
                if let Some(logs) = &terminal.logs {
                    for line in logs {
                        tracing::error!("Server log: {}", line.message);
                    }
                }
                Err(Error::GenerationFailed)
            }
        }
    }
}
