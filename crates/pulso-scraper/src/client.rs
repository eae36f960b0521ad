use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::ScrapeError;
use crate::retry::retry_with_backoff;

/// Maximum number of status checks while waiting for an actor run. With the
/// service's 60-second long-poll this bounds a run at roughly an hour.
const MAX_POLLS: usize = 60;

/// Metadata for one actor run, as returned by the scraping service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorRun {
    pub id: String,
    pub status: String,
    pub default_dataset_id: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    data: T,
}

/// HTTP client for an Apify-style actor service.
///
/// Starts actor runs, long-polls them to completion, and fetches the
/// resulting dataset items as raw JSON values. Invalid credentials surface
/// as [`ScrapeError::Auth`] and are never retried; 429/5xx responses and
/// network failures are retried with exponential backoff up to
/// `max_retries` additional attempts.
pub struct ApifyClient {
    client: Client,
    base_url: String,
    token: String,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl ApifyClient {
    /// Creates a client with configured timeout and retry policy.
    ///
    /// `base_url` is the service root (e.g. `https://api.apify.com/v2`);
    /// injectable so tests can point it at a local mock server.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        token: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: token.to_owned(),
            max_retries,
            backoff_base_secs,
        })
    }

    /// Starts an actor run and waits for it to finish.
    ///
    /// The start request is retried on transient errors; once a run has been
    /// accepted it is polled to completion without restarting (a retry would
    /// start a second billed run).
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::Auth`] — the service rejected the token (401/403).
    /// - [`ScrapeError::RunFailed`] — the run ended `FAILED`, `ABORTED`, or
    ///   `TIMED-OUT`.
    /// - [`ScrapeError::PollLimit`] — the run did not finish within
    ///   [`MAX_POLLS`] status checks.
    /// - [`ScrapeError::Transient`] / [`ScrapeError::Http`] — after all
    ///   retries exhausted.
    pub async fn run_actor(
        &self,
        actor_id: &str,
        input: &serde_json::Value,
    ) -> Result<ActorRun, ScrapeError> {
        let run = retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            self.start_run(actor_id, input)
        })
        .await?;

        tracing::info!(actor_id, run_id = %run.id, "actor run started, waiting for completion");
        self.wait_for_run(run).await
    }

    async fn start_run(
        &self,
        actor_id: &str,
        input: &serde_json::Value,
    ) -> Result<ActorRun, ScrapeError> {
        // The service addresses "user/actor" ids with a tilde in URL paths.
        let path_id = actor_id.replace('/', "~");
        let url = format!("{}/acts/{}/runs", self.base_url, path_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;

        let body: ApiResponse<ActorRun> = Self::check_status(response).await?;
        Ok(body.data)
    }

    /// Polls a run until it reaches a terminal status, using the service's
    /// `waitForFinish` long-poll to avoid tight loops.
    async fn wait_for_run(&self, mut run: ActorRun) -> Result<ActorRun, ScrapeError> {
        let run_id = run.id.clone();
        for _ in 0..MAX_POLLS {
            match run.status.as_str() {
                "SUCCEEDED" => return Ok(run),
                "FAILED" | "ABORTED" | "TIMED-OUT" => {
                    return Err(ScrapeError::RunFailed {
                        run_id,
                        status: run.status,
                    });
                }
                other => {
                    tracing::debug!(run_id = %run_id, status = other, "actor run in progress");
                }
            }

            let url = format!("{}/actor-runs/{}?waitForFinish=60", self.base_url, run_id);
            let response = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .send()
                .await?;
            let body: ApiResponse<ActorRun> = Self::check_status(response).await?;
            run = body.data;
        }

        Err(ScrapeError::PollLimit {
            run_id,
            polls: MAX_POLLS,
        })
    }

    /// Fetches all dataset items produced by a completed run.
    ///
    /// Items are returned as raw JSON values; shapes vary per platform and
    /// are resolved downstream by the field extractor.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] variants as for [`Self::run_actor`]; transient
    /// errors are retried.
    pub async fn fetch_dataset(&self, run: &ActorRun) -> Result<Vec<serde_json::Value>, ScrapeError> {
        let url = format!(
            "{}/datasets/{}/items?format=json",
            self.base_url, run.default_dataset_id
        );

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self.client.get(&url).bearer_auth(&self.token).send().await?;
                let items: Vec<serde_json::Value> = Self::check_status(response).await?;
                Ok(items)
            }
        })
        .await
    }

    /// Fetches a raw item list from an absolute dataset URL advertised inside
    /// a scraped payload (e.g. TikTok per-post comment datasets).
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] on HTTP or decode failure; not retried —
    /// callers treat these datasets as best-effort.
    pub async fn fetch_dataset_url(&self, url: &str) -> Result<Vec<serde_json::Value>, ScrapeError> {
        let response = self.client.get(url).send().await?;
        let items: Vec<serde_json::Value> = Self::check_status(response).await?;
        Ok(items)
    }

    /// Maps non-2xx statuses to typed errors and decodes the JSON body.
    async fn check_status<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ScrapeError> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            let message = response.text().await.unwrap_or_default();
            return Err(ScrapeError::Auth(message));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            let message = response.text().await.unwrap_or_default();
            return Err(ScrapeError::Transient {
                status: status.as_u16(),
                message,
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ScrapeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
