//! Resilient HTTP client for the chess club REST API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::RETRY_AFTER;
use reqwest::StatusCode;
use url::Url;

use crate::{
    credentials::{CredentialPolicy, CredentialStore, MemoryCredentialStore},
    response::truncate_body,
    ClassifiedError, RequestDescriptor, ResponseBody,
};

const USER_AGENT: &str = concat!("clubhub/", env!("CARGO_PKG_VERSION"));

/// Upper bound on a server-supplied `Retry-After` hint.
pub const MAX_RETRY_AFTER: Duration = Duration::from_secs(60);

/// Retry ceiling and backoff base shared by rate-limit and transport retries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before retry `n` is `backoff_base * n` unless the server sends `Retry-After`.
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff_base.saturating_mul(attempt)
    }
}

/// Result of a single attempt, before the retry decision.
enum Attempt {
    Done(Result<(u16, ResponseBody), ClassifiedError>),
    RateLimited {
        error: ClassifiedError,
        retry_after: Option<Duration>,
    },
    Unreachable(reqwest::Error),
}

/// HTTP client for the chess club API.
///
/// Every call goes through [`Client::execute`], which bounds each attempt by
/// the descriptor's timeout, retries rate limiting and transport failures,
/// and classifies every failure into a [`ClassifiedError`]. The client holds
/// no per-call state; concurrent calls are independent.
pub struct Client {
    /// Base address, e.g. `http://localhost:8000`. Request paths are appended to it.
    base_api_url: String,
    http: reqwest::Client,
    credentials: Arc<dyn CredentialStore>,
    credential_policy: CredentialPolicy,
    retry: RetryPolicy,
}

impl Client {
    /// Creates a client backed by an in-memory credential store.
    pub fn new(base_url: &str) -> Result<Self, ClassifiedError> {
        Self::with_credentials(base_url, Arc::new(MemoryCredentialStore::new()))
    }

    /// Creates a client that reads and clears credentials through `credentials`.
    pub fn with_credentials(
        base_url: &str,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, ClassifiedError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                ClassifiedError::invalid_request(e)
            })?;
        Ok(Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            http,
            credentials,
            credential_policy: CredentialPolicy::default(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_credential_policy(mut self, policy: CredentialPolicy) -> Self {
        self.credential_policy = policy;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    fn get_url(&self, request: &RequestDescriptor) -> Result<Url, ClassifiedError> {
        let mut url = Url::parse(format!("{}{}", &self.base_api_url, request.path).as_str())
            .map_err(|e| {
                tracing::error!("Invalid URL constructed: {}", e);
                ClassifiedError::invalid_request(e)
            })?;
        if !request.segments.is_empty() {
            if let Some(bad) = request
                .segments
                .iter()
                .find(|seg| matches!(seg.as_str(), "" | "." | ".."))
            {
                return Err(ClassifiedError::invalid_request(format!(
                    "'{}' is not a valid path segment",
                    bad
                )));
            }
            let mut segments = url.path_segments_mut().map_err(|_| {
                ClassifiedError::invalid_request("base address cannot carry a path")
            })?;
            segments.pop_if_empty();
            for segment in request.segments.iter() {
                segments.push(segment);
            }
        }
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in request.query.iter() {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Performs one logical call.
    ///
    /// Returns the parsed body (or raw text) on 2xx. Rate limiting and
    /// transport failures are retried up to the policy's ceiling; a timeout
    /// and every other status are terminal.
    pub async fn execute(
        &self,
        request: &RequestDescriptor,
    ) -> Result<ResponseBody, ClassifiedError> {
        self.execute_with_status(request)
            .await
            .map(|(_, body)| body)
    }

    /// Like [`execute`](Self::execute), also returning the success status.
    pub(crate) async fn execute_with_status(
        &self,
        request: &RequestDescriptor,
    ) -> Result<(u16, ResponseBody), ClassifiedError> {
        let url = self.get_url(request)?;
        let mut attempt: u32 = 0;
        loop {
            let outcome =
                match tokio::time::timeout(request.timeout, self.send_once(request, url.clone()))
                    .await
                {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        tracing::error!(
                            "{} {} timed out after {:?}",
                            request.method,
                            request.path,
                            request.timeout
                        );
                        return Err(ClassifiedError::timeout());
                    }
                };

            match outcome {
                Attempt::Done(result) => return result,
                Attempt::RateLimited { error, retry_after } => {
                    if attempt >= self.retry.max_retries {
                        tracing::error!(
                            "{} {} still rate limited after {} retries",
                            request.method,
                            request.path,
                            attempt
                        );
                        return Err(error);
                    }
                    attempt += 1;
                    let delay = retry_after.unwrap_or_else(|| self.retry.delay_for_attempt(attempt));
                    tracing::warn!(
                        "{} {} rate limited (retry {}/{}), retrying in {:.1}s",
                        request.method,
                        request.path,
                        attempt,
                        self.retry.max_retries,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                }
                Attempt::Unreachable(e) => {
                    if attempt >= self.retry.max_retries {
                        tracing::error!(
                            "{} {} unreachable after {} retries: {}",
                            request.method,
                            request.path,
                            attempt,
                            e
                        );
                        return Err(ClassifiedError::network());
                    }
                    attempt += 1;
                    let delay = self.retry.delay_for_attempt(attempt);
                    tracing::warn!(
                        "{} {} failed (retry {}/{}): {}, retrying in {:.1}s",
                        request.method,
                        request.path,
                        attempt,
                        self.retry.max_retries,
                        e,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn send_once(&self, request: &RequestDescriptor, url: Url) -> Attempt {
        tracing::debug!("{} {}", request.method, url);
        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header("accept", "application/json");
        for (name, value) in request.headers.iter() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        // A request that cannot be built never leaves the process.
        let req = match builder.build() {
            Ok(req) => req,
            Err(e) => {
                tracing::error!("{} {} could not be built: {}", request.method, request.path, e);
                return Attempt::Done(Err(ClassifiedError::invalid_request(e)));
            }
        };

        let resp = match self.http.execute(req).await {
            Ok(resp) => resp,
            Err(e) if e.is_builder() => {
                return Attempt::Done(Err(ClassifiedError::invalid_request(e)));
            }
            Err(e) => return Attempt::Unreachable(e),
        };

        let status = resp.status();
        let retry_after = parse_retry_after(resp.headers().get(RETRY_AFTER));
        // The body is consumed here and nowhere else.
        let raw = match resp.text().await {
            Ok(raw) => raw,
            Err(e) => return Attempt::Unreachable(e),
        };
        let body = ResponseBody::from_text(raw);

        if status.is_success() {
            return Attempt::Done(Ok((status.as_u16(), body)));
        }

        let error = ClassifiedError::from_response(status.as_u16(), &body);
        match status {
            StatusCode::TOO_MANY_REQUESTS => Attempt::RateLimited { error, retry_after },
            StatusCode::UNAUTHORIZED => {
                if self.credential_policy.should_clear(error.message()) {
                    tracing::warn!("Clearing stored credentials: {}", error.message());
                    self.credentials.clear_session();
                }
                Attempt::Done(Err(error))
            }
            _ => {
                if let Some(raw) = body.as_text() {
                    tracing::error!(
                        "Request failed with status {}: {}",
                        status,
                        truncate_body(raw)
                    );
                } else {
                    tracing::error!("Request failed with status {}: {}", status, error);
                }
                Attempt::Done(Err(error))
            }
        }
    }
}

/// Parses a `Retry-After` value given in (possibly fractional) seconds,
/// capped at [`MAX_RETRY_AFTER`].
fn parse_retry_after(value: Option<&reqwest::header::HeaderValue>) -> Option<Duration> {
    let secs = value?.to_str().ok()?.trim().parse::<f64>().ok()?;
    Duration::try_from_secs_f64(secs)
        .ok()
        .map(|delay| delay.min(MAX_RETRY_AFTER))
}
