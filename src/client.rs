use std::fmt;
use std::time::Duration;

use reqwest::{header, Method, Response};
use serde_json::Value as JsonValue;

// tokio::time::sleep is only available on non-WASM targets.
#[cfg(not(target_arch = "wasm32"))]
use tokio::time::sleep;

use crate::{retry::RetrySchedule, ClientConfig, ClientOptions, Result, SupabaseError};

const CLIENT_INFO: &str = concat!("supabase-http-rs/", env!("CARGO_PKG_VERSION"));

/// Formats a Supabase project URL into the REST base URL.
///
/// Example: `"https://abc123.supabase.co"` → `"https://abc123.supabase.co/rest/v1"`
pub fn project_url_to_rest_url(project_url: &str) -> String {
    format!("{}/rest/v1", project_url.trim().trim_end_matches('/'))
}

#[derive(Clone)]
/// HTTP client for a Supabase project's REST (PostgREST) endpoint.
pub struct SupabaseClient {
    http: reqwest::Client,
    rest_url: String,
    authorization: String,
    anon_key: String,
    options: ClientOptions,
}

impl fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("rest_url", &self.rest_url)
            .field("anon_key", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

impl SupabaseClient {
    /// Creates a client from a loaded configuration.
    ///
    /// Returns `None` when the configuration gate fails (either value
    /// empty) or the underlying HTTP client cannot be built. Missing
    /// credentials are reported through the gate, never raised.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use supabase_http::{ClientConfig, SupabaseClient};
    ///
    /// let config = ClientConfig::new("https://abc123.supabase.co", "anon-key");
    /// let db = SupabaseClient::from_config(config).expect("config must be complete");
    /// ```
    pub fn from_config(config: ClientConfig) -> Option<Self> {
        if !config.is_configured() {
            tracing::warn!("client not constructed: endpoint URL or anon key is empty");
            return None;
        }

        let http = match reqwest::Client::builder().build() {
            Ok(http) => http,
            Err(err) => {
                tracing::warn!(error = %err, "client not constructed: HTTP client build failed");
                return None;
            }
        };

        let anon_key = config.anon_key.trim().to_owned();
        Some(Self {
            http,
            rest_url: project_url_to_rest_url(&config.url),
            authorization: normalize_bearer_authorization(&anon_key),
            anon_key,
            options: ClientOptions::default(),
        })
    }

    /// Creates a client from the `SUPABASE_URL` / `SUPABASE_ANON_KEY`
    /// environment variables.
    ///
    /// **Not available on `wasm32` targets** — see [`ClientConfig::from_env`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Option<Self> {
        Self::from_config(ClientConfig::from_env())
    }

    /// Creates a client from a **project reference** and anon key.
    ///
    /// The REST URL is derived automatically:
    /// `https://<ref>.supabase.co/rest/v1`
    pub fn from_project_ref(
        project_ref: impl AsRef<str>,
        anon_key: impl Into<String>,
    ) -> Option<Self> {
        let url = format!("https://{}.supabase.co", project_ref.as_ref().trim());
        Self::from_config(ClientConfig::new(url, anon_key))
    }

    /// Applies client options such as timeout and retry behavior.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    /// Issues a GET request. `path_and_query` is relative to `/rest/v1`,
    /// e.g. `"users?select=id,name"`.
    pub async fn get(&self, path_and_query: &str) -> Result<Response> {
        self.send(Method::GET, path_and_query, None).await
    }

    /// Issues a POST request with a JSON body.
    pub async fn post(&self, path_and_query: &str, body: &JsonValue) -> Result<Response> {
        self.send(Method::POST, path_and_query, Some(body)).await
    }

    /// Issues a request, retrying transient failures with exponential
    /// backoff.
    ///
    /// Any response with status **below 500 is final and returned as-is**,
    /// including client errors: callers inspect the status themselves or
    /// use [`Response::error_for_status`]. Server errors (>= 500) and
    /// transport failures are retried up to `max_attempts` total attempts
    /// with delays doubling from `retry_backoff_ms`; once exhausted, the
    /// last error is returned unchanged.
    pub async fn send(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<&JsonValue>,
    ) -> Result<Response> {
        let url = format!(
            "{}/{}",
            self.rest_url,
            path_and_query.trim_start_matches('/')
        );
        let schedule =
            RetrySchedule::new(self.options.max_attempts, self.options.retry_backoff_ms);
        let mut attempt = 0usize;

        loop {
            // Build the request fresh per attempt. On WASM, reqwest uses
            // AbortController for timeout; the `.timeout()` method is
            // available on both targets.
            let mut request = self
                .http
                .request(method.clone(), url.as_str())
                .header("apikey", &self.anon_key)
                .header(header::AUTHORIZATION, &self.authorization)
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::ACCEPT, "application/json")
                .header("X-Client-Info", CLIENT_INFO)
                .header("Accept-Profile", &self.options.schema)
                .timeout(Duration::from_millis(self.options.timeout_ms));
            if let Some(body) = body {
                request = request.json(body);
            }

            let outcome = match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.as_u16() < 500 {
                        return Ok(response);
                    }
                    let body = response.text().await.unwrap_or_default();
                    SupabaseError::Server {
                        status: status.as_u16(),
                        body,
                    }
                }
                Err(err) => SupabaseError::Transport(err),
            };

            match schedule.delay_after(attempt) {
                Some(delay) => {
                    tracing::warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %outcome,
                        "request attempt failed, retrying"
                    );
                    wait_before_retry(delay).await;
                    attempt += 1;
                }
                None => {
                    tracing::warn!(attempt, error = %outcome, "request attempt failed, retries exhausted");
                    return Err(outcome);
                }
            }
        }
    }

    /// Verifies connectivity with one minimal read-only query against
    /// `table`.
    ///
    /// Returns `true` when the endpoint answers with a success status.
    /// Failures are logged and reported as `false`, never raised.
    pub async fn check_connection(&self, table: &str) -> bool {
        let path = format!("{table}?select=count&limit=1");
        match self.get(&path).await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::error!(status = response.status().as_u16(), "connection test failed");
                false
            }
            Err(err) => {
                tracing::error!(error = %err, "connection test error");
                false
            }
        }
    }
}

/// Waits before the next retry attempt.
///
/// On native targets: backoff sleep via `tokio::time::sleep`, suspending
/// only this call. On WASM targets: no-op — browser and edge callers prefer
/// fast failure over sleeping, and `tokio::time::sleep` is not available.
async fn wait_before_retry(delay: Duration) {
    #[cfg(not(target_arch = "wasm32"))]
    sleep(delay).await;

    // WASM: no sleep implementation — suppress unused variable warning.
    #[cfg(target_arch = "wasm32")]
    let _ = delay;
}

fn normalize_bearer_authorization(token: &str) -> String {
    let trimmed = token.trim();
    let prefix = trimmed.get(..7);
    if prefix.is_some_and(|value| value.eq_ignore_ascii_case("bearer ")) {
        trimmed.to_owned()
    } else {
        format!("Bearer {trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_bearer_authorization, project_url_to_rest_url, SupabaseClient};
    use crate::ClientConfig;

    #[test]
    fn rest_url_from_project_url() {
        assert_eq!(
            project_url_to_rest_url("https://abc123.supabase.co"),
            "https://abc123.supabase.co/rest/v1"
        );
        assert_eq!(
            project_url_to_rest_url(" https://abc123.supabase.co/ "),
            "https://abc123.supabase.co/rest/v1"
        );
    }

    #[test]
    fn normalize_bearer_adds_prefix_when_missing() {
        assert_eq!(
            normalize_bearer_authorization("abc123"),
            "Bearer abc123".to_owned()
        );
    }

    #[test]
    fn normalize_bearer_keeps_existing_prefix() {
        assert_eq!(
            normalize_bearer_authorization("bEaReR abc123"),
            "bEaReR abc123".to_owned()
        );
    }

    #[test]
    fn construction_gated_on_configuration() {
        assert!(SupabaseClient::from_config(ClientConfig::new("", "anon-key")).is_none());
        assert!(
            SupabaseClient::from_config(ClientConfig::new("https://abc123.supabase.co", ""))
                .is_none()
        );
        assert!(SupabaseClient::from_config(ClientConfig::new(
            "https://abc123.supabase.co",
            "anon-key"
        ))
        .is_some());
    }

    #[test]
    fn debug_redacts_anon_key() {
        let client = SupabaseClient::from_config(ClientConfig::new(
            "https://abc123.supabase.co",
            "secret-key",
        ))
        .expect("config must be complete");
        let debug = format!("{client:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret-key"));
    }
}
