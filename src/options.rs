/// Configures HTTP timeout, retry behavior, and the schema profile.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Total attempts per request, including the first. Zero is treated
    /// as one.
    pub max_attempts: usize,
    /// Base retry backoff in milliseconds (doubles per attempt).
    pub retry_backoff_ms: u64,
    /// PostgREST schema profile sent as `Accept-Profile`.
    pub schema: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_attempts: 3,
            retry_backoff_ms: 1_000,
            schema: "public".to_owned(),
        }
    }
}
