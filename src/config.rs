use std::fmt;

/// Endpoint URL and anon key for a Supabase project, immutable once loaded.
#[derive(Clone)]
pub struct ClientConfig {
    /// Project URL, e.g. `https://abc123.supabase.co`.
    pub url: String,
    /// Published limited-privilege API key sent with every request.
    pub anon_key: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .finish()
    }
}

impl ClientConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
        }
    }

    /// Loads configuration from `SUPABASE_URL` and `SUPABASE_ANON_KEY`.
    ///
    /// Unset variables become empty strings; loading never fails. Use
    /// [`ClientConfig::is_configured`] to find out whether the result is
    /// usable.
    ///
    /// **Not available on `wasm32` targets** — environment variables do not
    /// exist in browser runtimes. Build a [`ClientConfig`] with
    /// [`ClientConfig::new`] from values received via `wasm-bindgen`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("SUPABASE_URL").unwrap_or_default(),
            anon_key: std::env::var("SUPABASE_ANON_KEY").unwrap_or_default(),
        }
    }

    /// Reports whether both the endpoint URL and the anon key are present.
    ///
    /// This is the configuration gate: dependent operations check it (or
    /// the `Option` returned by client construction) instead of handling a
    /// missing-credentials error.
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::ClientConfig;

    #[test]
    fn gate_rejects_empty_url() {
        let config = ClientConfig::new("", "anon-key");
        assert!(!config.is_configured());
    }

    #[test]
    fn gate_rejects_empty_key() {
        let config = ClientConfig::new("https://abc123.supabase.co", "");
        assert!(!config.is_configured());
    }

    #[test]
    fn gate_rejects_whitespace_values() {
        let config = ClientConfig::new("   ", "anon-key");
        assert!(!config.is_configured());
    }

    #[test]
    fn gate_accepts_full_config() {
        let config = ClientConfig::new("https://abc123.supabase.co", "anon-key");
        assert!(config.is_configured());
    }

    #[test]
    fn debug_redacts_anon_key() {
        let config = ClientConfig::new("https://abc123.supabase.co", "secret-key");
        let debug = format!("{config:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret-key"));
    }
}
