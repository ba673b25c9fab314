use serde::Deserialize;

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum SupabaseError {
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Server-side failure (status >= 500) with raw response body.
    ///
    /// Statuses below 500 never become errors: the response is handed back
    /// to the caller unchanged.
    #[error("server error {status}: {body}")]
    Server { status: u16, body: String },
}

/// Failure category, assigned where the failure is detected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Transport-level failure: connection refused, DNS, interrupted body.
    Network,
    /// Request blocked by the browser's cross-origin policy.
    ///
    /// Native transports never produce this; it exists for classifying
    /// message text from WASM callers and foreign error values.
    Cors,
    /// Malformed or rejected API key / JWT.
    Credential,
    /// The request ran out of time.
    Timeout,
    /// Upstream answered with status >= 500.
    Server,
    /// Anything we could not place.
    Unknown,
}

const MSG_NETWORK: &str = "مشكلة في الاتصال بالخادم. تحقق من اتصال الإنترنت أو حاول مرة أخرى.";
const MSG_CORS: &str = "مشكلة في إعدادات الخادم. يرجى التواصل مع الإدارة.";
const MSG_CREDENTIAL: &str = "مشكلة في المصادقة. يرجى التواصل مع الإدارة.";
const MSG_TIMEOUT: &str = "انتهت مهلة الاتصال. حاول مرة أخرى.";
const MSG_GENERIC: &str = "حدث خطأ غير متوقع. حاول مرة أخرى.";

impl ErrorKind {
    /// Localized user-facing message for kinds with a catalog entry.
    ///
    /// `Server` and `Unknown` have none; callers fall back to the error's
    /// own text.
    pub fn user_message(self) -> Option<&'static str> {
        match self {
            Self::Network => Some(MSG_NETWORK),
            Self::Cors => Some(MSG_CORS),
            Self::Credential => Some(MSG_CREDENTIAL),
            Self::Timeout => Some(MSG_TIMEOUT),
            Self::Server | Self::Unknown => None,
        }
    }
}

impl SupabaseError {
    /// Structured failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(err) => transport_kind(err),
            Self::Server { .. } => ErrorKind::Server,
        }
    }

    /// User-facing message for this error.
    pub fn user_message(&self) -> String {
        match self.kind().user_message() {
            Some(message) => message.to_owned(),
            None => self.to_string(),
        }
    }
}

fn transport_kind(err: &reqwest::Error) -> ErrorKind {
    if err.is_timeout() {
        ErrorKind::Timeout
    } else {
        ErrorKind::Network
    }
}

/// Classifies free-text error messages by substring, in fixed priority order.
///
/// This is the fallback for error values that did not originate in this
/// crate's transport (stringified API payloads, errors from other layers).
/// Errors produced here carry their kind directly; see [`SupabaseError::kind`].
pub fn classify_message(message: &str) -> ErrorKind {
    if message.contains("Failed to fetch")
        || message.contains("NetworkError")
        || message.contains("fetch")
    {
        ErrorKind::Network
    } else if message.contains("CORS") || message.contains("Access-Control-Allow-Origin") {
        ErrorKind::Cors
    } else if message.contains("JWT") || message.contains("Invalid API key") {
        ErrorKind::Credential
    } else if message.contains("timeout") {
        ErrorKind::Timeout
    } else {
        ErrorKind::Unknown
    }
}

/// Maps an arbitrary error value to a localized user-facing message.
///
/// Errors produced by this crate (or a bare `reqwest::Error`) are mapped
/// through their structured kind; anything else goes through
/// [`classify_message`] on its rendered text, falling back to that text
/// itself, or a generic message when empty.
pub fn user_message_for(error: &(dyn std::error::Error + 'static)) -> String {
    tracing::debug!(%error, "mapping error to user message");

    if let Some(err) = error.downcast_ref::<SupabaseError>() {
        return err.user_message();
    }
    if let Some(err) = error.downcast_ref::<reqwest::Error>() {
        if let Some(message) = transport_kind(err).user_message() {
            return message.to_owned();
        }
    }

    let text = error.to_string();
    match classify_message(&text).user_message() {
        Some(message) => message.to_owned(),
        None if text.is_empty() => MSG_GENERIC.to_owned(),
        None => text,
    }
}

/// Error payload shape returned by PostgREST.
///
/// Client errors (status < 500) come back as plain responses; this type
/// decodes their body when the caller wants a structured reason or a
/// user-facing message.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl ApiErrorBody {
    /// User-facing message for this payload.
    pub fn user_message(&self) -> String {
        let text = self.message.as_deref().unwrap_or_default();
        match classify_message(text).user_message() {
            Some(message) => message.to_owned(),
            None if text.is_empty() => MSG_GENERIC.to_owned(),
            None => text.to_owned(),
        }
    }
}
