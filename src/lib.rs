//! `supabase-http` is a resilient async HTTP transport for the Supabase
//! REST API.
//!
//! The crate wraps a project's `/rest/v1` endpoint with:
//! - [`SupabaseClient::send`] — requests with retry and exponential backoff
//! - [`SupabaseClient::check_connection`] — boolean connectivity test
//! - [`user_message_for`] — localized user-facing error messages
//!
//! Construction is gated on configuration: [`SupabaseClient::from_config`]
//! returns `None` instead of failing when credentials are missing.

mod client;
mod config;
mod error;
mod options;
mod retry;

pub use client::{project_url_to_rest_url, SupabaseClient};
pub use config::ClientConfig;
pub use error::{classify_message, user_message_for, ApiErrorBody, ErrorKind, SupabaseError};
pub use options::ClientOptions;

pub type Result<T> = std::result::Result<T, SupabaseError>;
