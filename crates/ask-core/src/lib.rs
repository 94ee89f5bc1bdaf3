pub mod client;
pub mod config;
pub mod payload;
pub mod query;
pub mod submitter;
pub mod view;

// Re-export main types for convenience
pub use client::{AskClient, AskError, Answerer};
pub use config::{Config, DEFAULT_ENDPOINT};
pub use payload::{AskRequest, AskResponse};
pub use query::Query;
pub use submitter::{Submission, Submitter, FALLBACK_MESSAGE};
pub use view::{AskView, LoadingGuard};
