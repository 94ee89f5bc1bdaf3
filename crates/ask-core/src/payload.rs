//! JSON bodies exchanged with the ask endpoint.

use serde::{Deserialize, Serialize};

/// Body posted to the endpoint: `{"question": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Body returned by the endpoint: `{"answer": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}
