//! The query submitter: one user trigger, one request, one rendered result.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::client::Answerer;
use crate::query::Query;
use crate::view::{AskView, LoadingGuard};

/// Shown in place of the answer whenever the request fails for any reason.
pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// What a single invocation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Input was empty after trimming; nothing was touched
    Skipped,
    Answered(String),
    Failed,
}

#[derive(Clone)]
pub struct Submitter {
    answerer: Arc<dyn Answerer>,
}

impl Submitter {
    pub fn new(answerer: Arc<dyn Answerer>) -> Self {
        Self { answerer }
    }

    /// Read the input, ask, and render the outcome into `view`.
    ///
    /// Does not guard against overlapping calls on the same view; the last
    /// one to resolve wins the display. Front ends keep retriggers out by
    /// honouring the disabled submit control.
    pub async fn submit(&self, view: &dyn AskView) -> Submission {
        let Some(query) = Query::parse(&view.input_value()) else {
            debug!("ignoring empty query");
            return Submission::Skipped;
        };

        let loading = LoadingGuard::enter(view);
        info!(question = %query, "submitting query");

        match self.answerer.answer(&query).await {
            Ok(answer) => {
                loading.set_answer_text(&answer);
                Submission::Answered(answer)
            }
            Err(err) => {
                error!(error = %err, question = %query, "ask request failed");
                loading.set_answer_text(FALLBACK_MESSAGE);
                Submission::Failed
            }
        }
    }
}
