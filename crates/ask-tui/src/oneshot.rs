//! Non-interactive mode: ask one question from the command line.

use std::io::Write;
use std::sync::Mutex;

use ask_core::{AskView, Submission, Submitter};

/// Console stand-in for the page: the question comes from argv, the loading
/// indicator goes to stderr and the displayed text is captured for stdout.
pub struct ConsoleView<W: Write + Send> {
    question: String,
    answer: Mutex<String>,
    status: Mutex<W>,
}

impl<W: Write + Send> ConsoleView<W> {
    pub fn new(question: impl Into<String>, status: W) -> Self {
        Self {
            question: question.into(),
            answer: Mutex::new(String::new()),
            status: Mutex::new(status),
        }
    }

    pub fn answer_text(&self) -> String {
        self.answer.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl<W: Write + Send> AskView for ConsoleView<W> {
    fn input_value(&self) -> String {
        self.question.clone()
    }

    fn set_answer_text(&self, text: &str) {
        if let Ok(mut answer) = self.answer.lock() {
            *answer = text.to_string();
        }
    }

    fn set_loading_visible(&self, visible: bool) {
        if !visible {
            return;
        }
        if let Ok(mut status) = self.status.lock() {
            let _ = writeln!(status, "Analyzing...");
        }
    }

    // No control to disable on a console
    fn set_submit_disabled(&self, _disabled: bool) {}
}

/// Ask once and write the displayed text to `out`. Returns whether an
/// answer (rather than the fallback) was shown.
pub async fn run<W, O>(submitter: &Submitter, view: &ConsoleView<W>, out: &mut O) -> anyhow::Result<bool>
where
    W: Write + Send,
    O: Write,
{
    let outcome = submitter.submit(view).await;
    if outcome == Submission::Skipped {
        return Ok(true);
    }

    writeln!(out, "{}", view.answer_text())?;
    Ok(matches!(outcome, Submission::Answered(_)))
}
