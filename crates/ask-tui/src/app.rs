use ask_core::{Query, Submission, Submitter};
use futures_util::FutureExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::panel::PanelHandle;

pub struct App {
    pub should_quit: bool,
    pub panel: PanelHandle,
    pub submitter: Submitter,
    pub endpoint: String,

    // In-flight submission, if any
    pub query_task: Option<JoinHandle<Submission>>,

    // Answer viewport
    pub answer_scroll: u16,
    pub answer_height: u16, // inner height, updated during render

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation
}

impl App {
    pub fn new(submitter: Submitter, endpoint: impl Into<String>) -> Self {
        Self {
            should_quit: false,
            panel: PanelHandle::new(),
            submitter,
            endpoint: endpoint.into(),
            query_task: None,
            answer_scroll: 0,
            answer_height: 0,
            animation_frame: 0,
        }
    }

    /// Whether a press of the Ask control would be accepted right now.
    pub fn can_submit(&self) -> bool {
        let task_running = self
            .query_task
            .as_ref()
            .is_some_and(|task| !task.is_finished());
        !task_running && !self.panel.lock().submit_disabled
    }

    /// Press the Ask control. Ignored while disabled or when the input is
    /// blank; returns whether a submission was started.
    pub fn trigger_submit(&mut self) -> bool {
        if !self.can_submit() {
            debug!("submit control is disabled, ignoring trigger");
            return false;
        }
        if Query::parse(&self.panel.lock().input).is_none() {
            debug!("ignoring empty query");
            return false;
        }
        self.reap_finished();

        self.answer_scroll = 0;
        self.animation_frame = 0;

        let submitter = self.submitter.clone();
        let panel = self.panel.clone();
        self.query_task = Some(tokio::spawn(async move { submitter.submit(&panel).await }));
        true
    }

    /// Collect the outcome of a finished submission.
    pub fn reap_finished(&mut self) -> Option<Submission> {
        if !self.query_task.as_ref().is_some_and(|task| task.is_finished()) {
            return None;
        }

        let task = self.query_task.take()?;
        match task.now_or_never()? {
            Ok(outcome) => {
                debug!(?outcome, "submission finished");
                Some(outcome)
            }
            Err(err) => {
                warn!(error = %err, "submission task did not complete");
                None
            }
        }
    }

    pub fn tick_animation(&mut self) {
        if self.panel.lock().loading {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.answer_scroll = self.answer_scroll.saturating_add(lines);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.answer_scroll = self.answer_scroll.saturating_sub(lines);
    }

    pub fn page_lines(&self) -> u16 {
        self.answer_height.max(1)
    }

    /// Abort any outstanding request before leaving.
    pub fn shutdown(&mut self) {
        if let Some(task) = self.query_task.take() {
            task.abort();
        }
    }
}
