//! UI collaborators the submitter drives.
//!
//! A front end hands the submitter one handle exposing the four elements it
//! touches: the input, the answer display, the loading indicator and the
//! submit control. Methods take `&self`; implementations share state behind
//! interior mutability the same way page elements are shared handles.

use std::ops::Deref;

pub trait AskView: Send + Sync {
    /// Current raw value of the input field
    fn input_value(&self) -> String;

    /// Replace the displayed answer text verbatim
    fn set_answer_text(&self, text: &str);

    fn set_loading_visible(&self, visible: bool);

    fn set_submit_disabled(&self, disabled: bool);
}

/// Holds a view in the loading state; restores it when dropped.
///
/// Entering shows the indicator, clears the answer and disables the submit
/// control, in that order. Dropping hides the indicator and re-enables the
/// control on every exit path, including a cancelled future.
pub struct LoadingGuard<'a> {
    view: &'a dyn AskView,
}

impl<'a> LoadingGuard<'a> {
    pub fn enter(view: &'a dyn AskView) -> Self {
        view.set_loading_visible(true);
        view.set_answer_text("");
        view.set_submit_disabled(true);
        Self { view }
    }
}

impl<'a> Deref for LoadingGuard<'a> {
    type Target = dyn AskView + 'a;

    fn deref(&self) -> &Self::Target {
        self.view
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.view.set_loading_visible(false);
        self.view.set_submit_disabled(false);
    }
}
