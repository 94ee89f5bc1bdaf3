//! Shared state of the ask panel.
//!
//! The render loop, the key handler and the in-flight submission all hold a
//! [`PanelHandle`]; the submission drives it through [`AskView`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ask_core::AskView;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panel {
    pub input: String,
    pub cursor: usize, // cursor position in input, in chars
    pub answer: String,
    pub loading: bool,
    pub submit_disabled: bool,
}

impl Panel {
    pub fn insert_char(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.input, self.cursor);
        self.input.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_pos = char_to_byte_index(&self.input, self.cursor);
            self.input.remove(byte_pos);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.input.chars().count() {
            let byte_pos = char_to_byte_index(&self.input, self.cursor);
            self.input.remove(byte_pos);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.input.chars().count());
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.input.chars().count();
    }
}

#[derive(Debug, Clone, Default)]
pub struct PanelHandle(Arc<Mutex<Panel>>);

impl PanelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, Panel> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> Panel {
        self.lock().clone()
    }
}

impl AskView for PanelHandle {
    fn input_value(&self) -> String {
        self.lock().input.clone()
    }

    fn set_answer_text(&self, text: &str) {
        self.lock().answer = text.to_string();
    }

    fn set_loading_visible(&self, visible: bool) {
        self.lock().loading = visible;
    }

    fn set_submit_disabled(&self, disabled: bool) {
        self.lock().submit_disabled = disabled;
    }
}
