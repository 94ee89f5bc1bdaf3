use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Resize => {}
        AppEvent::Tick => {
            app.tick_animation();
            app.reap_finished();
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter => {
            app.trigger_submit();
        }

        // Answer viewport
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(app.page_lines()),
        KeyCode::PageDown => app.scroll_down(app.page_lines()),

        // Input editing
        KeyCode::Backspace => app.panel.lock().backspace(),
        KeyCode::Delete => app.panel.lock().delete(),
        KeyCode::Left => app.panel.lock().cursor_left(),
        KeyCode::Right => app.panel.lock().cursor_right(),
        KeyCode::Home => app.panel.lock().cursor_home(),
        KeyCode::End => app.panel.lock().cursor_end(),
        KeyCode::Char(c) => app.panel.lock().insert_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{gated_app, wait_for_task};
    use ask_core::Submission;

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        text.chars().for_each(|c| press(app, KeyCode::Char(c)));
    }

    #[tokio::test]
    async fn enter_submits_typed_question() {
        let (mut app, answerer) = gated_app("Mumbai leads revenue");
        answerer.release.notify_one();

        type_text(&mut app, "  top city?  ");
        press(&mut app, KeyCode::Enter);

        assert_eq!(
            wait_for_task(&mut app).await,
            Submission::Answered("Mumbai leads revenue".to_string())
        );
        assert_eq!(app.panel.snapshot().answer, "Mumbai leads revenue");
    }

    #[tokio::test]
    async fn enter_on_blank_input_changes_nothing() {
        for blank in ["", "   ", "\t "] {
            let (mut app, _answerer) = gated_app("unused");
            type_text(&mut app, blank);
            app.panel.lock().answer = "previous answer".to_string();
            app.answer_scroll = 4;
            app.animation_frame = 2;
            let before = app.panel.snapshot();

            press(&mut app, KeyCode::Enter);

            assert!(app.query_task.is_none(), "{blank:?} started a request");
            assert_eq!(app.panel.snapshot(), before);
            assert_eq!(app.answer_scroll, 4, "{blank:?} moved the answer viewport");
            assert_eq!(app.animation_frame, 2);
        }
    }

    #[tokio::test]
    async fn enter_while_disabled_is_ignored() {
        let (mut app, _answerer) = gated_app("unused");
        type_text(&mut app, "question");
        app.panel.lock().submit_disabled = true;

        press(&mut app, KeyCode::Enter);

        assert!(app.query_task.is_none());
    }

    #[test]
    fn quit_keys() {
        let (mut app, _answerer) = gated_app("unused");
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);

        let (mut app, _answerer) = gated_app("unused");
        handle_event(
            &mut app,
            AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        )
        .unwrap();
        assert!(app.should_quit);
        assert!(app.panel.snapshot().input.is_empty());
    }

    #[test]
    fn scrolling_saturates() {
        let (mut app, _answerer) = gated_app("unused");
        app.answer_height = 5;
        press(&mut app, KeyCode::Up);
        assert_eq!(app.answer_scroll, 0);
        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.answer_scroll, 6);
    }
}
