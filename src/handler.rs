use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::App;
use crate::tui::AppEvent;

const PAGE: u16 = 10;
const WHEEL_STEP: u16 = 3;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick_animation(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.chat_open {
        handle_chat_key(app, key);
    } else {
        handle_site_key(app, key);
    }
}

fn handle_site_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Advisor launcher
        KeyCode::Char('c') | KeyCode::Tab => app.open_chat(),

        KeyCode::Char('j') | KeyCode::Down => app.scroll_site_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_site_up(1),
        KeyCode::PageDown => app.scroll_site_down(PAGE),
        KeyCode::PageUp => app.scroll_site_up(PAGE),
        KeyCode::Char('g') | KeyCode::Home => app.site_scroll = 0,

        _ => {}
    }
}

fn handle_chat_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_chat(),
        KeyCode::Enter => app.submit_query(),

        // Transcript scrolling
        KeyCode::Up => app.scroll_chat_up(1),
        KeyCode::Down => app.scroll_chat_down(1),
        KeyCode::PageUp => app.scroll_chat_up(PAGE),
        KeyCode::PageDown => app.scroll_chat_down(PAGE),

        // Input editing
        KeyCode::Backspace => {
            if app.query_cursor > 0 {
                app.query_cursor -= 1;
                let byte_pos = char_to_byte_index(&app.query_input, app.query_cursor);
                app.query_input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.query_input.chars().count();
            if app.query_cursor < char_count {
                let byte_pos = char_to_byte_index(&app.query_input, app.query_cursor);
                app.query_input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.query_cursor = app.query_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.query_input.chars().count();
            app.query_cursor = (app.query_cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.query_cursor = 0;
        }
        KeyCode::End => {
            app.query_cursor = app.query_input.chars().count();
        }
        KeyCode::Char(c)
            if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            let byte_pos = char_to_byte_index(&app.query_input, app.query_cursor);
            app.query_input.insert(byte_pos, c);
            app.query_cursor += 1;
        }
        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let in_chat = app.chat_open
        && app
            .chat_area
            .map(|r| point_in_rect(mouse.column, mouse.row, r))
            .unwrap_or(false);

    match mouse.kind {
        MouseEventKind::ScrollDown if in_chat => app.scroll_chat_down(WHEEL_STEP),
        MouseEventKind::ScrollUp if in_chat => app.scroll_chat_up(WHEEL_STEP),
        MouseEventKind::ScrollDown => app.scroll_site_down(WHEEL_STEP),
        MouseEventKind::ScrollUp => app.scroll_site_up(WHEEL_STEP),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyEventKind, KeyEventState};

    use super::*;
    use crate::advice::testing::ScriptedBackend;
    use crate::app::tests::{app_with, settle, GREETING};

    fn press(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_event(app, press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn char_index_handles_multibyte_text() {
        let s = "مرحبا";
        assert_eq!(char_to_byte_index(s, 0), 0);
        assert_eq!(char_to_byte_index(s, 1), 2);
        assert_eq!(char_to_byte_index(s, 10), s.len());
    }

    #[tokio::test]
    async fn typing_and_enter_submits_question() {
        let mut app = app_with(Arc::new(ScriptedBackend::replying("ثمانية أسابيع")));
        handle_event(&mut app, press(KeyCode::Char('c')));
        assert!(app.chat_open);

        type_text(&mut app, "كم المدة؟");
        handle_event(&mut app, press(KeyCode::Enter));

        assert!(app.is_pending());
        assert!(app.query_input.is_empty());
        assert_eq!(app.session.transcript().last().unwrap().text(), "كم المدة؟");

        settle(&mut app).await;
        assert_eq!(app.session.transcript().last().unwrap().text(), "ثمانية أسابيع");
    }

    #[tokio::test]
    async fn enter_while_pending_does_nothing() {
        let mut app = app_with(Arc::new(ScriptedBackend::replying("answer")));
        handle_event(&mut app, press(KeyCode::Tab));
        type_text(&mut app, "one");
        handle_event(&mut app, press(KeyCode::Enter));
        type_text(&mut app, "two");
        handle_event(&mut app, press(KeyCode::Enter));

        assert_eq!(app.session.transcript().len(), 2);
        assert_eq!(app.query_input, "two");
        settle(&mut app).await;
    }

    #[tokio::test]
    async fn cursor_editing_is_utf8_safe() {
        let mut app = app_with(Arc::new(ScriptedBackend::replying("unused")));
        app.open_chat();
        type_text(&mut app, "أهلا");
        handle_event(&mut app, press(KeyCode::Left));
        handle_event(&mut app, press(KeyCode::Backspace));
        assert_eq!(app.query_input, "أها");

        handle_event(&mut app, press(KeyCode::Home));
        handle_event(&mut app, press(KeyCode::Delete));
        assert_eq!(app.query_input, "ها");

        handle_event(&mut app, press(KeyCode::End));
        type_text(&mut app, "!");
        assert_eq!(app.query_input, "ها!");
    }

    #[tokio::test]
    async fn q_types_into_chat_but_quits_from_site() {
        let mut app = app_with(Arc::new(ScriptedBackend::replying("unused")));
        app.open_chat();
        handle_event(&mut app, press(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.query_input, "q");

        handle_event(&mut app, press(KeyCode::Esc));
        assert!(!app.chat_open);
        handle_event(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn ctrl_c_quits_from_chat() {
        let mut app = app_with(Arc::new(ScriptedBackend::replying("unused")));
        app.open_chat();
        handle_event(
            &mut app,
            AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        );
        assert!(app.should_quit);
        assert_eq!(app.session.transcript().turns()[0].text(), GREETING);
    }

    #[tokio::test]
    async fn modified_chars_are_not_typed() {
        let mut app = app_with(Arc::new(ScriptedBackend::replying("unused")));
        app.open_chat();
        type_text(&mut app, "hi");

        for key in [
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
            KeyEvent::new(KeyCode::Char('b'), KeyModifiers::ALT),
        ] {
            handle_event(&mut app, AppEvent::Key(key));
        }

        assert_eq!(app.query_input, "hi");
        assert_eq!(app.query_cursor, 2);

        handle_event(
            &mut app,
            AppEvent::Key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)),
        );
        assert_eq!(app.query_input, "hiA");
    }
}
