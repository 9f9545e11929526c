use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Focus};
use crate::tui::AppEvent;

const PAGE: u16 = 5;

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
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick_animation(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work regardless of focus
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
            return;
        }
        KeyCode::Tab => {
            app.focus = app.focus.next();
            return;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return;
        }
        KeyCode::PageUp => {
            app.scroll_up(PAGE);
            return;
        }
        KeyCode::PageDown => {
            app.scroll_down(PAGE);
            return;
        }
        _ => {}
    }

    match app.focus {
        Focus::Input => handle_input(app, key),
        Focus::Agent => match key.code {
            KeyCode::Down | KeyCode::Char('j') => app.next_agent(),
            KeyCode::Up | KeyCode::Char('k') => app.prev_agent(),
            KeyCode::Enter => app.focus = Focus::Input,
            _ => {}
        },
        Focus::Model => match key.code {
            KeyCode::Down | KeyCode::Char('j') => app.next_model(),
            KeyCode::Up | KeyCode::Char('k') => app.prev_model(),
            KeyCode::Enter => app.focus = Focus::Input,
            _ => {}
        },
    }
}

fn handle_input(app: &mut App, key: KeyEvent) {
    // Input is disabled while a message is in flight
    if app.loading {
        return;
    }

    match key.code {
        KeyCode::Enter => {
            app.submit();
        }
        KeyCode::Backspace => {
            if app.cursor > 0 {
                app.cursor -= 1;
                let byte_pos = char_to_byte_index(&app.draft, app.cursor);
                app.draft.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.draft.chars().count();
            if app.cursor < char_count {
                let byte_pos = char_to_byte_index(&app.draft, app.cursor);
                app.draft.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.draft.chars().count();
            app.cursor = (app.cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.cursor = 0;
        }
        KeyCode::End => {
            app.cursor = app.draft.chars().count();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.draft.clear();
            app.cursor = 0;
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let byte_pos = char_to_byte_index(&app.draft, app.cursor);
            app.draft.insert(byte_pos, c);
            app.cursor += 1;
        }
        _ => {}
    }
}
