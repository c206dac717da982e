//! Event polling and key dispatch.

use super::App;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Application event
#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// No input within the tick rate
    Tick,
    Resize(u16, u16),
}

/// Event handler
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub const fn new(tick_rate: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Event, std::io::Error> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) => Ok(Event::Key(key)),
                CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(250)
    }
}

/// Handle key events and update app state
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_tab(),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.prev_tab(),
        KeyCode::Char(c @ '1'..='5') => {
            app.select_tab((c as usize) - ('1' as usize));
        }
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::remediation::Advisor;
    use crate::reports::HumanReport;
    use crate::tui::Tab;
    use serde_json::json;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::from(code));
    }

    #[test]
    fn test_keys() {
        let raw = json!({"api": [{"title": "x", "severity": "warning"}, {"title": "y", "severity": "medium"}]});
        let mut app = App::new(HumanReport::build(&normalize(&raw), &Advisor::builtin()));

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.active_tab, Tab::Medium);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected(), 1);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected(), 0);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_tab, Tab::Info);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.active_tab, Tab::Medium);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = App::new(HumanReport::build(&normalize(&json!({})), &Advisor::builtin()));
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }
}
