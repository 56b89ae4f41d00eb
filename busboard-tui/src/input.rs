use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Fetch the weather now instead of waiting for the next scheduled refresh
    RefreshWeather,
}

pub(crate) fn handle_key_event(key: KeyEvent) -> Action {
    use KeyCode::{Char, Esc};

    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if !key.modifiers.is_empty() && key.modifiers != KeyModifiers::SHIFT {
        return Action::None;
    }

    match key.code {
        Char('q') | Esc => Action::Quit,
        Char('r' | 'R') => Action::RefreshWeather,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn quit_and_refresh_keys() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Action::Quit
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Esc, KeyModifiers::NONE)),
            Action::Quit
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('R'), KeyModifiers::SHIFT)),
            Action::RefreshWeather
        );
    }

    #[test]
    fn modified_keys_are_ignored() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('r'), KeyModifiers::ALT)),
            Action::None
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('x'), KeyModifiers::NONE)),
            Action::None
        );
    }
}
