use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Refresh,
    PrevBackground,
    NextBackground,
    RandomFact,
    NewComment,
    DeleteAll,
    Rename,
    CycleSort,
    SetMaxCount,
    ScrollUp,
    ScrollDown,
    None,
}

impl Action {
    pub fn from_key(key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Left => Action::PrevBackground,
            KeyCode::Right => Action::NextBackground,
            KeyCode::Char('f') => Action::RandomFact,
            KeyCode::Char('n') => Action::NewComment,
            KeyCode::Char('D') => Action::DeleteAll,
            KeyCode::Char('u') => Action::Rename,
            KeyCode::Char('s') => Action::CycleSort,
            KeyCode::Char('m') => Action::SetMaxCount,
            KeyCode::Up => Action::ScrollUp,
            KeyCode::Down => Action::ScrollDown,
            _ => Action::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn arrows_cycle_backgrounds() {
        let left = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        let right = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(Action::from_key(left), Action::PrevBackground);
        assert_eq!(Action::from_key(right), Action::NextBackground);
    }

    #[test]
    fn delete_needs_capital() {
        assert_eq!(Action::from_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE)), Action::None);
        assert_eq!(Action::from_key(KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT)), Action::DeleteAll);
    }
}
