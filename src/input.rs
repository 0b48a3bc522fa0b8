use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    KillPrompt,    // k: pause rendering and pick a process to terminate
    NetworkPanel,  // n: toggle the network panel / request a speed test
    ToggleFreeze,  // f: stop refreshing the view, stay responsive
    CycleTheme,    // t: cycle color theme
    ShowHelp,      // ? or F1: help overlay
    None,
}

pub fn handle_key(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Char('k'), _) => Action::KillPrompt,
        (KeyCode::Char('n'), _) => Action::NetworkPanel,
        (KeyCode::Char('f'), _) => Action::ToggleFreeze,
        (KeyCode::Char('t'), _) => Action::CycleTheme,

        (KeyCode::Char('?'), _)
        | (KeyCode::F(1), _)    => Action::ShowHelp,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn maps_the_dashboard_commands() {
        assert_eq!(handle_key(press('k')), Action::KillPrompt);
        assert_eq!(handle_key(press('n')), Action::NetworkPanel);
        assert_eq!(handle_key(press('f')), Action::ToggleFreeze);
        assert_eq!(handle_key(press('q')), Action::Quit);
        assert_eq!(handle_key(press('x')), Action::None);
    }

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(key), Action::Quit);
    }
}
