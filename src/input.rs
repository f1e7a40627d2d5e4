use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

/// What a raw key event means to the game
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),
    Backspace,
    /// A key with a multi-character name; typed literally and never matches
    Named(&'static str),
    Ignored,
    /// New sentence
    Restart,
    /// Same sentence from the start
    Retry,
    Quit,
}

impl From<KeyEvent> for Keystroke {
    fn from(key: KeyEvent) -> Self {
        if key.kind != KeyEventKind::Press {
            return Keystroke::Ignored;
        }

        // AltGr arrives as Ctrl+Alt on Windows and still types a character
        let chord = key.modifiers.contains(KeyModifiers::CONTROL)
            && !key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Esc => Keystroke::Quit,
            KeyCode::Char('c') if chord => Keystroke::Quit,
            KeyCode::Char('n') if chord => Keystroke::Restart,
            KeyCode::Char('r') if chord => Keystroke::Retry,
            KeyCode::Char(_) if chord => Keystroke::Ignored,
            KeyCode::Char(c) => Keystroke::Char(c),
            KeyCode::Backspace => Keystroke::Backspace,
            KeyCode::Modifier(modifier) => modifier_key(modifier),
            KeyCode::Enter => Keystroke::Named("Enter"),
            KeyCode::Tab | KeyCode::BackTab => Keystroke::Named("Tab"),
            KeyCode::Left => Keystroke::Named("ArrowLeft"),
            KeyCode::Right => Keystroke::Named("ArrowRight"),
            KeyCode::Up => Keystroke::Named("ArrowUp"),
            KeyCode::Down => Keystroke::Named("ArrowDown"),
            KeyCode::Home => Keystroke::Named("Home"),
            KeyCode::End => Keystroke::Named("End"),
            KeyCode::PageUp => Keystroke::Named("PageUp"),
            KeyCode::PageDown => Keystroke::Named("PageDown"),
            KeyCode::Delete => Keystroke::Named("Delete"),
            KeyCode::Insert => Keystroke::Named("Insert"),
            KeyCode::F(_) => Keystroke::Named("Function"),
            _ => Keystroke::Ignored,
        }
    }
}

fn modifier_key(modifier: ModifierKeyCode) -> Keystroke {
    match modifier {
        ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => Keystroke::Ignored,
        ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => Keystroke::Named("Control"),
        ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => Keystroke::Named("Alt"),
        _ => Keystroke::Named("Meta"),
    }
}
