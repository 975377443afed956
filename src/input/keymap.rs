use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::key::Key;

/// 將終端按鍵事件轉為核心按鍵；不認得的組合回傳 `None`
pub fn translate_key_event(event: KeyEvent) -> Option<Key> {
    // Ctrl 組合鍵優先處理
    if event.modifiers == KeyModifiers::CONTROL {
        return match event.code {
            KeyCode::Char('r') => Some(Key::CtrlR),
            KeyCode::Char('x') => Some(Key::CtrlX),
            _ => None,
        };
    }

    match (event.code, event.modifiers) {
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Some(Key::Char(c))
        }
        (KeyCode::Up, KeyModifiers::NONE) => Some(Key::Up),
        (KeyCode::Down, KeyModifiers::NONE) => Some(Key::Down),
        (KeyCode::Left, KeyModifiers::NONE) => Some(Key::Left),
        (KeyCode::Right, KeyModifiers::NONE) => Some(Key::Right),
        (KeyCode::Enter, _) => Some(Key::Enter),
        (KeyCode::Esc, _) => Some(Key::Escape),
        (KeyCode::Backspace, _) => Some(Key::Backspace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_shifted_chars() {
        let plain = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE);
        assert_eq!(translate_key_event(plain), Some(Key::Char('w')));

        let shifted = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(translate_key_event(shifted), Some(Key::Char('D')));
    }

    #[test]
    fn test_ctrl_combos() {
        let redo = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(translate_key_event(redo), Some(Key::CtrlR));

        let exec = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(translate_key_event(exec), Some(Key::CtrlX));

        let unknown = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(translate_key_event(unknown), None);
    }

    #[test]
    fn test_named_keys() {
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(translate_key_event(esc), Some(Key::Escape));

        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(translate_key_event(tab), None);
    }
}
