use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::app::config::BindsConfig;

/// User commands the deck view understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeckAction {
    Accept,
    Reject,
    Reset,
    Quit,
}

#[derive(Debug)]
pub struct KeyBinds {
    map: HashMap<(KeyModifiers, KeyCode), DeckAction>,
}

impl KeyBinds {
    /// Build from config, returning warnings for bindings that could not be parsed
    pub fn from_config(config: &BindsConfig) -> (Self, Vec<String>) {
        let (map, warnings) = config.build_key_map();
        (Self { map }, warnings)
    }

    pub fn handle_key(&self, key: KeyEvent) -> Option<DeckAction> {
        // Terminals report shifted letters both with and without SHIFT
        let modifiers = match key.code {
            KeyCode::Char(c) if c.is_ascii_uppercase() => key.modifiers | KeyModifiers::SHIFT,
            _ => key.modifiers,
        };
        self.map.get(&(modifiers, key.code)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_binds() -> KeyBinds {
        KeyBinds::from_config(&BindsConfig::default()).0
    }

    #[test]
    fn test_default_bindings() {
        let binds = key_binds();

        let right = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        let left = KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE);
        let reset = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert_eq!(binds.handle_key(right), Some(DeckAction::Accept));
        assert_eq!(binds.handle_key(left), Some(DeckAction::Reject));
        assert_eq!(binds.handle_key(reset), Some(DeckAction::Reset));
        assert_eq!(binds.handle_key(ctrl_c), Some(DeckAction::Quit));
    }

    #[test]
    fn test_unbound_key() {
        let binds = key_binds();
        let key = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(binds.handle_key(key), None);
    }

    #[test]
    fn test_shifted_letter_without_modifier_flag() {
        let config = BindsConfig {
            reset: vec!["shift-r".to_string()],
            ..BindsConfig::default()
        };
        let (binds, _) = KeyBinds::from_config(&config);

        let with_flag = KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT);
        let without_flag = KeyEvent::new(KeyCode::Char('R'), KeyModifiers::NONE);

        assert_eq!(binds.handle_key(with_flag), Some(DeckAction::Reset));
        assert_eq!(binds.handle_key(without_flag), Some(DeckAction::Reset));
    }
}
