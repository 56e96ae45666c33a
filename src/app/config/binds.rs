use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::app::binds::DeckAction;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BindsConfig {
    #[serde(default = "BindsConfig::default_accept")]
    pub accept: Vec<String>,
    #[serde(default = "BindsConfig::default_reject")]
    pub reject: Vec<String>,
    #[serde(default = "BindsConfig::default_reset")]
    pub reset: Vec<String>,
    #[serde(default = "BindsConfig::default_quit")]
    pub quit: Vec<String>,
}

impl BindsConfig {
    fn default_accept() -> Vec<String> {
        vec!["right".to_string(), "l".to_string()]
    }

    fn default_reject() -> Vec<String> {
        vec!["left".to_string(), "h".to_string()]
    }

    fn default_reset() -> Vec<String> {
        vec!["r".to_string()]
    }

    fn default_quit() -> Vec<String> {
        vec!["q".to_string(), "esc".to_string(), "ctrl-c".to_string()]
    }

    /// Parse a key string such as `"l"`, `"esc"` or `"ctrl-shift-r"`
    pub fn parse_keybinding(key_str: &str) -> Option<(KeyModifiers, KeyCode)> {
        let key_str = key_str.to_lowercase();

        // Special case for standalone "-" character
        if key_str == "-" {
            return Some((KeyModifiers::NONE, KeyCode::Char('-')));
        }

        let parts: Vec<&str> = key_str.split('-').collect();
        let (key_part, modifier_parts) = parts.split_last()?;

        let mut modifiers = KeyModifiers::NONE;
        for part in modifier_parts {
            match *part {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match *key_part {
            "esc" => KeyCode::Esc,
            "enter" => KeyCode::Enter,
            "backspace" => KeyCode::Backspace,
            "tab" => KeyCode::Tab,
            "delete" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "space" => KeyCode::Char(' '),
            f if f.len() > 1 && f.starts_with('f') => KeyCode::F(f[1..].parse().ok()?),
            c if c.chars().count() == 1 => {
                let ch = c.chars().next()?;
                if modifiers.contains(KeyModifiers::SHIFT) {
                    KeyCode::Char(ch.to_ascii_uppercase())
                } else {
                    KeyCode::Char(ch)
                }
            }
            _ => return None,
        };

        Some((modifiers, code))
    }

    /// Build the key map, returning warnings for bindings that fail to parse
    pub fn build_key_map(&self) -> (HashMap<(KeyModifiers, KeyCode), DeckAction>, Vec<String>) {
        let mut map = HashMap::new();
        let mut warnings = Vec::new();

        let groups = [
            (DeckAction::Accept, &self.accept),
            (DeckAction::Reject, &self.reject),
            (DeckAction::Reset, &self.reset),
            (DeckAction::Quit, &self.quit),
        ];

        for (action, keys) in groups {
            for key in keys {
                match Self::parse_keybinding(key) {
                    Some(binding) => {
                        map.insert(binding, action);
                    }
                    None => warnings.push(format!("Invalid key binding for {:?}: {}", action, key)),
                }
            }
        }

        (map, warnings)
    }
}

impl Default for BindsConfig {
    fn default() -> Self {
        Self {
            accept: Self::default_accept(),
            reject: Self::default_reject(),
            reset: Self::default_reset(),
            quit: Self::default_quit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_named_keys() {
        assert_eq!(
            BindsConfig::parse_keybinding("l"),
            Some((KeyModifiers::NONE, KeyCode::Char('l')))
        );
        assert_eq!(
            BindsConfig::parse_keybinding("Right"),
            Some((KeyModifiers::NONE, KeyCode::Right))
        );
        assert_eq!(
            BindsConfig::parse_keybinding("f5"),
            Some((KeyModifiers::NONE, KeyCode::F(5)))
        );
        assert_eq!(
            BindsConfig::parse_keybinding("-"),
            Some((KeyModifiers::NONE, KeyCode::Char('-')))
        );
    }

    #[test]
    fn test_parse_modifiers() {
        assert_eq!(
            BindsConfig::parse_keybinding("ctrl-c"),
            Some((KeyModifiers::CONTROL, KeyCode::Char('c')))
        );
        assert_eq!(
            BindsConfig::parse_keybinding("shift-r"),
            Some((KeyModifiers::SHIFT, KeyCode::Char('R')))
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(BindsConfig::parse_keybinding("hyper-x"), None);
        assert_eq!(BindsConfig::parse_keybinding("pagesideways"), None);
        assert_eq!(BindsConfig::parse_keybinding("fx"), None);
    }

    #[test]
    fn test_default_key_map() {
        let (map, warnings) = BindsConfig::default().build_key_map();

        assert!(warnings.is_empty());
        assert_eq!(
            map.get(&(KeyModifiers::NONE, KeyCode::Right)),
            Some(&DeckAction::Accept)
        );
        assert_eq!(
            map.get(&(KeyModifiers::NONE, KeyCode::Char('h'))),
            Some(&DeckAction::Reject)
        );
        assert_eq!(
            map.get(&(KeyModifiers::CONTROL, KeyCode::Char('c'))),
            Some(&DeckAction::Quit)
        );
    }

    #[test]
    fn test_invalid_binding_warns() {
        let config = BindsConfig {
            reset: vec!["meta-r".to_string()],
            ..BindsConfig::default()
        };
        let (map, warnings) = config.build_key_map();

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("meta-r"));
        assert!(!map.values().any(|action| *action == DeckAction::Reset));
    }
}
