use crate::types::ParseIdError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical keys and mouse buttons the host can report.
///
/// A closed enumeration: bindings are keyed on these values, never on raw
/// platform scancodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyCode {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Escape,
    Enter,
    Space,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    F1,
    F2,
    F3,
    F12,
    MouseLeft,
    MouseRight,
    MouseMiddle,
}

impl KeyCode {
    /// All key codes, in declaration order. Used for parsing and for
    /// exhaustive UI listings.
    pub const ALL: &'static [KeyCode] = &[
        KeyCode::A,
        KeyCode::B,
        KeyCode::C,
        KeyCode::D,
        KeyCode::E,
        KeyCode::F,
        KeyCode::G,
        KeyCode::H,
        KeyCode::I,
        KeyCode::J,
        KeyCode::K,
        KeyCode::L,
        KeyCode::M,
        KeyCode::N,
        KeyCode::O,
        KeyCode::P,
        KeyCode::Q,
        KeyCode::R,
        KeyCode::S,
        KeyCode::T,
        KeyCode::U,
        KeyCode::V,
        KeyCode::W,
        KeyCode::X,
        KeyCode::Y,
        KeyCode::Z,
        KeyCode::Escape,
        KeyCode::Enter,
        KeyCode::Space,
        KeyCode::Tab,
        KeyCode::Up,
        KeyCode::Down,
        KeyCode::Left,
        KeyCode::Right,
        KeyCode::Home,
        KeyCode::End,
        KeyCode::F1,
        KeyCode::F2,
        KeyCode::F3,
        KeyCode::F12,
        KeyCode::MouseLeft,
        KeyCode::MouseRight,
        KeyCode::MouseMiddle,
    ];

    fn name(&self) -> &'static str {
        match self {
            KeyCode::A => "a",
            KeyCode::B => "b",
            KeyCode::C => "c",
            KeyCode::D => "d",
            KeyCode::E => "e",
            KeyCode::F => "f",
            KeyCode::G => "g",
            KeyCode::H => "h",
            KeyCode::I => "i",
            KeyCode::J => "j",
            KeyCode::K => "k",
            KeyCode::L => "l",
            KeyCode::M => "m",
            KeyCode::N => "n",
            KeyCode::O => "o",
            KeyCode::P => "p",
            KeyCode::Q => "q",
            KeyCode::R => "r",
            KeyCode::S => "s",
            KeyCode::T => "t",
            KeyCode::U => "u",
            KeyCode::V => "v",
            KeyCode::W => "w",
            KeyCode::X => "x",
            KeyCode::Y => "y",
            KeyCode::Z => "z",
            KeyCode::Escape => "escape",
            KeyCode::Enter => "enter",
            KeyCode::Space => "space",
            KeyCode::Tab => "tab",
            KeyCode::Up => "up",
            KeyCode::Down => "down",
            KeyCode::Left => "left",
            KeyCode::Right => "right",
            KeyCode::Home => "home",
            KeyCode::End => "end",
            KeyCode::F1 => "f1",
            KeyCode::F2 => "f2",
            KeyCode::F3 => "f3",
            KeyCode::F12 => "f12",
            KeyCode::MouseLeft => "mouse_left",
            KeyCode::MouseRight => "mouse_right",
            KeyCode::MouseMiddle => "mouse_middle",
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyCode {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        KeyCode::ALL
            .iter()
            .copied()
            .find(|k| k.name() == needle)
            .ok_or_else(|| ParseIdError::UnknownKey(s.to_string()))
    }
}

/// Modifier flags held together with a key. Combinable as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);
    pub const SUPER: Modifiers = Modifiers(8);

    /// Combine two modifier sets.
    pub fn with(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Whether every flag in `other` is also set in `self`.
    pub fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Numeric form used in keybind files.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Parse the numeric form, rejecting bits outside the known flags.
    pub fn from_bits(bits: u8) -> Result<Modifiers, ParseIdError> {
        if bits & !0b1111 != 0 {
            return Err(ParseIdError::UnknownModifier(bits));
        }
        Ok(Modifiers(bits))
    }
}

/// Edge or level condition under which a binding fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    /// Press edge.
    Press,
    /// Release edge.
    Release,
    /// Press edge, then every held-input check until the release edge.
    Hold,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trigger::Press => "press",
            Trigger::Release => "release",
            Trigger::Hold => "hold",
        };
        f.write_str(s)
    }
}

impl FromStr for Trigger {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "press" => Ok(Trigger::Press),
            "release" => Ok(Trigger::Release),
            "hold" => Ok(Trigger::Hold),
            other => Err(ParseIdError::UnknownTrigger(other.to_string())),
        }
    }
}

/// Raw key transition reported by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keycode_display_fromstr_roundtrip() {
        for key in KeyCode::ALL {
            let s = key.to_string();
            let parsed: KeyCode = s.parse().unwrap();
            assert_eq!(parsed, *key);
        }
    }

    #[test]
    fn keycode_parse_is_case_insensitive() {
        assert_eq!("ESCAPE".parse::<KeyCode>().unwrap(), KeyCode::Escape);
        assert_eq!(" w ".parse::<KeyCode>().unwrap(), KeyCode::W);
    }

    #[test]
    fn keycode_parse_unknown_fails() {
        assert!("not_a_key".parse::<KeyCode>().is_err());
    }

    #[test]
    fn modifiers_combine_and_contain() {
        let m = Modifiers::CTRL.with(Modifiers::SHIFT);
        assert!(m.contains(Modifiers::CTRL));
        assert!(m.contains(Modifiers::SHIFT));
        assert!(!m.contains(Modifiers::ALT));
        assert!(m.contains(Modifiers::NONE));
    }

    #[test]
    fn modifiers_from_bits_rejects_unknown() {
        assert!(Modifiers::from_bits(0b1111).is_ok());
        assert!(Modifiers::from_bits(0b1_0000).is_err());
    }

    #[test]
    fn trigger_roundtrip() {
        for t in [Trigger::Press, Trigger::Release, Trigger::Hold] {
            assert_eq!(t.to_string().parse::<Trigger>().unwrap(), t);
        }
    }
}
