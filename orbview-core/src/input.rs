//! Keyboard mapping for the viewer
use crate::transform::ROTATION_STEP;

/// ASCII code the escape key reports
pub const ESCAPE_CODE: u8 = 27;

/// Platform-neutral key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Other,
}

impl Key {
    /// Map a raw ASCII key code
    pub fn from_code(code: u8) -> Self {
        match code {
            ESCAPE_CODE => Key::Escape,
            c if c.is_ascii() => Key::Char(c as char),
            _ => Key::Other,
        }
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        if c.is_ascii() {
            Key::from_code(c as u8)
        } else {
            Key::Char(c)
        }
    }
}

/// What a key press asks the viewer to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    /// Add the deltas (radians) to the rotation angles
    Rotate { dx: f32, dy: f32, dz: f32 },
    Exit,
}

impl KeyAction {
    /// `w/s` pitch, `d/a` yaw, `e/q` roll, escape quits
    pub fn for_key(key: Key) -> Option<Self> {
        let step = ROTATION_STEP;
        let action = match key {
            Key::Char('w') => Self::rotate(step, 0.0, 0.0),
            Key::Char('s') => Self::rotate(-step, 0.0, 0.0),
            Key::Char('d') => Self::rotate(0.0, step, 0.0),
            Key::Char('a') => Self::rotate(0.0, -step, 0.0),
            Key::Char('e') => Self::rotate(0.0, 0.0, step),
            Key::Char('q') => Self::rotate(0.0, 0.0, -step),
            Key::Escape => KeyAction::Exit,
            Key::Char(_) | Key::Other => return None,
        };
        Some(action)
    }

    fn rotate(dx: f32, dy: f32, dz: f32) -> Self {
        KeyAction::Rotate { dx, dy, dz }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_code() {
        assert_eq!(Key::from_code(27), Key::Escape);
        assert_eq!(Key::from('\u{1b}'), Key::Escape);
        assert_eq!(Key::from_code(b'w'), Key::Char('w'));
        assert_eq!(Key::from_code(200), Key::Other);
    }

    #[test]
    fn test_chars_map_like_codes() {
        for code in 0..=127u8 {
            assert_eq!(Key::from(code as char), Key::from_code(code), "code {code}");
        }
        assert_eq!(Key::from('é'), Key::Char('é'));
        assert_eq!(KeyAction::for_key(Key::from(ESCAPE_CODE as char)), Some(KeyAction::Exit));
    }

    #[test]
    fn test_rotation_keys() {
        let step = ROTATION_STEP;
        let cases = [
            ('w', (step, 0.0, 0.0)),
            ('s', (-step, 0.0, 0.0)),
            ('d', (0.0, step, 0.0)),
            ('a', (0.0, -step, 0.0)),
            ('e', (0.0, 0.0, step)),
            ('q', (0.0, 0.0, -step)),
        ];
        for (c, (dx, dy, dz)) in cases {
            assert_eq!(
                KeyAction::for_key(Key::Char(c)),
                Some(KeyAction::Rotate { dx, dy, dz }),
                "key {c}"
            );
        }
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(KeyAction::for_key(Key::Char('W')), None);
        assert_eq!(KeyAction::for_key(Key::Char('x')), None);
        assert_eq!(KeyAction::for_key(Key::Other), None);
        assert_eq!(KeyAction::for_key(Key::Escape), Some(KeyAction::Exit));
    }
}
