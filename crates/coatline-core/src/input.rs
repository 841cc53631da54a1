use crate::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool, // Cmd on Mac, Win key on Windows
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Enter,
    Tab,
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Space,
    Other(String),
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` string.
    pub fn from_dom(key: &str) -> Key {
        match key {
            "Enter" => Key::Enter,
            "Tab" => Key::Tab,
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "Home" => Key::Home,
            "End" => Key::End,
            " " => Key::Space,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Character(c),
                    _ => Key::Other(other.to_string()),
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub is_repeat: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            is_repeat: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Minimum travel, in px, before a pointer drag counts as a swipe.
pub const SWIPE_MIN_DISTANCE: f32 = 50.0;

/// Classifies a completed drag from `start` to `end`; short drags are taps.
pub fn swipe_direction(start: Vec2, end: Vec2) -> Option<SwipeDirection> {
    let d = end - start;
    if d.length() <= SWIPE_MIN_DISTANCE {
        return None;
    }
    let dir = if d.x.abs() > d.y.abs() {
        if d.x > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        }
    } else if d.y > 0.0 {
        SwipeDirection::Down
    } else {
        SwipeDirection::Up
    };
    Some(dir)
}
