//! Bindable input codes.
//!
//! [`KeyCode`] covers the full symbolic input domain of the host: keyboard
//! keys, pointer buttons and auxiliary (game controller) buttons, each
//! identified by a stable integer. The integer is what gets persisted.
//!
//! - [`KeyCode::group`] / [`KeyCode::is_bindable`] classify codes for binding
//! - [`KeyCode::label`] produces short presentation labels

mod classify;
mod label;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use classify::KeyGroup;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::store::{Persist, StoreValue};

/// A symbolic input code.
///
/// Any `i32` can be represented so that unknown persisted data survives a
/// round trip; only codes from the named domain are ever bindable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub i32);

macro_rules! key_codes {
    ($($konst:ident = $value:literal => $name:literal,)*) => {
        impl KeyCode {
            $(pub const $konst: Self = Self($value);)*
        }

        /// Symbolic names of every named code, in ascending code order.
        const NAMED_KEYS: &[(KeyCode, &str)] = &[$((KeyCode::$konst, $name),)*];
    };
}

key_codes! {
    NONE = 0 => "None",
    BACKSPACE = 8 => "Backspace",
    TAB = 9 => "Tab",
    CLEAR = 12 => "Clear",
    RETURN = 13 => "Return",
    PAUSE = 19 => "Pause",
    ESCAPE = 27 => "Escape",
    SPACE = 32 => "Space",
    EXCLAIM = 33 => "Exclaim",
    DOUBLE_QUOTE = 34 => "DoubleQuote",
    HASH = 35 => "Hash",
    DOLLAR = 36 => "Dollar",
    PERCENT = 37 => "Percent",
    AMPERSAND = 38 => "Ampersand",
    QUOTE = 39 => "Quote",
    LEFT_PAREN = 40 => "LeftParen",
    RIGHT_PAREN = 41 => "RightParen",
    ASTERISK = 42 => "Asterisk",
    PLUS = 43 => "Plus",
    COMMA = 44 => "Comma",
    MINUS = 45 => "Minus",
    PERIOD = 46 => "Period",
    SLASH = 47 => "Slash",
    ALPHA0 = 48 => "Alpha0",
    ALPHA1 = 49 => "Alpha1",
    ALPHA2 = 50 => "Alpha2",
    ALPHA3 = 51 => "Alpha3",
    ALPHA4 = 52 => "Alpha4",
    ALPHA5 = 53 => "Alpha5",
    ALPHA6 = 54 => "Alpha6",
    ALPHA7 = 55 => "Alpha7",
    ALPHA8 = 56 => "Alpha8",
    ALPHA9 = 57 => "Alpha9",
    COLON = 58 => "Colon",
    SEMICOLON = 59 => "Semicolon",
    LESS = 60 => "Less",
    EQUALS = 61 => "Equals",
    GREATER = 62 => "Greater",
    QUESTION = 63 => "Question",
    AT = 64 => "At",
    LEFT_BRACKET = 91 => "LeftBracket",
    BACKSLASH = 92 => "Backslash",
    RIGHT_BRACKET = 93 => "RightBracket",
    CARET = 94 => "Caret",
    UNDERSCORE = 95 => "Underscore",
    BACK_QUOTE = 96 => "BackQuote",
    A = 97 => "A",
    B = 98 => "B",
    C = 99 => "C",
    D = 100 => "D",
    E = 101 => "E",
    F = 102 => "F",
    G = 103 => "G",
    H = 104 => "H",
    I = 105 => "I",
    J = 106 => "J",
    K = 107 => "K",
    L = 108 => "L",
    M = 109 => "M",
    N = 110 => "N",
    O = 111 => "O",
    P = 112 => "P",
    Q = 113 => "Q",
    R = 114 => "R",
    S = 115 => "S",
    T = 116 => "T",
    U = 117 => "U",
    V = 118 => "V",
    W = 119 => "W",
    X = 120 => "X",
    Y = 121 => "Y",
    Z = 122 => "Z",
    LEFT_CURLY_BRACKET = 123 => "LeftCurlyBracket",
    PIPE = 124 => "Pipe",
    RIGHT_CURLY_BRACKET = 125 => "RightCurlyBracket",
    TILDE = 126 => "Tilde",
    DELETE = 127 => "Delete",
    KEYPAD0 = 256 => "Keypad0",
    KEYPAD1 = 257 => "Keypad1",
    KEYPAD2 = 258 => "Keypad2",
    KEYPAD3 = 259 => "Keypad3",
    KEYPAD4 = 260 => "Keypad4",
    KEYPAD5 = 261 => "Keypad5",
    KEYPAD6 = 262 => "Keypad6",
    KEYPAD7 = 263 => "Keypad7",
    KEYPAD8 = 264 => "Keypad8",
    KEYPAD9 = 265 => "Keypad9",
    KEYPAD_PERIOD = 266 => "KeypadPeriod",
    KEYPAD_DIVIDE = 267 => "KeypadDivide",
    KEYPAD_MULTIPLY = 268 => "KeypadMultiply",
    KEYPAD_MINUS = 269 => "KeypadMinus",
    KEYPAD_PLUS = 270 => "KeypadPlus",
    KEYPAD_ENTER = 271 => "KeypadEnter",
    KEYPAD_EQUALS = 272 => "KeypadEquals",
    UP_ARROW = 273 => "UpArrow",
    DOWN_ARROW = 274 => "DownArrow",
    RIGHT_ARROW = 275 => "RightArrow",
    LEFT_ARROW = 276 => "LeftArrow",
    INSERT = 277 => "Insert",
    HOME = 278 => "Home",
    END = 279 => "End",
    PAGE_UP = 280 => "PageUp",
    PAGE_DOWN = 281 => "PageDown",
    F1 = 282 => "F1",
    F2 = 283 => "F2",
    F3 = 284 => "F3",
    F4 = 285 => "F4",
    F5 = 286 => "F5",
    F6 = 287 => "F6",
    F7 = 288 => "F7",
    F8 = 289 => "F8",
    F9 = 290 => "F9",
    F10 = 291 => "F10",
    F11 = 292 => "F11",
    F12 = 293 => "F12",
    F13 = 294 => "F13",
    F14 = 295 => "F14",
    F15 = 296 => "F15",
    NUMLOCK = 300 => "Numlock",
    CAPS_LOCK = 301 => "CapsLock",
    SCROLL_LOCK = 302 => "ScrollLock",
    RIGHT_SHIFT = 303 => "RightShift",
    LEFT_SHIFT = 304 => "LeftShift",
    RIGHT_CONTROL = 305 => "RightControl",
    LEFT_CONTROL = 306 => "LeftControl",
    RIGHT_ALT = 307 => "RightAlt",
    LEFT_ALT = 308 => "LeftAlt",
    RIGHT_COMMAND = 309 => "RightCommand",
    LEFT_COMMAND = 310 => "LeftCommand",
    LEFT_WINDOWS = 311 => "LeftWindows",
    RIGHT_WINDOWS = 312 => "RightWindows",
    ALT_GR = 313 => "AltGr",
    HELP = 315 => "Help",
    PRINT = 316 => "Print",
    SYS_REQ = 317 => "SysReq",
    BREAK = 318 => "Break",
    MENU = 319 => "Menu",
    MOUSE0 = 323 => "Mouse0",
    MOUSE1 = 324 => "Mouse1",
    MOUSE2 = 325 => "Mouse2",
    MOUSE3 = 326 => "Mouse3",
    MOUSE4 = 327 => "Mouse4",
    MOUSE5 = 328 => "Mouse5",
    MOUSE6 = 329 => "Mouse6",
}

/// Alternative spellings accepted by [`KeyCode::from_str`].
const ALIASES: &[(&str, KeyCode)] = &[
    ("RightApple", KeyCode::RIGHT_COMMAND),
    ("LeftApple", KeyCode::LEFT_COMMAND),
];

impl KeyCode {
    /// First generic auxiliary button ("any controller" button 0).
    pub const JOYSTICK_BUTTON_0: Self = Self(330);

    /// Number of buttons addressable per auxiliary device.
    pub const BUTTONS_PER_DEVICE: i32 = 20;

    /// Number of individually addressable auxiliary devices.
    pub const DEVICE_COUNT: i32 = 8;

    const DEVICE_BUTTONS_START: i32 = 350;
    const DEVICE_BUTTONS_END: i32 =
        Self::DEVICE_BUTTONS_START + Self::DEVICE_COUNT * Self::BUTTONS_PER_DEVICE - 1;

    /// Returns the generic auxiliary button `button` (0-19).
    #[must_use]
    pub const fn joystick_button(button: u8) -> Option<Self> {
        if (button as i32) < Self::BUTTONS_PER_DEVICE {
            Some(Self(Self::JOYSTICK_BUTTON_0.0 + button as i32))
        } else {
            None
        }
    }

    /// Returns button `button` (0-19) of auxiliary device `device` (1-8).
    #[must_use]
    pub const fn device_button(device: u8, button: u8) -> Option<Self> {
        let device = device as i32;
        let button = button as i32;
        if device >= 1
            && device <= Self::DEVICE_COUNT
            && button < Self::BUTTONS_PER_DEVICE
        {
            Some(Self(
                Self::DEVICE_BUTTONS_START + (device - 1) * Self::BUTTONS_PER_DEVICE + button,
            ))
        } else {
            None
        }
    }

    /// Returns the raw integer code.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Returns the symbolic name of a named code.
    ///
    /// Auxiliary buttons are not named here; see the `Display` impl.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        NAMED_KEYS
            .binary_search_by_key(&self, |(code, _)| *code)
            .ok()
            .map(|index| NAMED_KEYS[index].1)
    }

    /// Decomposes an auxiliary button into `(device, button)`.
    ///
    /// Device `0` stands for the generic "any device" buttons.
    #[must_use]
    pub const fn auxiliary_button(self) -> Option<(i32, i32)> {
        let code = self.0;
        if code >= Self::JOYSTICK_BUTTON_0.0 && code < Self::DEVICE_BUTTONS_START {
            Some((0, code - Self::JOYSTICK_BUTTON_0.0))
        } else if code >= Self::DEVICE_BUTTONS_START && code <= Self::DEVICE_BUTTONS_END {
            let offset = code - Self::DEVICE_BUTTONS_START;
            Some((
                offset / Self::BUTTONS_PER_DEVICE + 1,
                offset % Self::BUTTONS_PER_DEVICE,
            ))
        } else {
            None
        }
    }

    /// Returns `true` if the code belongs to the symbolic domain.
    #[must_use]
    pub fn is_known(self) -> bool {
        self.name().is_some() || self.auxiliary_button().is_some()
    }

    /// Iterates over every code in the symbolic domain, in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        NAMED_KEYS.iter().map(|(code, _)| *code).chain(
            (Self::JOYSTICK_BUTTON_0.0..=Self::DEVICE_BUTTONS_END).map(Self),
        )
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }
        match self.auxiliary_button() {
            Some((0, button)) => write!(f, "JoystickButton{button}"),
            Some((device, button)) => write!(f, "Joystick{device}Button{button}"),
            None => write!(f, "KeyCode({})", self.0),
        }
    }
}

/// Error returned when text does not name a [`KeyCode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown key code '{0}'")]
pub struct ParseKeyCodeError(pub String);

impl FromStr for KeyCode {
    type Err = ParseKeyCodeError;

    /// Parses a symbolic name (case-insensitive), an auxiliary button name
    /// (`JoystickButton3`, `Joystick2Button5`) or a raw integer code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Ok(raw) = trimmed.parse::<i32>() {
            return Ok(Self(raw));
        }

        let named = NAMED_KEYS
            .iter()
            .map(|(code, name)| (*name, *code))
            .chain(ALIASES.iter().copied())
            .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
            .map(|(_, code)| code);

        named
            .or_else(|| parse_auxiliary(trimmed))
            .ok_or_else(|| ParseKeyCodeError(s.to_string()))
    }
}

/// Parses `JoystickButtonN` and `JoystickKButtonN` (case-insensitive).
fn parse_auxiliary(s: &str) -> Option<KeyCode> {
    let lower = s.to_ascii_lowercase();
    let rest = lower.strip_prefix("joystick")?;

    if let Some(button) = rest.strip_prefix("button") {
        return KeyCode::joystick_button(button.parse().ok()?);
    }

    let (device, button) = rest.split_once("button")?;
    KeyCode::device_button(device.parse().ok()?, button.parse().ok()?)
}

impl Persist for KeyCode {
    const KIND: &'static str = "key code";

    fn to_store(&self) -> StoreValue {
        StoreValue::Int(i64::from(self.0))
    }

    fn from_store(value: &StoreValue) -> Option<Self> {
        match value {
            StoreValue::Int(v) => i32::try_from(*v).ok().map(Self),
            _ => None,
        }
    }
}
