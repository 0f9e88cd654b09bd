//! Short display labels for input codes.
//!
//! Purely presentational: labels have no effect on binding validity.

use std::borrow::Cow;

use super::KeyCode;

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

impl KeyCode {
    /// Returns a short human-readable label suitable for a key-binding button.
    ///
    /// Punctuation becomes its character, keypad keys read `Num n`,
    /// control and modifier keys get abbreviations, auxiliary buttons get
    /// generic `Button n` labels, and letters and function keys keep their
    /// name.
    ///
    /// # Example
    ///
    /// ```
    /// use settings_entry::keycode::KeyCode;
    ///
    /// assert_eq!(KeyCode::COMMA.label(), ",");
    /// assert_eq!(KeyCode::KEYPAD7.label(), "Num 7");
    /// assert_eq!(KeyCode::LEFT_CONTROL.label(), "LCtrl");
    /// assert_eq!(KeyCode::Q.label(), "Q");
    /// ```
    #[must_use]
    pub fn label(self) -> Cow<'static, str> {
        if let Some(label) = symbol_label(self.0).or_else(|| short_label(self.0)) {
            return Cow::Borrowed(label);
        }

        match self.0 {
            48..=57 => Cow::Borrowed(DIGITS[(self.0 - 48) as usize]),
            256..=265 => Cow::Owned(format!("Num {}", self.0 - 256)),
            323..=329 => Cow::Owned(format!("Mouse {}", self.0 - 323)),
            _ => match self.auxiliary_button() {
                Some((0, button)) => Cow::Owned(format!("Button {button}")),
                Some((device, button)) => Cow::Owned(format!("Pad {device} Button {button}")),
                None => self
                    .name()
                    .map_or_else(|| Cow::Owned(self.0.to_string()), Cow::Borrowed),
            },
        }
    }
}

/// Single-character labels for printable symbols.
const fn symbol_label(code: i32) -> Option<&'static str> {
    let label = match code {
        33 => "!",
        34 => "\"",
        35 => "#",
        36 => "$",
        37 => "%",
        38 => "&",
        39 => "'",
        40 => "(",
        41 => ")",
        42 => "*",
        43 => "+",
        44 => ",",
        45 => "-",
        46 => ".",
        47 => "/",
        58 => ":",
        59 => ";",
        60 => "<",
        61 => "=",
        62 => ">",
        63 => "?",
        64 => "@",
        91 => "[",
        92 => "\\",
        93 => "]",
        94 => "^",
        95 => "_",
        96 => "`",
        123 => "{",
        124 => "|",
        125 => "}",
        126 => "~",
        _ => return None,
    };
    Some(label)
}

/// Abbreviations for control, navigation, keypad-operator and modifier keys.
const fn short_label(code: i32) -> Option<&'static str> {
    let label = match code {
        8 => "Bksp",
        9 => "Tab",
        12 => "Clear",
        13 => "Enter",
        19 => "Pause",
        27 => "Esc",
        32 => "Space",
        127 => "Del",
        266 => "Num .",
        267 => "Num /",
        268 => "Num *",
        269 => "Num -",
        270 => "Num +",
        271 => "Num Enter",
        272 => "Num =",
        273 => "Up",
        274 => "Down",
        275 => "Right",
        276 => "Left",
        277 => "Ins",
        278 => "Home",
        279 => "End",
        280 => "PgUp",
        281 => "PgDn",
        300 => "NumLk",
        301 => "Caps",
        302 => "ScrLk",
        303 => "RShift",
        304 => "LShift",
        305 => "RCtrl",
        306 => "LCtrl",
        307 => "RAlt",
        308 => "LAlt",
        309 => "RCmd",
        310 => "LCmd",
        311 => "LWin",
        312 => "RWin",
        313 => "AltGr",
        316 => "PrtSc",
        317 => "SysRq",
        _ => return None,
    };
    Some(label)
}
