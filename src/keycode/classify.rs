//! Allow/deny classification of input codes for key bindings.

use super::KeyCode;

/// Broad family an input code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyGroup {
    /// `A`-`Z`.
    Letter,
    /// Top-row digits `Alpha0`-`Alpha9`.
    Digit,
    /// `F1`-`F15`.
    Function,
    /// Numeric pad digits and operators.
    Keypad,
    /// Printable symbols.
    Punctuation,
    /// Editing, whitespace and cursor movement keys.
    Navigation,
    /// Shift/Control/Alt/Command/Windows and the lock keys.
    Modifier,
    /// Help, Print, `SysReq`, Break, Menu.
    System,
    /// Mouse buttons.
    Pointer,
    /// Buttons of whichever controller is pressed ("any device").
    Auxiliary,
    /// Buttons of one specific controller.
    DeviceAuxiliary,
}

impl KeyCode {
    /// Returns the family of a known code, or `None` for `NONE` and
    /// codes outside the symbolic domain.
    #[must_use]
    pub const fn group(self) -> Option<KeyGroup> {
        let group = match self.0 {
            97..=122 => KeyGroup::Letter,
            48..=57 => KeyGroup::Digit,
            282..=296 => KeyGroup::Function,
            256..=272 => KeyGroup::Keypad,
            33..=47 | 58..=64 | 91..=96 | 123..=126 => KeyGroup::Punctuation,
            8 | 9 | 12 | 13 | 19 | 27 | 32 | 127 | 273..=281 => KeyGroup::Navigation,
            300..=313 => KeyGroup::Modifier,
            315..=319 => KeyGroup::System,
            323..=329 => KeyGroup::Pointer,
            330..=349 => KeyGroup::Auxiliary,
            350..=509 => KeyGroup::DeviceAuxiliary,
            _ => return None,
        };
        Some(group)
    }

    /// Returns `true` if the code may be assigned to a key binding.
    ///
    /// Rejected outright:
    /// - `NONE` and `ESCAPE` (reserved: no key, and the menu key)
    /// - `MOUSE0` and `MOUSE1` (primary and secondary click)
    /// - per-device auxiliary buttons (only "any device" buttons bind)
    /// - anything outside the symbolic domain
    #[must_use]
    pub const fn is_bindable(self) -> bool {
        if self.is_reserved() {
            return false;
        }
        match self.group() {
            Some(KeyGroup::Pointer) => !matches!(self.0, 323 | 324),
            Some(KeyGroup::DeviceAuxiliary) | None => false,
            Some(_) => true,
        }
    }

    /// Returns `true` for codes that can never be bound.
    #[must_use]
    pub const fn is_reserved(self) -> bool {
        matches!(self.0, 0 | 27)
    }
}
