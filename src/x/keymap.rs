//! The keyboard mapping: which keysyms each hardware keycode produces.
use crate::{Error, KeySym, Result};

/// The lowest keycode X will ever report.
pub const MIN_KEYCODE: u8 = 8;

/// The unshifted and shifted keysym for every keycode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    syms: Vec<[KeySym; 2]>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            syms: vec![[KeySym::NONE; 2]; 256],
        }
    }
}

impl KeyMap {
    /// Build a KeyMap from a raw X keyboard mapping reply.
    ///
    /// `raw` holds `per_code` keysyms for each keycode starting at [MIN_KEYCODE]. Only
    /// the first two (unshifted and shifted) of each are kept.
    pub fn from_raw(per_code: u8, raw: &[u32]) -> Result<Self> {
        if per_code < 2 {
            return Err(Error::TooFewKeysyms(per_code));
        }

        let mut km = KeyMap::default();
        for (i, chunk) in raw.chunks(per_code as usize).enumerate() {
            let code = MIN_KEYCODE as usize + i;
            if code > u8::MAX as usize || chunk.len() < 2 {
                break;
            }
            km.syms[code] = [KeySym(chunk[0]), KeySym(chunk[1])];
        }

        Ok(km)
    }

    /// Set the keysyms produced by a single keycode.
    pub fn set(&mut self, code: u8, unshifted: KeySym, shifted: KeySym) {
        self.syms[code as usize] = [unshifted, shifted];
    }

    /// The keysym produced by `code`.
    ///
    /// Keycodes with no shifted symbol fall back to their unshifted one.
    pub fn keysym(&self, code: u8, shift: bool) -> KeySym {
        let [unshifted, shifted] = self.syms[code as usize];
        if shift && !shifted.is_none() {
            shifted
        } else {
            unshifted
        }
    }

    /// The first keycode producing `sym`, along with whether shift needs to be held.
    pub fn keycode(&self, sym: KeySym) -> Option<(u8, bool)> {
        if sym.is_none() {
            return None;
        }

        self.syms.iter().enumerate().find_map(|(code, &[k0, k1])| {
            if k0 == sym {
                Some((code as u8, false))
            } else if k1 == sym {
                Some((code as u8, true))
            } else {
                None
            }
        })
    }

    /// The keycode to grab in order to intercept `sym`.
    pub fn grab_code(&self, sym: KeySym) -> Option<u8> {
        if sym.is_none() {
            return None;
        }

        self.syms
            .iter()
            .rposition(|&[k0, k1]| k0 == sym || k1 == sym)
            .map(|code| code as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_test_case::test_case;

    fn keymap() -> KeyMap {
        // keycode 8: a A, keycode 9: 1 !, keycode 10: Return (no shifted sym)
        let raw = [0x61, 0x41, 0, 0x31, 0x21, 0, 0xff0d, 0, 0];

        KeyMap::from_raw(3, &raw).unwrap()
    }

    #[test]
    fn too_few_keysyms_is_an_error() {
        assert!(matches!(
            KeyMap::from_raw(1, &[0x61]),
            Err(Error::TooFewKeysyms(1))
        ));
    }

    #[test_case(8, false, KeySym(0x61); "unshifted")]
    #[test_case(8, true, KeySym(0x41); "shifted")]
    #[test_case(10, true, KeySym(0xff0d); "shift falls back")]
    #[test_case(200, false, KeySym::NONE; "unmapped")]
    #[test]
    fn keysym(code: u8, shift: bool, expected: KeySym) {
        assert_eq!(keymap().keysym(code, shift), expected);
    }

    #[test_case(KeySym(0x31), Some((9, false)); "unshifted")]
    #[test_case(KeySym(0x21), Some((9, true)); "shifted")]
    #[test_case(KeySym(0x7a), None; "missing")]
    #[test_case(KeySym::NONE, None; "none")]
    #[test]
    fn keycode(sym: KeySym, expected: Option<(u8, bool)>) {
        assert_eq!(keymap().keycode(sym), expected);
    }

    #[test]
    fn grab_code_prefers_the_last_matching_keycode() {
        let mut km = keymap();
        km.set(50, KeySym(0x61), KeySym::NONE);

        assert_eq!(km.keycode(KeySym(0x61)), Some((8, false)));
        assert_eq!(km.grab_code(KeySym(0x61)), Some(50));
    }
}
