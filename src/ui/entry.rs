// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Line editor for typing a duty cycle on the serial console.
//!
//! Accepted keys: digits, a `-` only as the first character, a single `.`, DEL (0x7F) to erase
//! the last character, and CR or LF to submit. Everything else is dropped without echo.
//!
//! On submit the kept keystrokes are folded into a number directly (mantissa and power-of-ten
//! divisor), so there is no text parser that can fail: entries without any digit, such as `""`,
//! `"-"`, `"."` or `"-."`, come out as `0.0`.

use heapless::Vec;

use crate::config::DUTY_ENTRY_LEN;

/// ASCII DEL, sent by most terminals for the backspace key.
pub const BACKSPACE: u8 = 0x7F;

/// What the editor did with one keystroke.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EntryEvent {
    /// Key changed the buffer and should be echoed back.
    Echo(u8),
    /// Entry finished with this value.
    Submit(f32),
    /// Key was not accepted.
    Ignored,
}

#[derive(Clone, Debug, Default)]
pub struct DutyEntry {
    keys: Vec<u8, DUTY_ENTRY_LEN>,
}

impl DutyEntry {
    pub const fn new() -> Self {
        Self { keys: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Keystrokes kept so far.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.keys
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Feed one keystroke.
    pub fn push(&mut self, key: u8) -> EntryEvent {
        match key {
            b'0'..=b'9' => self.accept(key),
            b'-' if self.keys.is_empty() => self.accept(key),
            b'.' if !self.keys.contains(&b'.') => self.accept(key),
            BACKSPACE => match self.keys.pop() {
                Some(_) => EntryEvent::Echo(BACKSPACE),
                None => EntryEvent::Ignored,
            },
            b'\r' | b'\n' => EntryEvent::Submit(self.value()),
            _ => EntryEvent::Ignored,
        }
    }

    fn accept(&mut self, key: u8) -> EntryEvent {
        match self.keys.push(key) {
            Ok(()) => EntryEvent::Echo(key),
            Err(_) => EntryEvent::Ignored,
        }
    }

    /// Numeric value of the buffer.
    pub fn value(&self) -> f32 {
        let mut mantissa: u64 = 0;
        let mut divisor: u64 = 1;
        let mut negative = false;
        let mut fraction = false;

        for &key in self.keys.iter() {
            match key {
                b'-' => negative = true,
                b'.' => fraction = true,
                digit => {
                    mantissa = mantissa * 10 + u64::from(digit - b'0');
                    if fraction {
                        divisor *= 10;
                    }
                }
            }
        }

        let magnitude = mantissa as f32 / divisor as f32;
        if negative && mantissa != 0 {
            -magnitude
        } else {
            magnitude
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn typed(keys: &[u8]) -> DutyEntry {
        let mut entry = DutyEntry::new();
        for &k in keys {
            entry.push(k);
        }
        entry
    }

    #[test]
    fn digits_sign_and_point() {
        assert_eq!(typed(b"50").value(), 50.0);
        assert_eq!(typed(b"-12.5").value(), -12.5);
        assert_eq!(typed(b".25").value(), 0.25);
        assert_eq!(typed(b"100.").value(), 100.0);
    }

    #[test]
    fn sign_only_first_and_point_only_once() {
        let entry = typed(b"4-2..5");
        assert_eq!(entry.as_bytes(), b"42.5");

        let entry = typed(b"--7");
        assert_eq!(entry.as_bytes(), b"-7");
    }

    #[test]
    fn backspace_edits_and_reenables_keys() {
        let mut entry = typed(b"1.");
        assert_eq!(entry.push(b'.'), EntryEvent::Ignored);
        assert_eq!(entry.push(BACKSPACE), EntryEvent::Echo(BACKSPACE));
        assert_eq!(entry.push(b'.'), EntryEvent::Echo(b'.'));

        let mut entry = typed(b"-3");
        assert_eq!(entry.push(BACKSPACE), EntryEvent::Echo(BACKSPACE));
        assert_eq!(entry.push(BACKSPACE), EntryEvent::Echo(BACKSPACE));
        assert_eq!(entry.push(BACKSPACE), EntryEvent::Ignored);
        assert_eq!(entry.push(b'-'), EntryEvent::Echo(b'-'));
    }

    #[test]
    fn malformed_entries_submit_zero() {
        for keys in [&b""[..], &b"-"[..], &b"."[..], &b"-."[..]] {
            let mut entry = typed(keys);
            assert_eq!(entry.push(b'\r'), EntryEvent::Submit(0.0));
        }
    }

    #[test]
    fn other_keys_are_dropped() {
        let mut entry = DutyEntry::new();
        assert_eq!(entry.push(b'x'), EntryEvent::Ignored);
        assert_eq!(entry.push(b'+'), EntryEvent::Ignored);
        assert!(entry.is_empty());
        assert_eq!(entry.push(b'7'), EntryEvent::Echo(b'7'));
        assert_eq!(entry.push(b'\n'), EntryEvent::Submit(7.0));
    }

    #[test]
    fn full_buffer_stops_echoing() {
        let mut entry = DutyEntry::new();
        for _ in 0..DUTY_ENTRY_LEN {
            assert_eq!(entry.push(b'1'), EntryEvent::Echo(b'1'));
        }
        assert_eq!(entry.push(b'1'), EntryEvent::Ignored);
        assert_eq!(entry.as_bytes().len(), DUTY_ENTRY_LEN);
    }

    proptest! {
        #[test]
        fn buffer_invariant_holds(keys in proptest::collection::vec(
            prop_oneof![
                Just(b'-'), Just(b'.'), Just(BACKSPACE), Just(b'x'),
                (b'0'..=b'9'),
            ],
            0..64,
        )) {
            let mut entry = DutyEntry::new();
            for k in keys {
                entry.push(k);
                let bytes = entry.as_bytes();
                let minus = bytes.iter().filter(|&&b| b == b'-').count();
                let points = bytes.iter().filter(|&&b| b == b'.').count();
                prop_assert!(minus <= 1);
                prop_assert!(minus == 0 || bytes[0] == b'-');
                prop_assert!(points <= 1);
                prop_assert!(bytes.iter().all(|b| b.is_ascii_digit() || *b == b'-' || *b == b'.'));
            }
        }
    }
}
