// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Motor/encoder channel selection.

/// One of the two independent motor + encoder pairs.
///
/// On the serial console, lowercase command letters address channel 1 and uppercase letters
/// address channel 2.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorChannel {
    One,
    Two,
}

impl MotorChannel {
    pub const ALL: [MotorChannel; 2] = [MotorChannel::One, MotorChannel::Two];

    /// Channel picked by the case of an ASCII command letter.
    #[inline]
    pub fn from_case(byte: u8) -> Self {
        if byte.is_ascii_uppercase() {
            MotorChannel::Two
        } else {
            MotorChannel::One
        }
    }

    /// Operator-facing motor number (1 or 2).
    #[inline]
    pub fn number(self) -> u8 {
        match self {
            MotorChannel::One => 1,
            MotorChannel::Two => 2,
        }
    }

    /// Zero-based index into per-channel arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            MotorChannel::One => 0,
            MotorChannel::Two => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_selects_channel() {
        assert_eq!(MotorChannel::from_case(b'p'), MotorChannel::One);
        assert_eq!(MotorChannel::from_case(b'P'), MotorChannel::Two);
        assert_eq!(MotorChannel::Two.number(), 2);
        assert_eq!(MotorChannel::Two.index(), 1);
    }
}
