// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Serial console seen by the user interface task.
//!
//! Output goes through `core::fmt::Write`, so `write!` works directly. Lines end in CRLF for the
//! terminal.

use core::fmt;

pub trait Console: fmt::Write {
    /// Next received byte, if one is already waiting. Never blocks.
    fn read_byte(&mut self) -> Option<u8>;
}

impl<C: Console + ?Sized> Console for &mut C {
    #[inline]
    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }
}
