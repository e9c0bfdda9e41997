// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Single-slot shared cell.
//!
//! A [`Share`] holds one `Copy` value. Writes replace it, reads return the latest one (or the
//! type's default if nothing was written yet). There is no queue, no lock and no allocation: all
//! tasks run on one thread of control and only ever interleave between `run()` calls, so a value
//! is never observed half-written.
//!
//! The one-writer rule is enforced by the borrow checker. [`Share::split`] takes `&mut self` and
//! hands out a single [`Writer`] plus a `Copy` [`Reader`]; while they are alive nothing else can
//! touch the cell.
//!
//! ```
//! use dualdrive::sync::Share;
//!
//! let mut position = Share::new(0i32);
//! let (writer, reader) = position.split();
//! writer.write(42);
//! assert_eq!(reader.read(), 42);
//! ```

use core::cell::Cell;

pub struct Share<T: Copy> {
    cell: Cell<T>,
}

impl<T: Copy> Share<T> {
    pub const fn new(value: T) -> Self {
        Self {
            cell: Cell::new(value),
        }
    }

    /// Most recently written value.
    #[inline]
    pub fn read(&self) -> T {
        self.cell.get()
    }

    /// Replace the stored value.
    #[inline]
    pub fn write(&self, value: T) {
        self.cell.set(value);
    }

    /// Split into the one writer handle and a reader handle.
    ///
    /// Further readers are made by copying the returned [`Reader`].
    pub fn split(&mut self) -> (Writer<'_, T>, Reader<'_, T>) {
        let cell = &self.cell;
        (Writer { cell }, Reader { cell })
    }
}

impl<T: Copy + Default> Default for Share<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Write side of a [`Share`]. Not `Clone`: one per cell.
pub struct Writer<'a, T: Copy> {
    cell: &'a Cell<T>,
}

impl<'a, T: Copy> Writer<'a, T> {
    #[inline]
    pub fn write(&self, value: T) {
        self.cell.set(value);
    }

    /// The writer may read back its own value.
    #[inline]
    pub fn read(&self) -> T {
        self.cell.get()
    }

    /// A reader onto the same cell.
    #[inline]
    pub fn reader(&self) -> Reader<'a, T> {
        Reader { cell: self.cell }
    }
}

/// Read side of a [`Share`].
pub struct Reader<'a, T: Copy> {
    cell: &'a Cell<T>,
}

impl<T: Copy> Reader<'_, T> {
    #[inline]
    pub fn read(&self) -> T {
        self.cell.get()
    }
}

impl<T: Copy> Clone for Reader<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Copy> Copy for Reader<'_, T> {}
