// register.rs
//
// Clocked storage. A Register holds a visible value and a pending value.
// Writes stage the pending value at most once per cycle; reads always see
// the visible value; commit promotes pending to visible.

use std::cell::Cell;
use std::fmt;
use std::panic::Location;
use std::rc::Rc;

use crate::bits::Bits;
use crate::error::{CHECKS, ErrorKind, SimError, SourceLocation, or_fatal};
use crate::width::{self, Word};

#[derive(Default)]
struct RegisterCell {
    current: Cell<Word>,
    pending: Cell<Word>,
    written_at: Cell<Option<SourceLocation>>,
}

/// An edge-triggered register of `N` bits. Starts at zero.
///
/// Like [`Wire`](crate::Wire), this is a shared handle; clones alias the same
/// storage.
pub struct Register<const N: usize> {
    cell: Rc<RegisterCell>,
}

impl<const N: usize> Register<N> {
    pub fn new() -> Self {
        width::assert_width::<N>();
        Register { cell: Rc::new(RegisterCell::default()) }
    }

    /// Stage `value` for the next cycle. Integers wider than `N` bits are
    /// truncated.
    #[track_caller]
    pub fn write(&self, value: impl Into<Bits<N>>) {
        if CHECKS {
            or_fatal(self.try_write(value));
        } else {
            self.cell.written_at.set(Some(Location::caller()));
            self.cell.pending.set(value.into().value());
        }
    }

    #[track_caller]
    pub fn try_write(&self, value: impl Into<Bits<N>>) -> Result<(), SimError> {
        if let Some(first) = self.cell.written_at.get() {
            return Err(SimError::here(ErrorKind::DoubleWriteViolation { width: N, first }));
        }
        self.cell.written_at.set(Some(Location::caller()));
        self.cell.pending.set(value.into().value());
        Ok(())
    }

    /// The value committed at the last cycle boundary.
    pub fn read(&self) -> Bits<N> {
        Bits::new(self.cell.current.get())
    }

    /// The value staged this cycle, if any write happened.
    pub fn pending(&self) -> Option<Bits<N>> {
        self.cell.written_at.get().map(|_| Bits::new(self.cell.pending.get()))
    }

    pub fn is_written(&self) -> bool {
        self.cell.written_at.get().is_some()
    }

    /// Promote the staged value and open the next cycle for writing.
    pub fn commit(&self) {
        // Pending equals current unless something was staged, so the copy is
        // unconditional.
        self.cell.current.set(self.cell.pending.get());
        self.cell.written_at.set(None);
    }
}

impl<const N: usize> Clone for Register<N> {
    fn clone(&self) -> Self {
        Register { cell: Rc::clone(&self.cell) }
    }
}

impl<const N: usize> Default for Register<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for Register<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Register")
            .field("current", &self.read())
            .field("pending", &self.pending())
            .finish()
    }
}
