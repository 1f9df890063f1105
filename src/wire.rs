// wire.rs
//
// Combinational signals. A Wire is bound once to an evaluator and computes
// its value lazily: the first read in a cycle runs the evaluator, later reads
// in the same cycle return the memoized value, and the commit phase clears
// the memo.

use std::cell::{Cell, OnceCell};
use std::fmt;
use std::panic::Location;
use std::rc::Rc;

use crate::bits::Bits;
use crate::error::{CHECKS, ErrorKind, SimError, SourceLocation, or_fatal};
use crate::width::{self, Word};

type Evaluator = Box<dyn Fn() -> Word>;

struct Binding {
    evaluate: Evaluator,
    site: SourceLocation,
}

#[derive(Default)]
struct WireCell {
    binding: OnceCell<Binding>,
    cache: Cell<Option<Word>>,
    evaluating: Cell<bool>,
}

/// Clears the in-evaluation flag when the evaluator returns or unwinds.
struct EvaluatingGuard<'a>(&'a Cell<bool>);

impl Drop for EvaluatingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// A combinational value of `N` bits.
///
/// `Wire` is a handle: clones share the same evaluator and memo, which is how
/// evaluator closures in one module read wires owned by another.
pub struct Wire<const N: usize> {
    cell: Rc<WireCell>,
}

impl<const N: usize> Wire<N> {
    /// An unbound wire. Reading it before [`Wire::bind`] is a fatal error.
    pub fn new() -> Self {
        width::assert_width::<N>();
        Wire { cell: Rc::new(WireCell::default()) }
    }

    /// A wire bound to `f` at construction.
    #[track_caller]
    pub fn from_fn<F, T>(f: F) -> Self
    where
        F: Fn() -> T + 'static,
        T: Into<Bits<N>>,
    {
        let wire = Self::new();
        wire.bind(f);
        wire
    }

    /// Bind the evaluator. A wire's source is fixed once bound.
    #[track_caller]
    pub fn bind<F, T>(&self, f: F)
    where
        F: Fn() -> T + 'static,
        T: Into<Bits<N>>,
    {
        let result = self.try_bind(f);
        if CHECKS {
            or_fatal(result);
        }
    }

    #[track_caller]
    pub fn try_bind<F, T>(&self, f: F) -> Result<(), SimError>
    where
        F: Fn() -> T + 'static,
        T: Into<Bits<N>>,
    {
        let site = Location::caller();
        if let Some(first) = self.cell.binding.get() {
            return Err(SimError::from_context(
                ErrorKind::RebindViolation { width: N, first: first.site },
                site,
            ));
        }
        let binding = Binding { evaluate: Box::new(move || f().into().value()), site };
        // Emptiness was checked above.
        let _ = self.cell.binding.set(binding);
        self.cell.cache.set(None);
        Ok(())
    }

    pub fn is_bound(&self) -> bool {
        self.cell.binding.get().is_some()
    }

    /// Whether a value is memoized for the current cycle.
    pub fn is_cached(&self) -> bool {
        self.cell.cache.get().is_some()
    }

    /// The wire's value for the current cycle.
    #[track_caller]
    pub fn read(&self) -> Bits<N> {
        if CHECKS {
            return or_fatal(self.try_read());
        }
        if let Some(value) = self.cell.cache.get() {
            return Bits::new(value);
        }
        let value = self.cell.binding.get().map_or(0, |b| (b.evaluate)());
        self.cell.cache.set(Some(value));
        Bits::new(value)
    }

    #[track_caller]
    pub fn try_read(&self) -> Result<Bits<N>, SimError> {
        if let Some(value) = self.cell.cache.get() {
            return Ok(Bits::new(value));
        }
        let Some(binding) = self.cell.binding.get() else {
            return Err(SimError::here(ErrorKind::UnboundSignal { width: N }));
        };
        if self.cell.evaluating.replace(true) {
            return Err(SimError::here(ErrorKind::CombinationalLoop { width: N }));
        }
        let value = {
            let _guard = EvaluatingGuard(&self.cell.evaluating);
            (binding.evaluate)()
        };
        self.cell.cache.set(Some(value));
        Ok(Bits::new(value))
    }

    /// Drop the memoized value so the next read recomputes.
    pub fn reset_cache(&self) {
        self.cell.cache.set(None);
    }
}

impl<const N: usize> Clone for Wire<N> {
    fn clone(&self) -> Self {
        Wire { cell: Rc::clone(&self.cell) }
    }
}

impl<const N: usize> Default for Wire<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for Wire<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wire")
            .field("width", &N)
            .field("bound", &self.is_bound())
            .field("cache", &self.cell.cache.get())
            .finish()
    }
}
