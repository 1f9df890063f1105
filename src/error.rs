// error.rs
//
// This file defines the SimError type for the simulation core.
// Every error is an author defect in the circuit description: it carries the
// source location of the offending call and is fatal unless the caller used
// one of the `try_*` forms.

use std::panic::Location;
use thiserror::Error;

/// Whether the plain (non-`try_*`) operations enforce usage checks.
///
/// Controlled by the `checks` cargo feature. With checks off, a violation is
/// not detected and produces unspecified values instead of terminating.
pub const CHECKS: bool = cfg!(feature = "checks");

/// Source location captured with `#[track_caller]`.
pub type SourceLocation = &'static Location<'static>;

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("width mismatch: expected {expected} bits, found {found}")]
    WidthMismatch { expected: usize, found: usize },

    #[error("read of unbound Wire<{width}>")]
    UnboundSignal { width: usize },

    #[error("Wire<{width}> bound twice (first bound at {first})")]
    RebindViolation { width: usize, first: SourceLocation },

    #[error("Register<{width}> written twice in one cycle (first write at {first})")]
    DoubleWriteViolation { width: usize, first: SourceLocation },

    #[error("bit range [{hi}:{lo}] out of range for width {width}")]
    OutOfRangeSlice { hi: usize, lo: usize, width: usize },

    #[error("unknown {selector} selector {value}")]
    UnknownSelector { selector: &'static str, value: u32 },

    #[error("combinational loop: Wire<{width}> read while computing its own value")]
    CombinationalLoop { width: usize },
}

/// An error with the location of the call that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {location}")]
pub struct SimError {
    pub kind: ErrorKind,
    pub location: SourceLocation,
}

impl SimError {
    /// Build an error located at the caller.
    #[track_caller]
    pub fn here(kind: ErrorKind) -> Self {
        SimError { kind, location: Location::caller() }
    }

    pub fn from_context(kind: ErrorKind, location: SourceLocation) -> Self {
        SimError { kind, location }
    }

    /// Log the diagnostic and unwind.
    pub fn fatal(self) -> ! {
        tracing::error!(location = %self.location, "{}", self.kind);
        panic!("{}", self)
    }
}

/// Unwrap a checked result, escalating errors through [`SimError::fatal`].
pub(crate) fn or_fatal<T>(result: Result<T, SimError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => err.fatal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_reports_location_and_message() {
        let err = SimError::here(ErrorKind::UnboundSignal { width: 8 });
        let text = err.to_string();
        assert!(text.starts_with("read of unbound Wire<8> at "), "{}", text);
        assert!(text.contains("error.rs"), "{}", text);
    }

    #[test]
    fn test_rebind_message_names_first_site() {
        let first = Location::caller();
        let err = SimError::here(ErrorKind::RebindViolation { width: 4, first });
        assert!(err.to_string().contains(&first.to_string()));
    }

    #[test]
    #[should_panic(expected = "unknown opcode selector 99")]
    fn test_fatal_panics_with_message() {
        SimError::here(ErrorKind::UnknownSelector { selector: "opcode", value: 99 }).fatal();
    }
}
