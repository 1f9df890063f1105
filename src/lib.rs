//! Cycle-accurate simulation of synchronous digital hardware.
//!
//! Circuits are ordinary Rust structs made of [`Wire`]s (combinational,
//! lazily evaluated, memoized per cycle) and [`Register`]s (clocked, written
//! at most once per cycle, visible after the next commit). A [`Scheduler`]
//! steps a set of [`Module`]s through an evaluate phase and a commit phase
//! every cycle.

extern crate self as cyclesim;

pub mod bits;
pub mod circuits;
pub mod config;
pub mod error;
pub mod harness;
pub mod io_abstraction;
pub mod module;
pub mod ops;
pub mod register;
pub mod rng;
pub mod scheduler;
pub mod signal;
pub mod sync;
pub mod trace;
pub mod width;
pub mod wire;

#[cfg(test)]
mod test_utils;

pub use bits::Bits;
pub use error::{ErrorKind, SimError};
pub use module::{Module, ModuleState};
pub use register::Register;
pub use scheduler::{ModuleId, Scheduler, SchedulerConfig, StopHandle};
pub use signal::{Connect, Signal};
pub use sync::Synchronize;
pub use trace::{Trace, TraceRow};
pub use width::{BitPack, MAX_WIDTH, Word};
pub use wire::Wire;

pub use cyclesim_derive::{ModuleState, Synchronize};

#[cfg(test)]
mod property_tests;
