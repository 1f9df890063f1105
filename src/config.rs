// config.rs
//
// Configuration and CLI argument parsing for the cyclesim demo binary

use clap::{ArgAction, Parser, Subcommand};

use crate::scheduler::{DEFAULT_SEED, SchedulerConfig};

/// Cycle-accurate hardware simulation demos.
#[derive(Debug, Parser)]
#[command(name = "cyclesim", version, about)]
pub struct Config {
    #[command(subcommand)]
    pub circuit: Circuit,

    /// Evaluate modules in a freshly shuffled order every cycle.
    #[arg(long, global = true)]
    pub shuffle: bool,

    /// Seed for shuffled evaluation orders.
    #[arg(long, global = true, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Stop after this many cycles (0 runs until input ends).
    #[arg(long, global = true, default_value_t = 0)]
    pub max_cycles: u64,

    /// Print the probed registers for every cycle when the session ends.
    #[arg(long, global = true)]
    pub trace: bool,

    /// Show trace values in hexadecimal.
    #[arg(long, global = true)]
    pub hex: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Circuit {
    /// ALU calculator: `<op> <rs1> <rs2>` per line, e.g. `add 3 4`.
    Alu,
    /// Register file: `w <index> <value>` or `r <index> <index>` per line.
    Regfile,
}

impl Config {
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig { seed: self.seed, record_trace: self.trace }
    }

    /// Log filter used when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}
