use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cyclesim::config::{Circuit, Config};
use cyclesim::harness::{AluSession, RegFileSession, Session, run_session};
use cyclesim::io_abstraction::{CommandIo, SystemIo};

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn drive<S: Session>(session: &mut S, config: &Config) -> Result<()> {
    let mut io = SystemIo::new();
    let cycles = run_session(session, &mut io, config.max_cycles).context("session failed")?;
    tracing::debug!(cycles, "session ended");

    if config.trace {
        for line in session.scheduler().trace().report(config.hex) {
            io.write_line(&line)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config);

    let scheduler_config = config.scheduler_config();
    match config.circuit {
        Circuit::Alu => drive(&mut AluSession::new(scheduler_config, config.shuffle), &config),
        Circuit::Regfile => drive(&mut RegFileSession::new(scheduler_config, config.shuffle), &config),
    }
}
