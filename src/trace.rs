// trace.rs
//
// Per-cycle recording of probed registers. The scheduler samples every probe
// after each commit phase, so a row holds the values visible at the start of
// the next cycle.

use std::fmt;

use crate::register::Register;
use crate::width::Word;

type Probe = Box<dyn Fn() -> Word>;

/// Values of all probes after one commit phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRow {
    pub cycle: u64,
    pub values: Vec<Word>,
}

#[derive(Default)]
pub struct Trace {
    names: Vec<String>,
    probes: Vec<Probe>,
    rows: Vec<TraceRow>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column. Rows recorded before the probe existed are not
    /// back-filled, so probes should be added before the first cycle.
    pub fn probe<const N: usize>(&mut self, name: &str, register: &Register<N>) {
        let register = register.clone();
        self.names.push(name.to_string());
        self.probes.push(Box::new(move || register.read().value()));
    }

    /// Record one row of probe values. Does nothing while there are no
    /// probes.
    pub fn sample(&mut self, cycle: u64) {
        if self.probes.is_empty() {
            return;
        }
        let values = self.probes.iter().map(|probe| probe()).collect();
        self.rows.push(TraceRow { cycle, values });
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn rows(&self) -> &[TraceRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every recorded value of one probe, oldest first.
    pub fn column(&self, name: &str) -> Option<Vec<Word>> {
        let index = self.names.iter().position(|n| n == name)?;
        Some(self.rows.iter().filter_map(|row| row.values.get(index).copied()).collect())
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// One line per recorded cycle.
    pub fn report(&self, hex_mode: bool) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| {
                let parts: Vec<String> = self
                    .names
                    .iter()
                    .zip(&row.values)
                    .map(|(name, value)| {
                        if hex_mode {
                            format!("{} = 0x{:x}", name, value)
                        } else {
                            format!("{} = {}", name, value)
                        }
                    })
                    .collect();
                format!("[{}] {}", row.cycle, parts.join(", "))
            })
            .collect()
    }
}

impl PartialEq for Trace {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names && self.rows == other.rows
    }
}

impl fmt::Debug for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trace").field("names", &self.names).field("rows", &self.rows).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_reads_committed_values() {
        let reg: Register<8> = Register::new();
        let mut trace = Trace::new();
        trace.probe("count", &reg);
        for cycle in 1..=3u64 {
            reg.write(cycle as u32 * 10);
            reg.commit();
            trace.sample(cycle);
        }
        assert_eq!(trace.column("count"), Some(vec![10, 20, 30]));
        assert_eq!(trace.column("missing"), None);
        assert_eq!(trace.rows()[2], TraceRow { cycle: 3, values: vec![30] });
    }

    #[test]
    fn test_report_formats() {
        let a: Register<8> = Register::new();
        let b: Register<1> = Register::new();
        let mut trace = Trace::new();
        trace.probe("out", &a);
        trace.probe("done", &b);
        a.write(255u32);
        b.write(true);
        a.commit();
        b.commit();
        trace.sample(1);
        assert_eq!(trace.report(false), vec!["[1] out = 255, done = 1".to_string()]);
        assert_eq!(trace.report(true), vec!["[1] out = 0xff, done = 0x1".to_string()]);
    }

    #[test]
    fn test_sample_without_probes_records_nothing() {
        let mut trace = Trace::new();
        for cycle in 1..=100u64 {
            trace.sample(cycle);
        }
        assert!(trace.is_empty());
        assert!(trace.report(false).is_empty());
    }
}
