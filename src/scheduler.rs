// scheduler.rs
//
// Discrete-cycle driver. Each cycle runs an evaluate phase over every module,
// then a commit phase over every module and tracked cell. Evaluate order may
// be shuffled to expose same-cycle ordering dependencies in a circuit; commit
// always runs in registration order.

use std::cell::Cell;
use std::rc::Rc;

use crate::module::Module;
use crate::register::Register;
use crate::rng::SimRng;
use crate::sync::Synchronize;
use crate::trace::Trace;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 0x5eed_c10c;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Seed for shuffled evaluate orders.
    pub seed: u64,
    /// Sample probes after every commit phase.
    pub record_trace: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig { seed: DEFAULT_SEED, record_trace: true }
    }
}

/// Position of a module in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleId(usize);

impl ModuleId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Requests the end of an unbounded [`Scheduler::run`].
///
/// Clones share the request, so a handle can be captured by a module or a
/// wire evaluator and triggered from inside a cycle.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    requested: Rc<Cell<bool>>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.requested.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.requested.get()
    }

    fn clear(&self) {
        self.requested.set(false);
    }
}

pub struct Scheduler {
    modules: Vec<Box<dyn Module>>,
    tracked: Vec<Box<dyn Synchronize>>,
    order: Vec<usize>,
    rng: SimRng,
    cycles: u64,
    stop: StopHandle,
    trace: Trace,
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        Scheduler {
            modules: Vec::new(),
            tracked: Vec::new(),
            order: Vec::new(),
            rng: SimRng::new(config.seed),
            cycles: 0,
            stop: StopHandle::default(),
            trace: Trace::new(),
            config,
        }
    }

    /// Take ownership of `module` for the rest of the simulation.
    ///
    /// Keep clones of any cells needed for wiring or inspection before
    /// handing the module over.
    pub fn add<M: Module + 'static>(&mut self, module: M) -> ModuleId {
        let id = ModuleId(self.modules.len());
        tracing::debug!(module = module.name(), index = id.0, "add module");
        self.modules.push(Box::new(module));
        id
    }

    /// Commit free-standing state that no module owns, after the modules.
    pub fn track<S: Synchronize + 'static>(&mut self, state: S) {
        self.tracked.push(Box::new(state));
    }

    /// Record `register` under `name` after every commit phase.
    pub fn probe<const N: usize>(&mut self, name: &str, register: &Register<N>) {
        self.trace.probe(name, register);
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Completed cycles.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn module_names(&self) -> Vec<&'static str> {
        self.modules.iter().map(|m| m.name()).collect()
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Run one cycle with modules evaluated in registration order.
    /// Returns the new cycle count.
    pub fn step(&mut self) -> u64 {
        self.natural_order();
        self.cycle()
    }

    /// Run one cycle with a freshly shuffled evaluate order.
    pub fn step_shuffled(&mut self) -> u64 {
        self.natural_order();
        self.rng.shuffle(&mut self.order);
        self.cycle()
    }

    /// Step until the cycle counter reaches `max_cycles`, or until a stop is
    /// requested when `max_cycles` is 0. A pending stop request also ends a
    /// bounded run early; it is cleared on return.
    ///
    /// Returns the number of cycles this call executed.
    pub fn run(&mut self, max_cycles: u64, shuffle: bool) -> u64 {
        let start = self.cycles;
        tracing::debug!(start, max_cycles, shuffle, modules = self.modules.len(), "run");
        while max_cycles == 0 || self.cycles < max_cycles {
            if self.stop.is_stopped() {
                break;
            }
            if shuffle {
                self.step_shuffled();
            } else {
                self.step();
            }
        }
        self.stop.clear();
        let executed = self.cycles - start;
        tracing::debug!(executed, cycles = self.cycles, "run finished");
        executed
    }

    fn natural_order(&mut self) {
        self.order.clear();
        self.order.extend(0..self.modules.len());
    }

    fn cycle(&mut self) -> u64 {
        self.cycles += 1;
        let _span = tracing::trace_span!("cycle", cycle = self.cycles).entered();

        for &index in &self.order {
            let module = &mut self.modules[index];
            tracing::trace!(module = module.name(), "evaluate");
            module.evaluate();
        }

        for module in &mut self.modules {
            module.commit();
        }
        for state in &mut self.tracked {
            state.sync();
        }

        if self.config.record_trace {
            self.trace.sample(self.cycles);
        }
        self.cycles
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
