// module.rs
//
// The module abstraction. Authors write `evaluate`; the commit step comes
// from `#[derive(ModuleState)]`, which traverses the module's input, output
// and private state groups in that order.

/// The derived half of a module: the cycle-boundary commit of all its state.
pub trait ModuleState {
    fn commit(&mut self);
}

/// A unit of hardware stepped by the [`Scheduler`](crate::Scheduler).
///
/// `evaluate` runs once per cycle. It reads input wires and the committed
/// values of registers, and stages register writes on output and private
/// state. It must not depend on another module's writes from the same cycle;
/// those are invisible until the commit phase.
///
/// ```
/// use cyclesim::{Module, ModuleState, Register, Synchronize, Wire};
///
/// #[derive(Default, Synchronize)]
/// struct CounterInput {
///     enable: Wire<1>,
/// }
///
/// #[derive(Default, Synchronize)]
/// struct CounterOutput {
///     count: Register<8>,
/// }
///
/// #[derive(Default, ModuleState)]
/// struct Counter {
///     #[input]
///     input: CounterInput,
///     #[output]
///     output: CounterOutput,
/// }
///
/// impl Module for Counter {
///     fn evaluate(&mut self) {
///         if bool::from(self.input.enable.read()) {
///             self.output.count.write(self.output.count.read() + 1u32);
///         }
///     }
/// }
///
/// let mut counter = Counter::default();
/// counter.input.enable.bind(|| true);
/// counter.evaluate();
/// counter.commit();
/// assert_eq!(counter.output.count.read().value(), 1);
/// ```
pub trait Module: ModuleState {
    fn evaluate(&mut self);

    /// Name used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
