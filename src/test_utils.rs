pub mod test_helpers {
    use crate::harness::{Session, run_session};
    use crate::io_abstraction::TestIo;
    use crate::scheduler::{Scheduler, SchedulerConfig};
    use crate::signal::Connect;
    use crate::width::Word;
    use crate::{Module, ModuleState, Register, Synchronize, Wire};

    #[derive(Default, Synchronize)]
    pub struct CounterInput {
        pub enable: Wire<1>,
    }

    #[derive(Default, Synchronize)]
    pub struct CounterOutput {
        pub count: Register<8>,
    }

    /// Increments `count` every cycle `enable` is high.
    #[derive(Default, ModuleState)]
    pub struct Counter {
        #[input]
        pub input: CounterInput,
        #[output]
        pub output: CounterOutput,
    }

    impl Module for Counter {
        fn evaluate(&mut self) {
            if bool::from(self.input.enable.read()) {
                let next = self.output.count.read() + 1u32;
                self.output.count.write(next);
            }
        }
    }

    pub fn create_counter(enabled: bool) -> Counter {
        let counter = Counter::default();
        counter.input.enable.bind(move || enabled);
        counter
    }

    #[derive(Default, Synchronize)]
    pub struct StageInput {
        pub source: Wire<16>,
    }

    #[derive(Default, Synchronize)]
    pub struct StageOutput {
        pub value: Register<16>,
    }

    /// `value <= source + delta`. `delta` is plain data outside every state
    /// group.
    #[derive(ModuleState)]
    pub struct Stage {
        #[input]
        pub input: StageInput,
        #[output]
        pub output: StageOutput,
        pub delta: Word,
    }

    impl Module for Stage {
        fn evaluate(&mut self) {
            self.output.value.write(self.input.source.read() + self.delta);
        }
    }

    /// A ring of `depth` stages, each reading its predecessor's register.
    /// Returns the scheduler and a handle to every stage's output.
    pub fn create_ring(depth: usize, config: SchedulerConfig) -> (Scheduler, Vec<Register<16>>) {
        let stages: Vec<Stage> = (0..depth)
            .map(|i| Stage {
                input: StageInput::default(),
                output: StageOutput::default(),
                delta: i as Word + 1,
            })
            .collect();
        for (i, stage) in stages.iter().enumerate() {
            let previous = &stages[(i + depth - 1) % depth];
            stage.input.source.connect(&previous.output.value);
        }

        let outputs: Vec<Register<16>> = stages.iter().map(|s| s.output.value.clone()).collect();
        let mut scheduler = Scheduler::with_config(config);
        for (i, output) in outputs.iter().enumerate() {
            scheduler.probe(&format!("stage{}", i), output);
        }
        for stage in stages {
            scheduler.add(stage);
        }
        (scheduler, outputs)
    }

    /// Run `input` through `session` and collect everything it printed.
    pub fn session_output<S: Session>(session: &mut S, input: &str) -> Vec<String> {
        let mut io = TestIo::new().with_input(input);
        run_session(session, &mut io, 0).unwrap();
        io.output
    }

    pub fn assert_lines(actual: &[String], expected: &[&str]) {
        let actual: Vec<&str> = actual.iter().map(String::as_str).collect();
        assert_eq!(actual, expected, "output mismatch");
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use crate::scheduler::SchedulerConfig;

    #[test]
    fn test_create_counter() {
        let mut scheduler = crate::Scheduler::new();
        let counter = create_counter(true);
        let count = counter.output.count.clone();
        scheduler.add(counter);
        scheduler.run(3, false);
        assert_eq!(count.read().value(), 3);
    }

    #[test]
    fn test_create_ring() {
        let (mut scheduler, outputs) = create_ring(3, SchedulerConfig::default());
        assert_eq!(scheduler.len(), 3);
        scheduler.step();
        let values: Vec<u32> = outputs.iter().map(|r| r.read().value()).collect();
        assert_eq!(values, vec![1, 2, 3]);
        scheduler.step();
        let values: Vec<u32> = outputs.iter().map(|r| r.read().value()).collect();
        assert_eq!(values, vec![3 + 1, 1 + 2, 2 + 3]);
    }
}
