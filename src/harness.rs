// harness.rs
//
// Text-driven demo sessions. Each command line sets program variables, the
// scheduler steps once, and register values are printed. Program variables
// reach the circuit only through wire bindings.

use std::cell::Cell;
use std::io;
use std::rc::Rc;

use thiserror::Error;

use crate::circuits::regfile::REGISTER_COUNT;
use crate::circuits::{Alu, Decoder, Opcode, RegFile};
use crate::io_abstraction::CommandIo;
use crate::register::Register;
use crate::scheduler::{Scheduler, SchedulerConfig};
use crate::signal::Connect;
use crate::width::Word;
use crate::wire::Wire;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("expected {expected} operands, found {found}")]
    Operands { expected: usize, found: usize },

    #[error("invalid number {0:?}")]
    Number(String),

    #[error("unknown command {0:?}")]
    Command(String),

    #[error("register index {0} out of range")]
    Index(Word),
}

/// A program variable visible to the circuit through wire bindings.
#[derive(Clone, Default)]
struct Variable(Rc<Cell<Word>>);

impl Variable {
    fn set(&self, value: impl Into<Word>) {
        self.0.set(value.into());
    }

    fn drive<const N: usize>(&self, wire: &Wire<N>) {
        let cell = Rc::clone(&self.0);
        wire.bind(move || cell.get());
    }
}

/// Parse a decimal, `0x` hexadecimal, or negative decimal operand.
pub fn parse_number(text: &str) -> Result<Word, HarnessError> {
    let parsed = if let Some(hex) = text.strip_prefix("0x") {
        Word::from_str_radix(hex, 16).ok()
    } else if text.starts_with('-') {
        text.parse::<i32>().ok().map(|v| v as Word)
    } else {
        text.parse::<Word>().ok()
    };
    parsed.ok_or_else(|| HarnessError::Number(text.to_string()))
}

fn operands(words: &[&str], expected: usize) -> Result<Vec<Word>, HarnessError> {
    if words.len() != expected {
        return Err(HarnessError::Operands { expected, found: words.len() });
    }
    words.iter().map(|w| parse_number(w)).collect()
}

/// One interactive circuit driven by command lines.
pub trait Session {
    /// Apply one command and step the circuit. Returns the lines to print.
    fn execute(&mut self, line: &str) -> Result<Vec<String>, HarnessError>;

    fn scheduler(&self) -> &Scheduler;
}

/// Feed every line from `io` to `session` until input ends or the cycle
/// counter reaches `max_cycles` (0 for no limit). Command errors are
/// reported and the session continues; I/O errors end it.
pub fn run_session<S, IO>(session: &mut S, io: &mut IO, max_cycles: u64) -> Result<u64, HarnessError>
where
    S: Session,
    IO: CommandIo,
{
    while max_cycles == 0 || session.scheduler().cycles() < max_cycles {
        let Some(line) = io.read_line()? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        match session.execute(&line) {
            Ok(lines) => {
                for out in lines {
                    io.write_line(&out)?;
                }
            }
            Err(HarnessError::Io(err)) => return Err(HarnessError::Io(err)),
            Err(err) => {
                tracing::warn!(%line, "{}", err);
                io.write_line(&format!("error: {}", err))?;
            }
        }
    }
    Ok(session.scheduler().cycles())
}

fn step(scheduler: &mut Scheduler, shuffle: bool) -> u64 {
    if shuffle { scheduler.step_shuffled() } else { scheduler.step() }
}

/// Calculator over the [`Alu`]: `<mnemonic> <rs1> <rs2>` prints the result.
pub struct AluSession {
    scheduler: Scheduler,
    shuffle: bool,
    opcode: Variable,
    issue: Variable,
    rs1: Variable,
    rs2: Variable,
    out: Register<32>,
    done: Register<1>,
}

impl AluSession {
    pub fn new(config: SchedulerConfig, shuffle: bool) -> Self {
        let alu = Alu::new();
        let (opcode, issue, rs1, rs2): (Variable, Variable, Variable, Variable) = Default::default();
        opcode.drive(&alu.input.opcode);
        issue.drive(&alu.input.issue);
        rs1.drive(&alu.input.rs1);
        rs2.drive(&alu.input.rs2);

        let out = alu.output.out.clone();
        let done = alu.output.done.clone();
        let mut scheduler = Scheduler::with_config(config);
        scheduler.probe("out", &out);
        scheduler.probe("done", &done);
        scheduler.add(alu);

        AluSession { scheduler, shuffle, opcode, issue, rs1, rs2, out, done }
    }

    pub fn out(&self) -> Word {
        self.out.read().value()
    }

    pub fn done(&self) -> bool {
        bool::from(self.done.read())
    }
}

impl Session for AluSession {
    fn execute(&mut self, line: &str) -> Result<Vec<String>, HarnessError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&mnemonic, rest)) = words.split_first() else {
            return Ok(Vec::new());
        };
        let values = operands(rest, 2)?;
        self.rs1.set(values[0]);
        self.rs2.set(values[1]);

        let mut lines = Vec::new();
        match Opcode::from_mnemonic(mnemonic) {
            Some(op) => {
                self.opcode.set(op.encoding());
                self.issue.set(true);
            }
            None => {
                lines.push("Invalid opcode".to_string());
                self.issue.set(false);
            }
        }

        step(&mut self.scheduler, self.shuffle);
        lines.push(self.out().to_string());
        Ok(lines)
    }

    fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}

/// A [`Decoder`] feeding a [`RegFile`]: `w <index> <value>` writes,
/// `r <index> <index>` reads. Every command prints the read ports as the
/// decoder sees them during that cycle.
pub struct RegFileSession {
    scheduler: Scheduler,
    shuffle: bool,
    valid: Variable,
    write: Variable,
    a: Variable,
    b: Variable,
    rs1_data: Wire<32>,
    rs2_data: Wire<32>,
    regs: [Register<32>; REGISTER_COUNT],
}

impl RegFileSession {
    pub fn new(config: SchedulerConfig, shuffle: bool) -> Self {
        let decoder = Decoder::new();
        let regfile = RegFile::new();

        let (valid, write, a, b): (Variable, Variable, Variable, Variable) = Default::default();
        valid.drive(&decoder.input.valid);
        write.drive(&decoder.input.write);
        a.drive(&decoder.input.a);
        b.drive(&decoder.input.b);

        let control = &decoder.output;
        regfile.input.rs1_index.connect(&control.rs1_index);
        regfile.input.rs2_index.connect(&control.rs2_index);
        regfile.input.wb_index.connect(&control.wb_index);
        regfile.input.wb_enable.connect(&control.wb_enable);
        regfile.input.wb_data.connect(&control.wb_data);
        decoder.input.rs1_data.connect(&regfile.output.rs1_data);
        decoder.input.rs2_data.connect(&regfile.output.rs2_data);

        let rs1_data = decoder.input.rs1_data.clone();
        let rs2_data = decoder.input.rs2_data.clone();
        let regs = regfile.state.regs.clone();

        let mut scheduler = Scheduler::with_config(config);
        scheduler.probe("rs1_data", &regfile.output.rs1_data);
        scheduler.probe("rs2_data", &regfile.output.rs2_data);
        scheduler.add(decoder);
        scheduler.add(regfile);

        RegFileSession { scheduler, shuffle, valid, write, a, b, rs1_data, rs2_data, regs }
    }

    /// Committed contents of register `index`.
    pub fn register(&self, index: usize) -> Option<Word> {
        self.regs.get(index).map(|r| r.read().value())
    }

    fn index(value: Word) -> Result<Word, HarnessError> {
        if value as usize >= REGISTER_COUNT {
            return Err(HarnessError::Index(value));
        }
        Ok(value)
    }
}

impl Session for RegFileSession {
    fn execute(&mut self, line: &str) -> Result<Vec<String>, HarnessError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, rest)) = words.split_first() else {
            return Ok(Vec::new());
        };
        let values = operands(rest, 2)?;
        let (a, b) = match command {
            "w" => (Self::index(values[0])?, values[1]),
            "r" => (Self::index(values[0])?, Self::index(values[1])?),
            other => return Err(HarnessError::Command(other.to_string())),
        };
        self.valid.set(true);
        self.write.set(command == "w");
        self.a.set(a);
        self.b.set(b);

        // Read before stepping so the printed values are the ones visible
        // during this cycle.
        let lines = vec![
            format!("rs1_data: {}", self.rs1_data.read()),
            format!("rs2_data: {}", self.rs2_data.read()),
        ];
        step(&mut self.scheduler, self.shuffle);
        Ok(lines)
    }

    fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}
