// circuits/alu.rs
//
// A single-cycle 32-bit ALU with the RV32 integer operations plus the
// SGE/SGEU/SEQ/SNEQ comparisons.

use std::fmt;
use std::panic::Location;

use crate::bits::Bits;
use crate::error::{CHECKS, ErrorKind, SimError};
use crate::module::Module;
use crate::register::Register;
use crate::wire::Wire;
use crate::{ModuleState, Synchronize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Add,
    Sub,
    Sll,
    Srl,
    Sra,
    And,
    Or,
    Xor,
    Slt,
    Sltu,
    Sge,
    Sgeu,
    Seq,
    Sneq,
}

impl Opcode {
    /// Every opcode, indexed by its encoding.
    pub const ALL: [Opcode; 14] = [
        Opcode::Add,
        Opcode::Sub,
        Opcode::Sll,
        Opcode::Srl,
        Opcode::Sra,
        Opcode::And,
        Opcode::Or,
        Opcode::Xor,
        Opcode::Slt,
        Opcode::Sltu,
        Opcode::Sge,
        Opcode::Sgeu,
        Opcode::Seq,
        Opcode::Sneq,
    ];

    pub fn encoding(self) -> Bits<8> {
        Bits::new(self as u32)
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Sll => "sll",
            Opcode::Srl => "srl",
            Opcode::Sra => "sra",
            Opcode::And => "and",
            Opcode::Or => "or",
            Opcode::Xor => "xor",
            Opcode::Slt => "slt",
            Opcode::Sltu => "sltu",
            Opcode::Sge => "sge",
            Opcode::Sgeu => "sgeu",
            Opcode::Seq => "seq",
            Opcode::Sneq => "sneq",
        }
    }

    pub fn from_mnemonic(name: &str) -> Option<Opcode> {
        Opcode::ALL.into_iter().find(|op| op.mnemonic() == name)
    }

    /// The combinational result of this operation.
    pub fn apply(self, rs1: Bits<32>, rs2: Bits<32>) -> Bits<32> {
        match self {
            Opcode::Add => rs1 + rs2,
            Opcode::Sub => rs1 - rs2,
            Opcode::Sll => rs1 << rs2,
            Opcode::Srl => rs1 >> rs2,
            Opcode::Sra => rs1.sra(rs2),
            Opcode::And => rs1 & rs2,
            Opcode::Or => rs1 | rs2,
            Opcode::Xor => rs1 ^ rs2,
            Opcode::Slt => Bits::from(rs1.lt_signed(rs2)),
            Opcode::Sltu => Bits::from(rs1 < rs2),
            Opcode::Sge => Bits::from(rs1.ge_signed(rs2)),
            Opcode::Sgeu => Bits::from(rs1 >= rs2),
            Opcode::Seq => Bits::from(rs1 == rs2),
            Opcode::Sneq => Bits::from(rs1 != rs2),
        }
    }
}

impl TryFrom<Bits<8>> for Opcode {
    type Error = SimError;

    #[track_caller]
    fn try_from(value: Bits<8>) -> Result<Self, Self::Error> {
        let site = Location::caller();
        Opcode::ALL.get(value.value() as usize).copied().ok_or_else(|| {
            SimError::from_context(ErrorKind::UnknownSelector { selector: "opcode", value: value.value() }, site)
        })
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[derive(Default, Synchronize)]
pub struct AluInput {
    pub opcode: Wire<8>,
    pub issue: Wire<1>,
    pub rs1: Wire<32>,
    pub rs2: Wire<32>,
}

#[derive(Default, Synchronize)]
pub struct AluOutput {
    pub out: Register<32>,
    pub done: Register<1>,
}

/// When `issue` is high, `out` takes the result and `done` rises for one
/// cycle. Otherwise `done` falls and `out` holds.
#[derive(Default, ModuleState)]
pub struct Alu {
    #[input]
    pub input: AluInput,
    #[output]
    pub output: AluOutput,
}

impl Alu {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Module for Alu {
    fn evaluate(&mut self) {
        if !bool::from(self.input.issue.read()) {
            self.output.done.write(false);
            return;
        }
        let opcode = match Opcode::try_from(self.input.opcode.read()) {
            Ok(opcode) => opcode,
            Err(err) if CHECKS => err.fatal(),
            Err(_) => {
                self.output.done.write(false);
                return;
            }
        };
        let result = opcode.apply(self.input.rs1.read(), self.input.rs2.read());
        tracing::trace!(%opcode, result = result.value(), "alu");
        self.output.out.write(result);
        self.output.done.write(true);
    }

    fn name(&self) -> &'static str {
        "alu"
    }
}
