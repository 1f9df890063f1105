// circuits/decoder.rs
//
// Turns a register-file command into register-file control signals.
// A write command `(write = 1, a = index, b = data)` drives the write port;
// a read command `(write = 0, a = rs1, b = rs2)` drives the read ports.

use crate::module::Module;
use crate::register::Register;
use crate::wire::Wire;
use crate::{ModuleState, Synchronize};

#[derive(Default, Synchronize)]
pub struct DecoderInput {
    /// A command is present this cycle.
    pub valid: Wire<1>,
    pub write: Wire<1>,
    pub a: Wire<32>,
    pub b: Wire<32>,
    /// Read data coming back from the register file.
    pub rs1_data: Wire<32>,
    pub rs2_data: Wire<32>,
}

#[derive(Default, Synchronize)]
pub struct DecoderOutput {
    pub rs1_index: Register<5>,
    pub rs2_index: Register<5>,
    pub wb_index: Register<5>,
    pub wb_data: Register<32>,
    pub wb_enable: Register<1>,
}

#[derive(Default, ModuleState)]
pub struct Decoder {
    #[input]
    pub input: DecoderInput,
    #[output]
    pub output: DecoderOutput,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Module for Decoder {
    fn evaluate(&mut self) {
        let out = &self.output;
        let valid = bool::from(self.input.valid.read());
        let write = valid && bool::from(self.input.write.read());
        let (a, b) = if valid {
            (self.input.a.read().value(), self.input.b.read().value())
        } else {
            (0, 0)
        };

        if write {
            out.rs1_index.write(0u32);
            out.rs2_index.write(0u32);
            out.wb_index.write(a);
            out.wb_data.write(b);
            out.wb_enable.write(true);
        } else {
            out.rs1_index.write(a);
            out.rs2_index.write(b);
            out.wb_index.write(0u32);
            out.wb_data.write(0u32);
            out.wb_enable.write(false);
        }
    }

    fn name(&self) -> &'static str {
        "decoder"
    }
}
