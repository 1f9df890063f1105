// circuits/regfile.rs
//
// A 32 x 32-bit register file with two registered read ports and one write
// port. Register 0 always reads zero.

use crate::module::Module;
use crate::register::Register;
use crate::wire::Wire;
use crate::{ModuleState, Synchronize};

pub const REGISTER_COUNT: usize = 32;

#[derive(Default, Synchronize)]
pub struct RegFileInput {
    pub rs1_index: Wire<5>,
    pub rs2_index: Wire<5>,
    pub wb_index: Wire<5>,
    pub wb_enable: Wire<1>,
    pub wb_data: Wire<32>,
}

#[derive(Default, Synchronize)]
pub struct RegFileOutput {
    pub rs1_data: Register<32>,
    pub rs2_data: Register<32>,
}

#[derive(Default, Synchronize)]
pub struct RegFilePrivate {
    pub regs: [Register<32>; REGISTER_COUNT],
}

/// Reads appear on the outputs one cycle after the indexes are presented.
/// A write lands at the end of the cycle, so a read of the same index in
/// the same cycle still sees the old contents.
#[derive(Default, ModuleState)]
pub struct RegFile {
    #[input]
    pub input: RegFileInput,
    #[output]
    pub output: RegFileOutput,
    #[private]
    pub state: RegFilePrivate,
}

impl RegFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to one architectural register, for inspection.
    pub fn register(&self, index: usize) -> Option<&Register<32>> {
        self.state.regs.get(index)
    }
}

impl Module for RegFile {
    fn evaluate(&mut self) {
        let regs = &self.state.regs;
        let rs1 = self.input.rs1_index.read().value() as usize;
        let rs2 = self.input.rs2_index.read().value() as usize;
        self.output.rs1_data.write(regs[rs1].read());
        self.output.rs2_data.write(regs[rs2].read());

        let wb_index = self.input.wb_index.read();
        if bool::from(self.input.wb_enable.read()) && wb_index != 0u32 {
            let data = self.input.wb_data.read();
            tracing::trace!(index = wb_index.value(), data = data.value(), "regfile write");
            regs[wb_index.value() as usize].write(data);
        }
    }

    fn name(&self) -> &'static str {
        "regfile"
    }
}
