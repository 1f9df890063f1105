// circuits/mod.rs
//
// Example circuits built from the simulation core: an ALU, a register file,
// and a command decoder that drives the register file.

pub mod alu;
pub mod decoder;
pub mod regfile;

pub use alu::{Alu, AluInput, AluOutput, Opcode};
pub use decoder::{Decoder, DecoderInput, DecoderOutput};
pub use regfile::{RegFile, RegFileInput, RegFileOutput, RegFilePrivate};
