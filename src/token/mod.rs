//! Token generation and verification

mod assembler;
mod inspector;
mod options;

pub use assembler::TokenAssembler;
pub use inspector::{TokenInspector, process};
pub use options::{DEFAULT_JTI_SIZE, GenerateOptions, VerifyOptions};
