//! Shared types for the ChocoScript transpiler.
//!
//! This crate defines the instruction set, the depth-annotated program
//! handed to the code generator, source text handling, and the error
//! taxonomy used across all pipeline stages.

mod error;
mod instruction;
mod source;

pub use error::{BlockImbalance, TranspileError};
pub use instruction::{BlockKind, Instruction, Program, ProgramInstruction};
pub use source::{SourceFile, SourceLine};

/// Result type used throughout the transpiler.
pub type Result<T> = std::result::Result<T, TranspileError>;
