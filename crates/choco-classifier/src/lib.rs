//! ChocoScript line classifier: matches source lines against the
//! instruction grammar.
//!
//! The grammar is declarative: a fixed table of whole-line-anchored
//! patterns tried in priority order. A line either satisfies exactly one
//! row, yielding an immutable [`ClassifiedInstruction`], or fails with
//! [`choco_types::TranspileError::InstructionSyntax`]. No instruction is
//! ever guessed or defaulted.

mod classifier;
mod grammar;

pub use classifier::{classify, classify_line, ClassifiedInstruction};
