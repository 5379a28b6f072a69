//! The transpilation error taxonomy.
//!
//! Every variant is fatal to the attempt: the engine is a pure function of
//! the source text, so retrying an identical invocation is pointless; the
//! caller must fix the source. The driver renders these (plain or as JSON);
//! it must not parse free-form strings.

use crate::BlockKind;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The specific way block nesting failed to validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "detail", rename_all = "snake_case")]
pub enum BlockImbalance {
    /// A close instruction arrived with no block open.
    CloseWithoutOpen,
    /// The close does not match the innermost open frame's kind.
    KindMismatch { expected: BlockKind },
    /// A block was opened and never closed.
    UnclosedAtEof,
}

impl fmt::Display for BlockImbalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CloseWithoutOpen => write!(f, "close without a matching open"),
            Self::KindMismatch { expected } => {
                write!(f, "expected `{}`", expected.close_keyword())
            }
            Self::UnclosedAtEof => write!(f, "block is never closed"),
        }
    }
}

/// Errors reported by the transpilation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum TranspileError {
    /// A line matching no row of the instruction grammar. No instruction is
    /// ever guessed or defaulted.
    #[error("line {line}: unrecognised instruction `{text}`")]
    InstructionSyntax { line: u32, text: String },

    /// A close with no matching open, a close whose kind mismatches the
    /// innermost open frame, or an open left unclosed at end of input.
    /// For an unclosed open, `line` is the opening line.
    #[error("line {line}: unbalanced block: {cause}")]
    UnbalancedBlock { line: u32, cause: BlockImbalance },

    /// A second `memory` instruction.
    #[error("line {line}: `memory` is already declared")]
    Redefinition { line: u32 },

    /// The program is empty or does not begin with `memory`.
    #[error("program must begin with `memory`{}", .line.map(|l| format!(" (first instruction is at line {l})")).unwrap_or_default())]
    MissingAllocation { line: Option<u32> },

    /// An internal consistency check failed during code generation.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl TranspileError {
    /// The source line the error cites, when it cites one.
    pub fn line(&self) -> Option<u32> {
        match self {
            Self::InstructionSyntax { line, .. }
            | Self::UnbalancedBlock { line, .. }
            | Self::Redefinition { line } => Some(*line),
            Self::MissingAllocation { line } => *line,
            Self::Internal { .. } => None,
        }
    }
}
