//! Classification of source lines into instruction records.

use choco_types::{Instruction, Result, SourceFile, SourceLine, TranspileError};

use crate::grammar;

/// A classified instruction together with its 1-based source line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedInstruction {
    pub line: u32,
    pub instruction: Instruction,
}

/// Classify a single trimmed, non-empty line.
pub fn classify_line(line: SourceLine<'_>) -> Result<ClassifiedInstruction> {
    match grammar::match_line(line.text) {
        Some(instruction) => Ok(ClassifiedInstruction {
            line: line.number,
            instruction,
        }),
        None => Err(TranspileError::InstructionSyntax {
            line: line.number,
            text: line.text.to_string(),
        }),
    }
}

/// Classify every instruction line of a source file, in source order.
///
/// Fails on the first line matching no grammar row.
pub fn classify(source: &SourceFile) -> Result<Vec<ClassifiedInstruction>> {
    source.instruction_lines().map(classify_line).collect()
}
