//! Block validation and depth bookkeeping.
//!
//! Rules enforced here:
//! - every close matches the kind of the innermost open frame;
//! - every opened block is closed before end of input;
//! - `memory` appears exactly once, as the first instruction.
//!
//! A block header is recorded at the depth in force before its frame is
//! pushed; its body runs one level deeper; the close is recorded back at
//! the header's depth.

use choco_classifier::ClassifiedInstruction;
use choco_types::{
    BlockImbalance, BlockKind, Instruction, Program, ProgramInstruction, Result, TranspileError,
};

/// A block open on the builder's stack.
#[derive(Debug, Clone, Copy)]
struct BlockFrame {
    kind: BlockKind,
    open_line: u32,
}

/// Builder state for one invocation. Never shared, never reused.
#[derive(Debug, Default)]
struct Builder {
    stack: Vec<BlockFrame>,
    instructions: Vec<ProgramInstruction>,
    allocation_line: Option<u32>,
}

impl Builder {
    fn consume(&mut self, item: &ClassifiedInstruction) -> Result<()> {
        let ClassifiedInstruction { line, instruction } = *item;

        if let Instruction::Allocate { .. } = instruction {
            if self.allocation_line.is_some() {
                return Err(TranspileError::Redefinition { line });
            }
            self.allocation_line = Some(line);
        }

        if let Some(kind) = instruction.closes_block() {
            let Some(frame) = self.stack.last().copied() else {
                return Err(TranspileError::UnbalancedBlock {
                    line,
                    cause: BlockImbalance::CloseWithoutOpen,
                });
            };
            if frame.kind != kind {
                return Err(TranspileError::UnbalancedBlock {
                    line,
                    cause: BlockImbalance::KindMismatch {
                        expected: frame.kind,
                    },
                });
            }
            self.stack.pop();
            self.record(line, instruction);
            return Ok(());
        }

        // Headers are recorded before the push, so they sit at the depth
        // of the surrounding block.
        self.record(line, instruction);

        if let Some(kind) = instruction.opens_block() {
            self.stack.push(BlockFrame {
                kind,
                open_line: line,
            });
        }
        Ok(())
    }

    fn record(&mut self, line: u32, instruction: Instruction) {
        self.instructions.push(ProgramInstruction {
            line,
            depth: self.stack.len() as u32,
            instruction,
        });
    }

    fn finish(mut self) -> Result<Program> {
        // The innermost unmatched open is the one whose close is most
        // immediately missing.
        if let Some(frame) = self.stack.pop() {
            return Err(TranspileError::UnbalancedBlock {
                line: frame.open_line,
                cause: BlockImbalance::UnclosedAtEof,
            });
        }

        match self.instructions.first() {
            Some(first) if matches!(first.instruction, Instruction::Allocate { .. }) => {
                Ok(Program {
                    instructions: self.instructions,
                })
            }
            Some(first) => Err(TranspileError::MissingAllocation {
                line: Some(first.line),
            }),
            None => Err(TranspileError::MissingAllocation { line: None }),
        }
    }
}

/// Build a validated program from the classified instruction stream.
pub fn build(instructions: &[ClassifiedInstruction]) -> Result<Program> {
    let mut builder = Builder::default();
    for item in instructions {
        builder.consume(item)?;
    }
    builder.finish()
}
