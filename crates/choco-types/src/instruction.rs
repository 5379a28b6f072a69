//! Instruction types for the ChocoScript source language.
//!
//! Defines [`Instruction`], a closed sum over every row of the instruction
//! grammar, and [`Program`], the depth-annotated sequence the program
//! builder hands to the code generator.

use serde::{Deserialize, Serialize};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────
// BlockKind
// ─────────────────────────────────────────────────────────────────────

/// The kind of block a `loop` or `if` construct delimits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Loop,
    Conditional,
}

impl BlockKind {
    /// The keyword pair that closes a block of this kind.
    pub fn close_keyword(self) -> &'static str {
        match self {
            Self::Loop => "end loop",
            Self::Conditional => "end if",
        }
    }

    /// The keyword that opens a block of this kind.
    pub fn open_keyword(self) -> &'static str {
        match self {
            Self::Loop => "loop",
            Self::Conditional => "if",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.open_keyword())
    }
}

// ─────────────────────────────────────────────────────────────────────
// Instruction
// ─────────────────────────────────────────────────────────────────────

/// A single classified ChocoScript instruction.
///
/// Created exactly once by the line classifier and never mutated. Operands
/// are unsigned decimal literals in the source; decrementing is expressed
/// with `sub`, so no operand is ever negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Instruction {
    /// `memory <size>`: declare the zero-initialised memory array.
    Allocate { size: u64 },
    /// `input raw`: read an integer token into the current cell.
    InputRaw,
    /// `input ascii`: read one character's code into the current cell.
    InputAscii,
    /// `output raw`: write the current cell as an integer.
    OutputRaw,
    /// `output ascii`: write the current cell decoded as a character.
    OutputAscii,
    /// `add <n>`: increment the current cell.
    Add { amount: u64 },
    /// `sub <n>`: decrement the current cell.
    Sub { amount: u64 },
    /// `right`: move the pointer one cell right.
    MoveRight,
    /// `left`: move the pointer one cell left.
    MoveLeft,
    /// `goto <addr>`: set the pointer to an absolute address.
    Goto { address: u64 },
    /// `loop`: open a while-cell-non-zero block.
    LoopStart,
    /// `end loop`: close the innermost loop block.
    LoopEnd,
    /// `if <n>`: open a cell-equals-n block.
    CondStart { value: u64 },
    /// `end if`: close the innermost conditional block.
    CondEnd,
}

impl Instruction {
    /// The block kind this instruction opens, if any.
    pub fn opens_block(self) -> Option<BlockKind> {
        match self {
            Self::LoopStart => Some(BlockKind::Loop),
            Self::CondStart { .. } => Some(BlockKind::Conditional),
            _ => None,
        }
    }

    /// The block kind this instruction closes, if any.
    pub fn closes_block(self) -> Option<BlockKind> {
        match self {
            Self::LoopEnd => Some(BlockKind::Loop),
            Self::CondEnd => Some(BlockKind::Conditional),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Program
// ─────────────────────────────────────────────────────────────────────

/// One instruction annotated with the nesting depth it executes at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramInstruction {
    /// 1-based source line the instruction came from.
    pub line: u32,
    /// Nesting depth; determines output indentation.
    pub depth: u32,
    #[serde(flatten)]
    pub instruction: Instruction,
}

/// The validated, depth-annotated instruction sequence.
///
/// Built once per transpilation by the program builder and consumed whole
/// by the code generator. Every opened block is closed, depth never goes
/// negative, and the sequence begins with [`Instruction::Allocate`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Program {
    pub instructions: Vec<ProgramInstruction>,
}

impl Program {
    /// The declared memory size.
    pub fn memory_size(&self) -> Option<u64> {
        match self.instructions.first() {
            Some(ProgramInstruction {
                instruction: Instruction::Allocate { size },
                ..
            }) => Some(*size),
            _ => None,
        }
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// `true` if the program holds no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opens_and_closes_block() {
        assert_eq!(Instruction::LoopStart.opens_block(), Some(BlockKind::Loop));
        assert_eq!(
            Instruction::CondStart { value: 3 }.opens_block(),
            Some(BlockKind::Conditional)
        );
        assert_eq!(Instruction::LoopEnd.closes_block(), Some(BlockKind::Loop));
        assert_eq!(
            Instruction::CondEnd.closes_block(),
            Some(BlockKind::Conditional)
        );
        assert_eq!(Instruction::Add { amount: 1 }.opens_block(), None);
        assert_eq!(Instruction::MoveRight.closes_block(), None);
    }

    #[test]
    fn test_block_kind_keywords() {
        assert_eq!(BlockKind::Loop.open_keyword(), "loop");
        assert_eq!(BlockKind::Loop.close_keyword(), "end loop");
        assert_eq!(BlockKind::Conditional.open_keyword(), "if");
        assert_eq!(BlockKind::Conditional.close_keyword(), "end if");
    }

    #[test]
    fn test_program_memory_size() {
        let program = Program {
            instructions: vec![ProgramInstruction {
                line: 1,
                depth: 0,
                instruction: Instruction::Allocate { size: 30 },
            }],
        };
        assert_eq!(program.memory_size(), Some(30));
        assert_eq!(Program::default().memory_size(), None);
    }

    #[test]
    fn test_program_instruction_json() {
        let item = ProgramInstruction {
            line: 4,
            depth: 1,
            instruction: Instruction::Add { amount: 3 },
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"line\":4"));
        assert!(json.contains("\"depth\":1"));
        assert!(json.contains("\"kind\":\"add\""));
        assert!(json.contains("\"amount\":3"));

        let back: ProgramInstruction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
