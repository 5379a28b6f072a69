//! The instruction grammar table.
//!
//! One row per instruction form. Rows are tried in declaration order and a
//! line must satisfy a row in full; every pattern is anchored at both
//! ends, which removes ambiguity when one keyword is a textual prefix of
//! another. Keywords are case-sensitive; tokens are separated by one or
//! more whitespace characters; operands are unsigned decimal literals.

use choco_types::Instruction;
use once_cell::sync::Lazy;
use regex::Regex;

/// How a grammar row turns its match into an instruction.
#[derive(Clone, Copy)]
enum Builder {
    /// The row has no operand.
    Plain(Instruction),
    /// The row captures one unsigned integer operand.
    WithOperand(fn(u64) -> Instruction),
}

use Builder::{Plain, WithOperand};

/// Grammar rows as `(pattern, constructor)` pairs.
///
/// Order matters: the first row whose pattern matches the whole line wins.
const GRAMMAR_ROWS: &[(&str, Builder)] = &[
    (r"^memory\s+(\d+)$", WithOperand(|size| Instruction::Allocate { size })),
    (r"^input\s+raw$", Plain(Instruction::InputRaw)),
    (r"^input\s+ascii$", Plain(Instruction::InputAscii)),
    (r"^output\s+raw$", Plain(Instruction::OutputRaw)),
    (r"^output\s+ascii$", Plain(Instruction::OutputAscii)),
    (r"^add\s+(\d+)$", WithOperand(|amount| Instruction::Add { amount })),
    (r"^sub\s+(\d+)$", WithOperand(|amount| Instruction::Sub { amount })),
    (r"^right$", Plain(Instruction::MoveRight)),
    (r"^left$", Plain(Instruction::MoveLeft)),
    (
        r"^goto\s+(\d+)$",
        WithOperand(|address| Instruction::Goto { address }),
    ),
    (r"^loop$", Plain(Instruction::LoopStart)),
    (r"^end\s+loop$", Plain(Instruction::LoopEnd)),
    (
        r"^if\s+(\d+)$",
        WithOperand(|value| Instruction::CondStart { value }),
    ),
    (r"^end\s+if$", Plain(Instruction::CondEnd)),
];

/// The compiled table, built once on first use.
static COMPILED: Lazy<Vec<(Regex, Builder)>> = Lazy::new(|| {
    GRAMMAR_ROWS
        .iter()
        .map(|&(pattern, builder)| {
            let regex = Regex::new(pattern).expect("grammar pattern must compile");
            (regex, builder)
        })
        .collect()
});

/// Match one trimmed, non-empty line against the grammar.
///
/// Returns `None` when no row matches in full, or when an operand does not
/// fit in `u64`; an oversized literal satisfies no executable row.
pub(crate) fn match_line(text: &str) -> Option<Instruction> {
    for (regex, builder) in COMPILED.iter() {
        let Some(captures) = regex.captures(text) else {
            continue;
        };
        return match builder {
            Plain(instruction) => Some(*instruction),
            WithOperand(build) => {
                let operand = captures.get(1)?.as_str().parse::<u64>().ok()?;
                Some(build(operand))
            }
        };
    }
    None
}
