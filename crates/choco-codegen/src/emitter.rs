//! The statement emitter.

use choco_types::{Instruction, Program, ProgramInstruction, Result, TranspileError};

/// Spaces per nesting level in the generated Python.
const INDENT: &str = "    ";

/// The emitter's two-state machine: the memory header is written once,
/// before any body statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Preamble,
    Emitting,
}

/// Ephemeral generation context, created and discarded within a single
/// [`generate`] call. Holds no cross-invocation state.
#[derive(Debug)]
struct Emitter {
    buffer: String,
    state: State,
    /// One flag per open block: has its body emitted a statement yet?
    block_has_body: Vec<bool>,
}

impl Emitter {
    fn new() -> Self {
        Self {
            buffer: String::new(),
            state: State::Preamble,
            block_has_body: Vec::new(),
        }
    }

    fn write_line(&mut self, depth: u32, text: &str) {
        for _ in 0..depth {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    /// Mark the innermost open block as non-empty.
    fn mark_body(&mut self) {
        if let Some(flag) = self.block_has_body.last_mut() {
            *flag = true;
        }
    }

    fn statement(&mut self, depth: u32, text: &str) {
        self.mark_body();
        self.write_line(depth, text);
    }

    fn open_block(&mut self, depth: u32, header: &str) {
        self.mark_body();
        self.write_line(depth, header);
        self.block_has_body.push(false);
    }

    /// Close the innermost block. The target rejects empty suites, so a
    /// body that emitted nothing gets a `pass` at body depth.
    fn close_block(&mut self, line: u32, depth: u32) -> Result<()> {
        match self.block_has_body.pop() {
            Some(true) => Ok(()),
            Some(false) => {
                self.write_line(depth + 1, "pass");
                Ok(())
            }
            None => Err(internal(format!(
                "line {line}: block close survived validation with no open block"
            ))),
        }
    }

    fn emit(&mut self, item: &ProgramInstruction) -> Result<()> {
        let ProgramInstruction {
            line,
            depth,
            instruction,
        } = *item;

        if self.state == State::Preamble {
            return match instruction {
                Instruction::Allocate { size } => {
                    self.write_line(0, "import sys");
                    self.buffer.push('\n');
                    self.write_line(0, &format!("memory = [0] * {size}"));
                    self.write_line(0, "pointer = 0");
                    self.state = State::Emitting;
                    Ok(())
                }
                _ => Err(internal(format!(
                    "line {line}: statement before the memory header"
                ))),
            };
        }

        match instruction {
            Instruction::Allocate { .. } => Err(internal(format!(
                "line {line}: duplicate memory header survived validation"
            ))),
            Instruction::InputRaw => {
                self.statement(depth, "memory[pointer] = int(input())");
                Ok(())
            }
            Instruction::InputAscii => {
                self.statement(depth, "memory[pointer] = ord(sys.stdin.read(1))");
                Ok(())
            }
            Instruction::OutputRaw => {
                self.statement(depth, "sys.stdout.write(str(memory[pointer]))");
                Ok(())
            }
            Instruction::OutputAscii => {
                self.statement(depth, "sys.stdout.write(chr(memory[pointer]))");
                Ok(())
            }
            Instruction::Add { amount } => {
                self.statement(depth, &format!("memory[pointer] += {amount}"));
                Ok(())
            }
            Instruction::Sub { amount } => {
                self.statement(depth, &format!("memory[pointer] -= {amount}"));
                Ok(())
            }
            Instruction::MoveRight => {
                self.statement(depth, "pointer += 1");
                Ok(())
            }
            Instruction::MoveLeft => {
                self.statement(depth, "pointer -= 1");
                Ok(())
            }
            Instruction::Goto { address } => {
                self.statement(depth, &format!("pointer = {address}"));
                Ok(())
            }
            Instruction::LoopStart => {
                self.open_block(depth, "while memory[pointer] != 0:");
                Ok(())
            }
            Instruction::CondStart { value } => {
                self.open_block(depth, &format!("if memory[pointer] == {value}:"));
                Ok(())
            }
            Instruction::LoopEnd | Instruction::CondEnd => self.close_block(line, depth),
        }
    }

    fn finish(self) -> Result<String> {
        if self.state == State::Preamble {
            return Err(internal(
                "program reached the generator without a memory header".into(),
            ));
        }
        if !self.block_has_body.is_empty() {
            return Err(internal("open blocks survived validation".into()));
        }
        Ok(self.buffer)
    }
}

fn internal(message: String) -> TranspileError {
    TranspileError::Internal { message }
}

/// Generate Python source for a validated program.
///
/// Preconditions (first instruction is `Allocate`, blocks balanced) are
/// guaranteed by the program builder; violations are caught defensively
/// and abort before any text is handed to the caller.
pub fn generate(program: &Program) -> Result<String> {
    let mut emitter = Emitter::new();
    for item in &program.instructions {
        emitter.emit(item)?;
    }
    emitter.finish()
}
