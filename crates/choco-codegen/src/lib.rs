//! ChocoScript code generator: emits Python for a validated
//! [`choco_types::Program`].
//!
//! # Target model
//!
//! The generated program operates a flat zero-initialised integer array
//! (`memory`) and a single movable index (`pointer`):
//!
//! ```text
//! memory <n>     →  memory = [0] * n ; pointer = 0   (one-time preamble)
//! input raw      →  memory[pointer] = int(input())
//! input ascii    →  memory[pointer] = ord(sys.stdin.read(1))
//! output raw     →  sys.stdout.write(str(memory[pointer]))
//! output ascii   →  sys.stdout.write(chr(memory[pointer]))
//! add/sub <n>    →  memory[pointer] += n / -= n
//! right/left     →  pointer += 1 / -= 1
//! goto <addr>    →  pointer = addr
//! loop           →  while memory[pointer] != 0:
//! if <n>         →  if memory[pointer] == n:
//! end loop/if    →  dedent (plus `pass` for an empty suite)
//! ```
//!
//! Indentation is computed purely from the depth carried by each
//! instruction, so generation is a pure function of the program and safe
//! to run repeatedly or concurrently on independent programs.

mod emitter;

pub use emitter::generate;
