//! ChocoScript transpiler: orchestrates the full pipeline.
//!
//! ```text
//! ChocoScript source → Line Classifier → Program Builder → Code Generator → Python
//! ```
//!
//! The pipeline is a pure, synchronous transformation: it performs no I/O,
//! holds no state across invocations, and yields byte-identical output for
//! identical input, so concurrent transpilation of independent sources
//! needs no locking. Reading source files and persisting output belong to
//! the driver, which must write the result only after the whole pipeline
//! has succeeded, never a partially generated file.

use choco_types::{Program, Result, SourceFile};

/// Transpile a ChocoScript source file to Python text.
pub fn transpile(source: &SourceFile) -> Result<String> {
    let program = lower(source)?;
    choco_codegen::generate(&program)
}

/// Run the front half of the pipeline only: classify and build, yielding
/// the validated, depth-annotated program.
pub fn lower(source: &SourceFile) -> Result<Program> {
    let classified = choco_classifier::classify(source)?;
    choco_builder::build(&classified)
}
