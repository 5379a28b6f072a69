//! ChocoScript program builder: turns the classified instruction stream
//! into a validated, depth-annotated [`choco_types::Program`].
//!
//! The builder owns the only mutable nesting state in the pipeline: an
//! explicit stack of block frames, local to one invocation. Structural
//! errors are reported in stream order; the `memory`-first policy is
//! enforced once the whole stream has been consumed.

mod builder;

pub use builder::build;
