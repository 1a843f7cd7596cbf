mod walk;

pub use walk::{compile_pattern, compile_patterns, SourceWalker};
