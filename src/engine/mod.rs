//! Compilation of layout leaves into argument specifications.

pub mod compiler;

pub use compiler::{
    ArgType, ArgumentKind, ArgumentSource, ArgumentSpec, CompiledOperation, ParameterCompiler,
    UrlSegment,
};
