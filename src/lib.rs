//! oastool compiles an `OpenAPI` document and a command-layout document into a
//! validated command tree and per-operation argument specifications.
//!
//! The library is synchronous and pure: documents are loaded once, and every
//! output follows document order so identical inputs produce identical output.

pub mod cli;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod layout;
pub mod spec;
pub mod utils;
