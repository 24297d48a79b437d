//! CLI command handlers.
//!
//! Each handler returns `Ok(true)` when the command found nothing to report
//! and `Ok(false)` when it printed findings that should fail the process.

#[allow(clippy::missing_errors_doc)]
pub mod compile;
#[allow(clippy::missing_errors_doc)]
pub mod layout;
#[allow(clippy::missing_errors_doc)]
pub mod models;
#[allow(clippy::missing_errors_doc)]
pub mod query;
#[allow(clippy::missing_errors_doc)]
pub mod spec;
