//! Shared controller machinery for a family of compile-time source checks.
//!
//! A *check* is one independently enabled analysis rule. This crate owns the
//! plumbing every check relies on: deciding which syntax-tree nodes are even
//! eligible for inspection, deduplicating warnings under macro expansion and
//! managing the lifecycle of automatic fixes, including the deferred
//! "requires manual intervention" notice emitted when a fix cannot be
//! applied safely.
//!
//! The syntax tree, the source-position facility, the diagnostics engine and
//! the traversal driver all belong to the host compiler and are consumed
//! through narrow contracts ([`SourceResolver`], [`DiagnosticSink`] and the
//! node descriptors in [`ast`]). No rule detection logic lives here.

pub mod ast;
pub mod check;
pub mod config;
pub mod diagnostics;
pub mod fix;
pub mod runner;
pub mod source;

#[cfg(test)]
pub(crate) mod test_utils;

pub use ast::{Decl, DeclKind, NodeId, Stmt, StmtKind};
pub use check::{Check, CheckContext, CheckRule};
pub use config::CheckConfig;
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, Severity};
pub use fix::{FixitHint, TextEdit};
pub use runner::CheckSet;
pub use source::{PresumedLoc, SourceLocation, SourceResolver};
