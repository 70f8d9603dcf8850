//! Fan-out of traversal callbacks to the checks enabled for one
//! translation unit.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::ast::{Decl, Stmt};
use crate::check::{Check, CheckRule};
use crate::config::CheckConfig;
use crate::diagnostics::DiagnosticSink;
use crate::source::SourceResolver;

/// The checks active for a single translation unit.
///
/// Built once per unit; the host traversal driver forwards every node to
/// [`CheckSet::visit_declaration`] / [`CheckSet::visit_statement`] and each
/// enabled check sees it in registration order. A set must not be shared
/// across units or threads; build a fresh one instead.
pub struct CheckSet {
    checks: Vec<Check>,
}

impl CheckSet {
    /// Keeps the rules enabled in `config`, wiring each into its own
    /// controller with the fixit mask the config assigns to it.
    pub fn from_rules(
        rules: Vec<Box<dyn CheckRule>>,
        config: Rc<CheckConfig>,
        resolver: Rc<dyn SourceResolver>,
        sink: Rc<RefCell<dyn DiagnosticSink>>,
    ) -> Self {
        let mut checks = Vec::new();
        for rule in rules {
            if !config.check_enabled(rule.name()) {
                debug!(check = %rule.name(), "check disabled by configuration");
                continue;
            }
            checks.push(Check::new(
                rule,
                resolver.clone(),
                sink.clone(),
                config.clone(),
            ));
        }

        Self { checks }
    }

    pub fn visit_declaration(&mut self, decl: &Decl) {
        for check in &mut self.checks {
            check.visit_declaration(decl);
        }
    }

    pub fn visit_statement(&mut self, stmt: &Stmt) {
        for check in &mut self.checks {
            check.visit_statement(stmt);
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.checks.iter().map(Check::name).collect()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
