//! The per-check controller: traversal gating, warning deduplication and
//! fixit lifecycle management shared by every concrete check.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::ast::{Decl, NodeId, Stmt};
use crate::config::CheckConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink, Severity};
use crate::fix::FixitHint;
use crate::source::{PresumedLoc, SourceLocation, SourceResolver};

/// Marker prepended to the deferred diagnostic of a fixit that could not be
/// applied safely.
const MANUAL_INTERVENTION_PREFIX: &str = "FixIt failed, requires manual intervention: ";

/// Extension points a concrete check implements. Defaults are no-ops so a
/// check only overrides the syntax categories it cares about.
pub trait CheckRule {
    /// Unique check name, also the diagnostic tag (` [-Wclazy-<name>]`).
    fn name(&self) -> &str;

    /// File-path substrings this check skips, on top of the system headers
    /// every check skips. Matched case-sensitively against the raw filename.
    fn files_to_ignore(&self) -> Vec<String> {
        Vec::new()
    }

    fn visit_decl(&mut self, _ctx: &mut CheckContext, _decl: &Decl) {}

    fn visit_stmt(&mut self, _ctx: &mut CheckContext, _stmt: &Stmt) {}
}

struct QueuedManualWarning {
    loc: SourceLocation,
    message: String,
}

/// Warning/fixit API handed to a check inside its visit hooks, together with
/// the per-check state backing it.
///
/// One instance per check per translation unit, used from a single traversal
/// thread only. Parallel analysis across translation units needs independent
/// instances; nothing here is safe to share.
pub struct CheckContext {
    name: String,
    resolver: Rc<dyn SourceResolver>,
    sink: Rc<RefCell<dyn DiagnosticSink>>,
    config: Rc<CheckConfig>,
    last_decl: Option<NodeId>,
    last_method_decl: Option<NodeId>,
    enabled_fixits: u32,
    emitted_in_macro: HashSet<PresumedLoc>,
    manual_fixits_in_macro: HashSet<PresumedLoc>,
    queued_manual_warnings: Vec<QueuedManualWarning>,
}

impl CheckContext {
    fn new(
        name: String,
        resolver: Rc<dyn SourceResolver>,
        sink: Rc<RefCell<dyn DiagnosticSink>>,
        config: Rc<CheckConfig>,
    ) -> Self {
        Self {
            name,
            resolver,
            sink,
            config,
            last_decl: None,
            last_method_decl: None,
            enabled_fixits: 0,
            emitted_in_macro: HashSet::new(),
            manual_fixits_in_macro: HashSet::new(),
            queued_manual_warnings: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle to the most recently visited eligible declaration, if any.
    /// Only valid within the current callback's dynamic extent.
    pub fn last_decl(&self) -> Option<NodeId> {
        self.last_decl
    }

    /// Handle to the most recently visited eligible method declaration.
    pub fn last_method_decl(&self) -> Option<NodeId> {
        self.last_method_decl
    }

    /// Resolves the option as `<check>-<option>` against the configuration.
    pub fn is_option_set(&self, option_name: &str) -> bool {
        let qualified_name = format!("{}-{}", self.name, option_name);
        self.config.is_option_set(&qualified_name)
    }

    /// Replaces the local enabled-fixits bitmask.
    pub fn set_enabled_fixits(&mut self, fixits: u32) {
        self.enabled_fixits = fixits;
    }

    pub fn is_fixit_enabled(&self, fixit: u32) -> bool {
        (self.enabled_fixits & fixit) != 0 || self.config.all_fixits_enabled
    }

    /// Whether `loc` is ineligible for analysis: invalid, inside a system
    /// header, or inside a file matching one of `ignored`.
    pub fn should_ignore_file(&self, loc: SourceLocation, ignored: &[String]) -> bool {
        if !loc.is_valid() || self.resolver.is_in_system_header(loc) {
            return true;
        }

        let filename = self.resolver.filename(loc);
        ignored.iter().any(|pattern| filename.contains(pattern))
    }

    pub fn emit_warning(&mut self, loc: SourceLocation, message: impl Into<String>) {
        self.emit_warning_with_fixits(loc, message, Vec::new(), true);
    }

    pub fn emit_warning_with_fixits(
        &mut self,
        loc: SourceLocation,
        message: impl Into<String>,
        fixits: Vec<FixitHint>,
        append_tag: bool,
    ) {
        let mut message = message.into();

        if self.resolver.is_macro_expansion(loc) {
            let Some(presumed) = self.resolver.presumed_location(loc) else {
                return;
            };
            // A macro argument used N times inside the expansion is visited
            // once per use, all at the same textual site. Report it once.
            if !self.emitted_in_macro.insert(presumed) {
                trace!(check = %self.name, "suppressed duplicate warning in macro expansion");
                return;
            }
        }

        let tag = format!(" [-Wclazy-{}]", self.name);
        if append_tag {
            message.push_str(&tag);
        }

        self.report(loc, message, fixits);

        // Manual-intervention notices only make sense next to a real
        // finding; they ride along with whichever warning comes first.
        for queued in std::mem::take(&mut self.queued_manual_warnings) {
            let mut message = String::from(MANUAL_INTERVENTION_PREFIX);
            if !queued.message.is_empty() {
                message.push(' ');
                message.push_str(&queued.message);
            }
            message.push_str(&tag);
            self.report(queued.loc, message, Vec::new());
        }
    }

    /// Defers a "could not apply this fixit" notice until the next warning.
    ///
    /// No-op when the fixit is disabled or when a notice for the same
    /// resolved position was already queued by this check. Entries still
    /// queued at teardown are dropped; they are never flushed standalone.
    pub fn queue_manual_fixit_warning(
        &mut self,
        loc: SourceLocation,
        fixit: u32,
        message: impl Into<String>,
    ) {
        if !self.is_fixit_enabled(fixit) {
            return;
        }

        let Some(presumed) = self.resolver.presumed_location(loc) else {
            return;
        };
        if !self.manual_fixits_in_macro.insert(presumed) {
            return;
        }

        debug!(check = %self.name, fixit, "fixit not applied, queueing manual intervention notice");
        self.queued_manual_warnings.push(QueuedManualWarning {
            loc,
            message: message.into(),
        });
    }

    fn report(&self, loc: SourceLocation, message: String, fixits: Vec<FixitHint>) {
        let Some(resolved) = self.resolver.presumed_location(loc) else {
            return;
        };

        let fixits: Vec<FixitHint> = fixits.into_iter().filter(|hint| !hint.is_null()).collect();
        self.sink.borrow_mut().report(Diagnostic {
            check: self.name.clone(),
            filename: resolved.filename,
            line: resolved.line,
            column: resolved.column,
            severity: Severity::Warning,
            message,
            fixits,
        });
    }
}

/// One analysis rule plus the controller state it shares with every other
/// rule: the location gate, the dedup logs and the manual-intervention
/// queue. The host traversal driver calls the two visit callbacks per node.
pub struct Check {
    rule: Box<dyn CheckRule>,
    ctx: CheckContext,
}

impl Check {
    pub fn new(
        rule: Box<dyn CheckRule>,
        resolver: Rc<dyn SourceResolver>,
        sink: Rc<RefCell<dyn DiagnosticSink>>,
        config: Rc<CheckConfig>,
    ) -> Self {
        let mut ctx = CheckContext::new(rule.name().to_string(), resolver, sink, config.clone());
        ctx.set_enabled_fixits(config.fixit_mask(rule.name()));
        Self { rule, ctx }
    }

    pub fn name(&self) -> &str {
        self.ctx.name()
    }

    pub fn context(&self) -> &CheckContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut CheckContext {
        &mut self.ctx
    }

    pub fn visit_declaration(&mut self, decl: &Decl) {
        if self
            .ctx
            .should_ignore_file(decl.loc, &self.rule.files_to_ignore())
        {
            trace!(check = %self.ctx.name, "declaration skipped by location gate");
            return;
        }

        self.ctx.last_decl = Some(decl.id);
        if decl.is_method() {
            self.ctx.last_method_decl = Some(decl.id);
        }

        self.rule.visit_decl(&mut self.ctx, decl);
    }

    pub fn visit_statement(&mut self, stmt: &Stmt) {
        if self
            .ctx
            .should_ignore_file(stmt.loc, &self.rule.files_to_ignore())
        {
            return;
        }

        self.rule.visit_stmt(&mut self.ctx, stmt);
    }
}
