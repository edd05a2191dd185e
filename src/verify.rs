//! Before/after rendering harness for optimizer passes.

use similar::TextDiff;
use tracing::{debug, info};

use crate::optimizer::{Optimizer, Pass, PassReport};
use crate::parser::Ast;
use crate::renderer::{render_to_string, RenderContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// The passes should change the rendered tree
    Changed,
    /// The passes should leave the rendered tree untouched
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct VerifyOutcome {
    pub before: String,
    pub after: String,
    pub report: PassReport,
    pub expectation: Expectation,
}

impl VerifyOutcome {
    pub fn changed(&self) -> bool {
        self.before != self.after
    }

    pub fn passed(&self) -> bool {
        match self.expectation {
            Expectation::Changed => self.changed(),
            Expectation::Unchanged => !self.changed(),
        }
    }

    /// Unified line diff between the two snapshots; empty when they match.
    pub fn diff(&self) -> String {
        if !self.changed() {
            return String::new();
        }
        TextDiff::from_lines(&self.before, &self.after)
            .unified_diff()
            .header("unoptimized", "optimized")
            .to_string()
    }
}

/// Renders `ast`, runs `passes` on it in place, and renders it again.
///
/// Each snapshot uses its own renderer so the second one sees every node.
pub fn verify(
    ast: &mut Ast,
    passes: &[Pass],
    expectation: Expectation,
    context: &RenderContext,
) -> VerifyOutcome {
    let before = render_to_string(ast, context);
    let report = Optimizer::run(ast, passes);
    let after = render_to_string(ast, context);

    let outcome = VerifyOutcome {
        before,
        after,
        report,
        expectation,
    };
    debug!(
        changes = outcome.report.total_changes(),
        changed = outcome.changed(),
        "verification finished"
    );
    if !outcome.passed() {
        info!(?expectation, "rendered output did not meet expectation");
    }
    outcome
}
