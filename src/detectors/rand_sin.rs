//! Detector flagging a control-flow path from a random-number source to a
//! trigonometric sink.
//!
//! With the default patterns this flags any method where a call to
//! `Math.random()` can be followed by a call to `Math.sin()`. The patterns
//! are configurable; the mechanism is a general two-predicate reachability
//! check.

use crate::analysis::source_reaches_sink;
use crate::cfg::Cfg;
use crate::config::RandSinPatterns;
use crate::detectors::{BugReport, Detector, Severity};
use crate::ir::MethodContext;

pub const RAND_SIN_CODE: &str = "CFG_RAND_BEFORE_SIN";

/// Flags any method with a directed path from a source call to a sink
/// call, including both occurring in the same block.
pub struct RandSinDetector {
    patterns: RandSinPatterns,
}

impl RandSinDetector {
    pub fn new(patterns: RandSinPatterns) -> Self {
        Self { patterns }
    }
}

impl Default for RandSinDetector {
    fn default() -> Self {
        Self::new(RandSinPatterns::default())
    }
}

impl Detector for RandSinDetector {
    fn code(&self) -> &'static str {
        RAND_SIN_CODE
    }

    fn check(&self, cfg: &Cfg, ctx: &MethodContext<'_>) -> Option<BugReport> {
        let found = source_reaches_sink(
            cfg,
            |insn| self.patterns.source.matches(insn),
            |insn| self.patterns.sink.matches(insn),
        );
        if !found {
            return None;
        }
        log::debug!(
            "found {}.{} -> {}.{} path in {}",
            self.patterns.source.owner,
            self.patterns.source.method,
            self.patterns.sink.owner,
            self.patterns.sink.method,
            ctx.descriptor
        );
        Some(BugReport {
            code: RAND_SIN_CODE,
            severity: Severity::High,
            method: ctx.descriptor.clone(),
        })
    }
}
