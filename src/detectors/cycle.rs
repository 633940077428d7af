//! Detector flagging methods whose control flow can loop.

use crate::analysis::has_cycle;
use crate::cfg::Cfg;
use crate::detectors::{BugReport, Detector, Severity};
use crate::ir::MethodContext;

pub const CYCLE_CODE: &str = "CFG_CYCLE";

/// Flags any method with a directed cycle reachable from entry over
/// non-unhandled-exception edges.
pub struct CycleDetector;

impl Detector for CycleDetector {
    fn code(&self) -> &'static str {
        CYCLE_CODE
    }

    fn check(&self, cfg: &Cfg, ctx: &MethodContext<'_>) -> Option<BugReport> {
        if !has_cycle(cfg) {
            return None;
        }
        log::debug!("found control-flow cycle in {}", ctx.descriptor);
        Some(BugReport {
            code: CYCLE_CODE,
            severity: Severity::High,
            method: ctx.descriptor.clone(),
        })
    }
}
