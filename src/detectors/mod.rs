//! Lint detectors and the per-method analysis driver.
//!
//! Each detector is a pure check `(cfg, context) -> Option<BugReport>`;
//! the driver wires detectors to a method set and forwards findings to a
//! `BugReporter`. A method whose CFG could not be built is logged and
//! skipped without affecting any other method.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cfg::Cfg;
use crate::config::CfglintConfig;
use crate::errors::AnalysisError;
use crate::ir::{MethodContext, MethodDescriptor, MethodUnit};

mod cycle;
mod rand_sin;

pub use cycle::CycleDetector;
pub use rand_sin::RandSinDetector;

/// Severity of a reported finding. Ordered so reports can be filtered by
/// a minimum level.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        };
        f.write_str(label)
    }
}

/// One finding: a fixed per-detector diagnostic code, a severity, and the
/// identity of the flagged method. No path trace or block labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BugReport {
    pub code: &'static str,
    pub severity: Severity,
    pub method: MethodDescriptor,
}

/// Sink for findings. Formatting, persistence, and UI live behind this
/// seam.
pub trait BugReporter {
    fn report(&mut self, bug: BugReport);
}

/// Reporter that accumulates findings in memory; used by the CLI and by
/// tests.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub bugs: Vec<BugReport>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BugReporter for CollectingReporter {
    fn report(&mut self, bug: BugReport) {
        self.bugs.push(bug);
    }
}

/// One lint pass over a single method's CFG.
pub trait Detector {
    /// Fixed diagnostic code attached to every finding of this detector.
    fn code(&self) -> &'static str;

    fn check(&self, cfg: &Cfg, ctx: &MethodContext<'_>) -> Option<BugReport>;
}

/// Instantiate the detectors a config enables.
pub fn detectors_from_config(config: &CfglintConfig) -> Vec<Box<dyn Detector>> {
    let mut detectors: Vec<Box<dyn Detector>> = Vec::new();
    if config.detectors.cycle {
        detectors.push(Box::new(CycleDetector));
    }
    if config.detectors.rand_sin {
        detectors.push(Box::new(RandSinDetector::new(config.rand_sin.clone())));
    }
    detectors
}

/// Run a detector set over one method and forward findings that meet the
/// severity floor.
pub fn analyze_method(
    unit: &MethodUnit,
    detectors: &[Box<dyn Detector>],
    min_severity: Severity,
    reporter: &mut dyn BugReporter,
) {
    let ctx = unit.context();
    for detector in detectors {
        if let Some(bug) = detector.check(&unit.cfg, &ctx) {
            if bug.severity >= min_severity {
                reporter.report(bug);
            }
        }
    }
}

/// Outcome of one analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisStats {
    pub analyzed: usize,
    pub skipped: usize,
}

/// Run the configured detectors over a method set.
///
/// A method the collaborator could not analyze is logged for triage and
/// skipped; every other method proceeds independently.
pub fn analyze_methods<'a, I>(
    methods: I,
    config: &CfglintConfig,
    reporter: &mut dyn BugReporter,
) -> AnalysisStats
where
    I: IntoIterator<Item = &'a Result<MethodUnit, AnalysisError>>,
{
    let detectors = detectors_from_config(config);
    let mut stats = AnalysisStats::default();
    for outcome in methods {
        match outcome {
            Ok(unit) => {
                analyze_method(unit, &detectors, config.min_severity, reporter);
                stats.analyzed += 1;
            }
            Err(e) => {
                log::warn!("skipping method: {}", e);
                stats.skipped += 1;
            }
        }
    }
    stats
}
