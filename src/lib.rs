// Export modules for library usage
pub mod analysis;
pub mod cfg;
pub mod cli;
pub mod commands;
pub mod config;
pub mod detectors;
pub mod errors;
pub mod io;
pub mod ir;

// Re-export the types hosts touch most
pub use cfg::{BasicBlock, BlockId, Cfg, CfgBuilder, EdgeKind};
pub use detectors::{BugReport, BugReporter, CollectingReporter, Severity};
pub use errors::AnalysisError;
pub use ir::{Dispatch, Instruction, MethodDescriptor, MethodUnit};
