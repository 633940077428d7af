//! Per-method static analyses over the control-flow graph.
//!
//! Each analysis is a pure function of a read-only `Cfg` (plus, where
//! needed, an explicit `MethodContext`):
//! - cycle existence excluding unhandled-exception edges
//! - source-to-sink reachability driven by instruction predicates
//! - one-step backward receiver-name resolution for call sites
//!
//! None of these retain state between invocations, so a host may run them
//! concurrently across different methods.

pub mod cycle;
pub mod reachability;
pub mod receiver;

pub use cycle::has_cycle;
pub use reachability::{classify_blocks, reaches, source_reaches_sink};
pub use receiver::{log_call_sites, resolve_receiver, ReceiverName};
