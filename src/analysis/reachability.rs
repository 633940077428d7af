//! Source-to-sink reachability over the control-flow graph.
//!
//! Blocks are first classified by instruction predicates into a source set
//! and a sink set, then a multi-source search over the full successor
//! relation (exception edges included) decides whether any source block can
//! reach any sink block. A block that is both source and sink is trivially
//! reachable via the zero-length path.

use std::collections::{HashSet, VecDeque};

use crate::cfg::{BlockId, Cfg};
use crate::ir::Instruction;

/// Classify every block of the CFG into the source and/or sink set.
///
/// A block lands in a set when any of its instructions satisfies the
/// corresponding predicate; a block may be in both sets, or neither.
pub fn classify_blocks<S, K>(
    cfg: &Cfg,
    is_source: S,
    is_sink: K,
) -> (HashSet<BlockId>, HashSet<BlockId>)
where
    S: Fn(&Instruction) -> bool,
    K: Fn(&Instruction) -> bool,
{
    let mut sources = HashSet::new();
    let mut sinks = HashSet::new();
    for block in cfg.blocks() {
        for (_, instruction) in &block.instructions {
            if is_source(instruction) {
                sources.insert(block.id);
            }
            if is_sink(instruction) {
                sinks.insert(block.id);
            }
        }
    }
    (sources, sinks)
}

/// True iff some directed path (over all edge kinds) leads from a source
/// block to a sink block. Empty source or sink set short-circuits to false
/// without traversal.
pub fn reaches(cfg: &Cfg, sources: &HashSet<BlockId>, sinks: &HashSet<BlockId>) -> bool {
    if sources.is_empty() || sinks.is_empty() {
        return false;
    }

    let mut pending: VecDeque<BlockId> = sources.iter().copied().collect();
    let mut reachable: HashSet<BlockId> = sources.clone();
    while let Some(block) = pending.pop_front() {
        if sinks.contains(&block) {
            return true;
        }
        for successor in cfg.successors(block) {
            if reachable.insert(successor) {
                pending.push_back(successor);
            }
        }
    }
    false
}

/// Classify then search; the composition used by the detectors.
pub fn source_reaches_sink<S, K>(cfg: &Cfg, is_source: S, is_sink: K) -> bool
where
    S: Fn(&Instruction) -> bool,
    K: Fn(&Instruction) -> bool,
{
    let (sources, sinks) = classify_blocks(cfg, is_source, is_sink);
    reaches(cfg, &sources, &sinks)
}
