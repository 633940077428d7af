//! Control-flow graph model.
//!
//! A `Cfg` is a directed graph of basic blocks with kind-tagged edges and a
//! single designated entry block. CFG construction from real bytecode is the
//! job of an upstream collaborator; this module only offers a builder for
//! already-known blocks and edges plus the read-only traversal queries the
//! analyses consume. No analysis mutates a `Cfg`.

use std::collections::{HashMap, HashSet};
use std::fmt;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;
use crate::ir::Instruction;

/// Stable label of a basic block, unique within one CFG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub u32);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Kind tag on a control-flow edge.
///
/// `UnhandledException` models abrupt termination rather than a return to
/// normal flow; cycle analysis excludes those edges, reachability does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Normal,
    ConditionalBranch,
    FallThrough,
    HandledException,
    UnhandledException,
}

/// An ordered run of instructions with no internal branch targets.
///
/// Instructions carry their program position (bytecode offset) so that
/// scope-sensitive metadata such as local-variable names can be resolved
/// at the exact point of use. Synthetic entry/exit blocks may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicBlock {
    pub id: BlockId,
    /// `(position, instruction)` pairs in program order.
    pub instructions: Vec<(u32, Instruction)>,
}

impl BasicBlock {
    pub fn new(id: BlockId, instructions: Vec<(u32, Instruction)>) -> Self {
        Self { id, instructions }
    }

    pub fn empty(id: BlockId) -> Self {
        Self {
            id,
            instructions: Vec::new(),
        }
    }
}

/// Immutable per-method control-flow graph.
#[derive(Debug, Clone)]
pub struct Cfg {
    graph: DiGraph<BasicBlock, EdgeKind>,
    nodes: HashMap<BlockId, NodeIndex>,
    entry: NodeIndex,
}

impl Cfg {
    /// Label of the designated entry block.
    pub fn entry(&self) -> BlockId {
        self.graph[self.entry].id
    }

    /// Iterate all blocks. Order is unspecified and must not affect any
    /// analysis verdict.
    pub fn blocks(&self) -> impl Iterator<Item = &BasicBlock> {
        self.graph.node_weights()
    }

    pub fn block_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Look up a block by label.
    pub fn block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.nodes.get(&id).map(|&n| &self.graph[n])
    }

    /// Labels of blocks with an edge into `id`. Parallel edges yield the
    /// same neighbor more than once.
    pub fn predecessors(&self, id: BlockId) -> impl Iterator<Item = BlockId> + '_ {
        self.neighbors(id, Direction::Incoming)
    }

    /// Labels of blocks with an edge out of `id`. Parallel edges yield the
    /// same neighbor more than once.
    pub fn successors(&self, id: BlockId) -> impl Iterator<Item = BlockId> + '_ {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Outgoing edges of `id` with their kind tags, so callers can filter
    /// by kind.
    pub fn outgoing_edges(&self, id: BlockId) -> impl Iterator<Item = (EdgeKind, BlockId)> + '_ {
        self.nodes.get(&id).copied().into_iter().flat_map(move |n| {
            self.graph
                .edges(n)
                .map(move |e| (*e.weight(), self.graph[e.target()].id))
        })
    }

    fn neighbors(&self, id: BlockId, direction: Direction) -> impl Iterator<Item = BlockId> + '_ {
        self.nodes.get(&id).copied().into_iter().flat_map(move |n| {
            self.graph
                .neighbors_directed(n, direction)
                .map(move |other| self.graph[other].id)
        })
    }

    /// Precondition check: every block reachable from entry. Upstream is
    /// responsible for this invariant; the builder asserts it in debug
    /// builds only.
    fn all_blocks_reachable(&self) -> bool {
        let mut seen = HashSet::new();
        let mut pending = vec![self.entry()];
        seen.insert(self.entry());
        while let Some(block) = pending.pop() {
            for succ in self.successors(block) {
                if seen.insert(succ) {
                    pending.push(succ);
                }
            }
        }
        seen.len() == self.block_count()
    }
}

/// Builder for a `Cfg`; validates labels and edge endpoints as they arrive.
#[derive(Debug, Default)]
pub struct CfgBuilder {
    graph: DiGraph<BasicBlock, EdgeKind>,
    nodes: HashMap<BlockId, NodeIndex>,
    entry: Option<BlockId>,
}

impl CfgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_block(&mut self, block: BasicBlock) -> Result<(), AnalysisError> {
        let id = block.id;
        if self.nodes.contains_key(&id) {
            return Err(AnalysisError::MalformedCfg(format!(
                "duplicate block label {}",
                id
            )));
        }
        let node = self.graph.add_node(block);
        self.nodes.insert(id, node);
        Ok(())
    }

    /// Add a directed edge. Parallel edges between the same pair of blocks
    /// are allowed (distinct exception edges, for example).
    pub fn add_edge(
        &mut self,
        from: BlockId,
        to: BlockId,
        kind: EdgeKind,
    ) -> Result<(), AnalysisError> {
        let from_node = self.node(from)?;
        let to_node = self.node(to)?;
        self.graph.add_edge(from_node, to_node, kind);
        Ok(())
    }

    pub fn entry(&mut self, entry: BlockId) -> &mut Self {
        self.entry = Some(entry);
        self
    }

    pub fn build(self) -> Result<Cfg, AnalysisError> {
        let entry_id = self
            .entry
            .ok_or_else(|| AnalysisError::MalformedCfg("no entry block designated".to_string()))?;
        let entry = *self.nodes.get(&entry_id).ok_or_else(|| {
            AnalysisError::MalformedCfg(format!("entry block {} does not exist", entry_id))
        })?;
        let cfg = Cfg {
            graph: self.graph,
            nodes: self.nodes,
            entry,
        };
        debug_assert!(
            cfg.all_blocks_reachable(),
            "CFG violates the reachable-from-entry invariant"
        );
        Ok(cfg)
    }

    fn node(&self, id: BlockId) -> Result<NodeIndex, AnalysisError> {
        self.nodes
            .get(&id)
            .copied()
            .ok_or_else(|| AnalysisError::MalformedCfg(format!("edge references unknown block {}", id)))
    }
}
