//! Cycle detection over the control-flow graph.
//!
//! A method "loops" when a directed cycle exists among the blocks reachable
//! from entry, considering only edges that can actually return control to
//! normal flow. Unhandled-exception edges model abrupt termination and are
//! excluded: a "loop" that exists only through one of them is not a loop.

use std::collections::HashMap;

use crate::cfg::{BlockId, Cfg, EdgeKind};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    /// On the current DFS path.
    Gray,
    /// Fully explored.
    Black,
}

/// True iff the CFG contains a directed cycle reachable from entry over
/// non-unhandled-exception edges.
///
/// Three-color depth-first search: an edge into a gray block is an edge
/// back into the path currently being explored, which is definitionally a
/// back edge and therefore a cycle. Edges into black blocks are ordinary
/// joins (a block reached by two forward paths) and never count. The
/// verdict is independent of block and edge iteration order.
pub fn has_cycle(cfg: &Cfg) -> bool {
    let entry = cfg.entry();
    let mut color: HashMap<BlockId, Color> = HashMap::new();
    color.insert(entry, Color::Gray);
    let mut stack = vec![(entry, looping_successors(cfg, entry))];

    while let Some(frame) = stack.last_mut() {
        let block = frame.0;
        if let Some(next) = frame.1.next() {
            match color.get(&next) {
                Some(Color::Gray) => return true,
                Some(Color::Black) => {}
                None => {
                    color.insert(next, Color::Gray);
                    stack.push((next, looping_successors(cfg, next)));
                }
            }
        } else {
            color.insert(block, Color::Black);
            stack.pop();
        }
    }
    false
}

/// Successors along edges that participate in looping semantics.
fn looping_successors(cfg: &Cfg, block: BlockId) -> std::vec::IntoIter<BlockId> {
    cfg.outgoing_edges(block)
        .filter(|(kind, _)| *kind != EdgeKind::UnhandledException)
        .map(|(_, target)| target)
        .collect::<Vec<_>>()
        .into_iter()
}
