//! Human-readable CFG dump for tracing.
//!
//! Free-text output with no stability guarantee; nothing downstream parses
//! it. Blocks print in whatever order block iteration yields.

use std::io::{self, Write};

use crate::cfg::Cfg;
use crate::ir::MethodUnit;

/// Print each block's label (flagging the entry block), its instructions
/// in order, and the labels of its predecessor and successor blocks.
pub fn dump_cfg(out: &mut dyn Write, cfg: &Cfg) -> io::Result<()> {
    for block in cfg.blocks() {
        if block.id == cfg.entry() {
            writeln!(out, "entry block")?;
        }
        writeln!(out, "block {}:", block.id)?;
        for (position, instruction) in &block.instructions {
            writeln!(out, "  {:>4}: {}", position, instruction)?;
        }
        writeln!(out, "  predecessors: {}", labels(cfg.predecessors(block.id)))?;
        writeln!(out, "  successors: {}", labels(cfg.successors(block.id)))?;
        writeln!(out)?;
    }
    Ok(())
}

/// Dump one method with a separator line carrying its descriptor.
pub fn dump_method(out: &mut dyn Write, unit: &MethodUnit) -> io::Result<()> {
    writeln!(out, "-------------------------------- {}", unit.descriptor)?;
    dump_cfg(out, &unit.cfg)
}

fn labels(ids: impl Iterator<Item = crate::cfg::BlockId>) -> String {
    let labels: Vec<String> = ids.map(|id| id.to_string()).collect();
    labels.join(", ")
}
