//! Loading method sets from JSON fixtures.
//!
//! The fixture stands in for the CFG-construction collaborator: a JSON
//! array of methods, each carrying its descriptor, local-variable table,
//! blocks, kind-tagged edges, and entry label. A record may instead carry
//! an `error` string, marking a method the collaborator could not analyze
//! (abstract, native, bytecode analysis failed); such methods are
//! surfaced as `AnalysisError::UnanalyzableMethod` and skipped by the
//! driver without affecting the rest of the set.

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::Deserialize;

use crate::cfg::{BasicBlock, BlockId, CfgBuilder, EdgeKind};
use crate::errors::AnalysisError;
use crate::ir::{
    Instruction, LocalVariableBinding, LocalVariableTable, MethodDescriptor, MethodUnit,
};

#[derive(Debug, Deserialize)]
struct MethodRecord {
    descriptor: MethodDescriptor,
    #[serde(default)]
    locals: Vec<LocalVariableBinding>,
    #[serde(default)]
    blocks: Vec<BlockRecord>,
    #[serde(default)]
    edges: Vec<EdgeRecord>,
    #[serde(default)]
    entry: Option<u32>,
    /// Set when the collaborator failed to produce a CFG for this method.
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BlockRecord {
    id: u32,
    #[serde(default)]
    instructions: Vec<(u32, Instruction)>,
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    from: u32,
    to: u32,
    kind: EdgeKind,
}

/// Load a method-set fixture. Each method builds independently (in
/// parallel across methods); a per-method failure becomes an `Err` entry
/// in input order rather than failing the load.
pub fn load_methods(path: &Path) -> Result<Vec<Result<MethodUnit, AnalysisError>>, AnalysisError> {
    let contents = fs::read_to_string(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_methods(&contents).map_err(|source| AnalysisError::Fixture {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a fixture from a JSON string.
pub fn parse_methods(
    contents: &str,
) -> Result<Vec<Result<MethodUnit, AnalysisError>>, serde_json::Error> {
    let records: Vec<MethodRecord> = serde_json::from_str(contents)?;
    Ok(records.into_par_iter().map(build_unit).collect())
}

fn build_unit(record: MethodRecord) -> Result<MethodUnit, AnalysisError> {
    let descriptor = record.descriptor;
    if let Some(reason) = record.error {
        return Err(AnalysisError::unanalyzable(descriptor.to_string(), reason));
    }

    build_cfg(&record.blocks, &record.edges, record.entry)
        .map(|cfg| MethodUnit {
            locals: LocalVariableTable::new(record.locals),
            cfg,
            descriptor: descriptor.clone(),
        })
        .map_err(|e| AnalysisError::unanalyzable(descriptor.to_string(), e.to_string()))
}

fn build_cfg(
    blocks: &[BlockRecord],
    edges: &[EdgeRecord],
    entry: Option<u32>,
) -> Result<crate::cfg::Cfg, AnalysisError> {
    let mut builder = CfgBuilder::new();
    for block in blocks {
        builder.add_block(BasicBlock::new(
            BlockId(block.id),
            block.instructions.clone(),
        ))?;
    }
    for edge in edges {
        builder.add_edge(BlockId(edge.from), BlockId(edge.to), edge.kind)?;
    }
    let entry =
        entry.ok_or_else(|| AnalysisError::MalformedCfg("no entry block designated".to_string()))?;
    builder.entry(BlockId(entry));
    builder.build()
}
