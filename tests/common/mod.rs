// Test utility module for cfglint integration tests
#![allow(dead_code)]

use cfglint::ir::{LocalVariableBinding, LocalVariableTable};
use cfglint::{
    BasicBlock, BlockId, Cfg, CfgBuilder, Dispatch, EdgeKind, Instruction, MethodDescriptor,
    MethodUnit,
};

pub fn static_call(owner: &str, method: &str) -> Instruction {
    Instruction::Invoke {
        dispatch: Dispatch::Static,
        owner: owner.to_string(),
        method: method.to_string(),
        signature: "()D".to_string(),
    }
}

pub fn virtual_call(owner: &str, method: &str) -> Instruction {
    Instruction::Invoke {
        dispatch: Dispatch::Virtual,
        owner: owner.to_string(),
        method: method.to_string(),
        signature: "()V".to_string(),
    }
}

pub fn random_call() -> Instruction {
    static_call("java.lang.Math", "random")
}

pub fn sin_call() -> Instruction {
    static_call("java.lang.Math", "sin")
}

/// A block whose instructions sit at positions 0, 3, 6, ...
pub fn block(id: u32, instructions: Vec<Instruction>) -> BasicBlock {
    let instructions = instructions
        .into_iter()
        .enumerate()
        .map(|(i, insn)| (i as u32 * 3, insn))
        .collect();
    BasicBlock::new(BlockId(id), instructions)
}

pub fn cfg(blocks: Vec<BasicBlock>, edges: &[(u32, u32, EdgeKind)], entry: u32) -> Cfg {
    let mut builder = CfgBuilder::new();
    for b in blocks {
        builder.add_block(b).unwrap();
    }
    for &(from, to, kind) in edges {
        builder.add_edge(BlockId(from), BlockId(to), kind).unwrap();
    }
    builder.entry(BlockId(entry));
    builder.build().unwrap()
}

/// Empty blocks 0..count wired by `edges`, entering at block 0.
pub fn bare_cfg(count: u32, edges: &[(u32, u32, EdgeKind)]) -> Cfg {
    cfg(
        (0..count).map(|id| BasicBlock::empty(BlockId(id))).collect(),
        edges,
        0,
    )
}

pub fn method_unit(name: &str, cfg: Cfg) -> MethodUnit {
    MethodUnit {
        descriptor: MethodDescriptor::new("com.example.Demo", name, "()V"),
        locals: LocalVariableTable::default(),
        cfg,
    }
}

pub fn method_unit_with_locals(
    name: &str,
    cfg: Cfg,
    bindings: Vec<LocalVariableBinding>,
) -> MethodUnit {
    MethodUnit {
        descriptor: MethodDescriptor::new("com.example.Demo", name, "()V"),
        locals: LocalVariableTable::new(bindings),
        cfg,
    }
}
