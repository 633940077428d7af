//! Instruction-level intermediate representation consumed by the analyses.
//!
//! The analyses never parse bytecode themselves; they receive methods whose
//! instructions have already been lowered into the closed `Instruction` enum
//! defined here, together with the method identity and local-variable
//! metadata needed for receiver-name resolution.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cfg::Cfg;

/// How an invocation dispatches to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dispatch {
    /// Static method call; no receiver object.
    Static,
    /// Virtual dispatch on a class instance.
    Virtual,
    /// Dispatch through an interface.
    Interface,
    /// Constructor or private/super call; receiver is implicit.
    Special,
    /// `invokedynamic`-style call site.
    Dynamic,
}

impl fmt::Display for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = match self {
            Dispatch::Static => "invokestatic",
            Dispatch::Virtual => "invokevirtual",
            Dispatch::Interface => "invokeinterface",
            Dispatch::Special => "invokespecial",
            Dispatch::Dynamic => "invokedynamic",
        };
        f.write_str(mnemonic)
    }
}

/// One instruction, tagged by kind with kind-specific operands.
///
/// Kinds the analyses do not care about arrive as `Other` and only matter
/// for the diagnostic dump; predicates treat them as non-matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    /// Push the value of a local-variable slot onto the evaluation stack.
    LoadLocal { slot: u16 },
    /// Push the value of an instance field onto the evaluation stack.
    LoadField { owner: String, field: String },
    /// Call a method.
    Invoke {
        dispatch: Dispatch,
        owner: String,
        method: String,
        signature: String,
    },
    /// Any instruction the analyses have no use for.
    Other { mnemonic: String },
}

impl Instruction {
    /// True for a static call to `owner.method`, regardless of signature.
    pub fn is_static_call_to(&self, owner: &str, method: &str) -> bool {
        matches!(
            self,
            Instruction::Invoke {
                dispatch: Dispatch::Static,
                owner: o,
                method: m,
                ..
            } if o == owner && m == method
        )
    }

    /// True for calls that have a receiver object worth naming
    /// (virtual and interface dispatch only).
    pub fn has_named_receiver(&self) -> bool {
        matches!(
            self,
            Instruction::Invoke {
                dispatch: Dispatch::Virtual | Dispatch::Interface,
                ..
            }
        )
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::LoadLocal { slot } => write!(f, "aload {}", slot),
            Instruction::LoadField { owner, field } => write!(f, "getfield {}.{}", owner, field),
            Instruction::Invoke {
                dispatch,
                owner,
                method,
                signature,
            } => write!(f, "{} {}.{}{}", dispatch, owner, method, signature),
            Instruction::Other { mnemonic } => f.write_str(mnemonic),
        }
    }
}

/// Identity of an analyzed method: declaring class plus signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub class_name: String,
    pub method_name: String,
    pub signature: String,
}

impl MethodDescriptor {
    pub fn new(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            signature: signature.into(),
        }
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}{}",
            self.class_name, self.method_name, self.signature
        )
    }
}

/// One local-variable name, valid for a byte range of the method body.
///
/// A slot index may be reused by different variables at different
/// positions, so lookups are scoped by program position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalVariableBinding {
    pub slot: u16,
    pub name: String,
    /// First program position at which the binding is in effect (inclusive).
    pub start_pc: u32,
    /// Position at which the binding goes out of effect (exclusive).
    pub end_pc: u32,
}

/// Per-method table of local-variable bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalVariableTable {
    bindings: Vec<LocalVariableBinding>,
}

impl LocalVariableTable {
    pub fn new(bindings: Vec<LocalVariableBinding>) -> Self {
        Self { bindings }
    }

    /// Resolve the name bound to `slot` at program position `position`.
    pub fn name_at(&self, slot: u16, position: u32) -> Option<&str> {
        self.bindings
            .iter()
            .find(|b| b.slot == slot && b.start_pc <= position && position < b.end_pc)
            .map(|b| b.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Everything the analyses need for one method: its identity, its
/// local-variable table, and its already-built control-flow graph.
#[derive(Debug, Clone)]
pub struct MethodUnit {
    pub descriptor: MethodDescriptor,
    pub locals: LocalVariableTable,
    pub cfg: Cfg,
}

impl MethodUnit {
    /// Borrow the per-method metadata the analyses take as an explicit
    /// context parameter.
    pub fn context(&self) -> MethodContext<'_> {
        MethodContext {
            descriptor: &self.descriptor,
            locals: &self.locals,
        }
    }
}

/// Explicit per-method analysis context.
///
/// Passed as a parameter to every analysis that needs method metadata, so
/// no analysis carries hidden per-visit state and all of them stay safely
/// callable across methods in parallel.
#[derive(Debug, Clone, Copy)]
pub struct MethodContext<'a> {
    pub descriptor: &'a MethodDescriptor,
    pub locals: &'a LocalVariableTable,
}
