//! Receiver-name resolution for virtual and interface call sites.
//!
//! Recovers a human-readable name for the object a method is invoked on:
//! the variable name in `a.foo()`, or the qualified field name in
//! `this.f.foo()`. This is a best-effort, single-step backward heuristic
//! that relies on common compiler patterns; calls on computed receivers
//! such as `foo().bar()` are reported as unresolved. It is deliberately
//! not a general expression-tracking dataflow pass.

use std::fmt;

use crate::cfg::{BasicBlock, Cfg};
use crate::ir::{Instruction, MethodContext};

/// Display name recovered for a call receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiverName {
    /// A local variable, named from the local-variable table.
    Local(String),
    /// An instance field, qualified as `OwnerType.fieldName`. The
    /// qualification disambiguates same-named fields across classes, so
    /// resolved names are unique within a method.
    Field(String),
    /// No supported pattern matched.
    Unresolved,
}

impl fmt::Display for ReceiverName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiverName::Local(name) | ReceiverName::Field(name) => f.write_str(name),
            ReceiverName::Unresolved => f.write_str("<unresolved>"),
        }
    }
}

/// Resolve the receiver of the call at `call_index` within `block`.
///
/// Inspects only the instruction immediately preceding the call in program
/// order. A local-variable load is resolved through the binding table at
/// the preceding instruction's position, since a slot index may be bound
/// to different variables at different points in the method. A field load
/// resolves to `Owner.field`. Anything else is unresolved.
pub fn resolve_receiver(
    block: &BasicBlock,
    call_index: usize,
    ctx: &MethodContext<'_>,
) -> ReceiverName {
    let prior = match call_index.checked_sub(1).and_then(|i| block.instructions.get(i)) {
        Some(prior) => prior,
        None => return ReceiverName::Unresolved,
    };
    let (position, instruction) = prior;

    match instruction {
        Instruction::LoadLocal { slot } => match ctx.locals.name_at(*slot, *position) {
            Some(name) => ReceiverName::Local(name.to_string()),
            None => {
                // A load of a slot with no binding in scope means the
                // collaborator handed us an inconsistent variable table.
                log::warn!(
                    "no local-variable binding for slot {} at position {} in {}",
                    slot,
                    position,
                    ctx.descriptor
                );
                ReceiverName::Unresolved
            }
        },
        Instruction::LoadField { owner, field } => {
            ReceiverName::Field(format!("{}.{}", owner, field))
        }
        _ => ReceiverName::Unresolved,
    }
}

/// Log a receiver/type/name summary for every virtual or interface call in
/// the method. Static and constructor calls have no receiver object worth
/// naming and are skipped.
pub fn log_call_sites(cfg: &Cfg, ctx: &MethodContext<'_>) {
    for block in cfg.blocks() {
        for (index, (_, instruction)) in block.instructions.iter().enumerate() {
            if let Instruction::Invoke { owner, method, .. } = instruction {
                if instruction.has_named_receiver() {
                    let receiver = resolve_receiver(block, index, ctx);
                    log::info!("calling {} on {} of type {}", method, receiver, owner);
                }
            }
        }
    }
}
