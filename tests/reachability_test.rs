//! Integration tests for source-to-sink reachability.

mod common;

use std::collections::HashSet;

use cfglint::analysis::{classify_blocks, reaches, source_reaches_sink};
use cfglint::{BlockId, EdgeKind, Instruction};
use common::{block, cfg, random_call, sin_call, static_call};

fn is_random(insn: &Instruction) -> bool {
    insn.is_static_call_to("java.lang.Math", "random")
}

fn is_sin(insn: &Instruction) -> bool {
    insn.is_static_call_to("java.lang.Math", "sin")
}

#[test]
fn source_immediately_followed_by_sink_in_one_block() {
    // Zero traversal steps: the block is both source and sink.
    let cfg = cfg(vec![block(0, vec![random_call(), sin_call()])], &[], 0);
    assert!(source_reaches_sink(&cfg, is_random, is_sin));
}

#[test]
fn sink_on_an_unconnected_branch_is_not_reached() {
    // 0 branches to 1 (source) and 2 (sink); no path from 1 to 2.
    let cfg = cfg(
        vec![
            block(0, vec![]),
            block(1, vec![random_call()]),
            block(2, vec![sin_call()]),
        ],
        &[
            (0, 1, EdgeKind::ConditionalBranch),
            (0, 2, EdgeKind::FallThrough),
        ],
        0,
    );
    assert!(!source_reaches_sink(&cfg, is_random, is_sin));
}

#[test]
fn sink_several_blocks_downstream_is_reached() {
    let cfg = cfg(
        vec![
            block(0, vec![random_call()]),
            block(1, vec![]),
            block(2, vec![]),
            block(3, vec![sin_call()]),
        ],
        &[
            (0, 1, EdgeKind::Normal),
            (1, 2, EdgeKind::Normal),
            (2, 3, EdgeKind::Normal),
        ],
        0,
    );
    assert!(source_reaches_sink(&cfg, is_random, is_sin));
}

#[test]
fn sink_upstream_of_the_source_is_not_reached() {
    let cfg = cfg(
        vec![block(0, vec![sin_call()]), block(1, vec![random_call()])],
        &[(0, 1, EdgeKind::Normal)],
        0,
    );
    assert!(!source_reaches_sink(&cfg, is_random, is_sin));
}

#[test]
fn multiple_sources_and_sinks_need_only_one_path() {
    // Source in 1 is stuck; source in 2 reaches the sink in 4.
    let cfg = cfg(
        vec![
            block(0, vec![]),
            block(1, vec![random_call()]),
            block(2, vec![random_call()]),
            block(3, vec![sin_call()]),
            block(4, vec![sin_call()]),
        ],
        &[
            (0, 1, EdgeKind::ConditionalBranch),
            (0, 2, EdgeKind::FallThrough),
            (0, 3, EdgeKind::HandledException),
            (2, 4, EdgeKind::Normal),
        ],
        0,
    );
    assert!(source_reaches_sink(&cfg, is_random, is_sin));
}

#[test]
fn classification_feeds_the_search() {
    let cfg = cfg(
        vec![
            block(0, vec![random_call(), sin_call()]),
            block(1, vec![static_call("java.lang.Math", "cos")]),
        ],
        &[(0, 1, EdgeKind::Normal)],
        0,
    );
    let (sources, sinks) = classify_blocks(&cfg, is_random, is_sin);
    assert_eq!(sources, HashSet::from([BlockId(0)]));
    assert_eq!(sinks, HashSet::from([BlockId(0)]));
    assert!(reaches(&cfg, &sources, &sinks));
}

#[test]
fn empty_source_or_sink_set_short_circuits() {
    let cfg = cfg(
        vec![block(0, vec![random_call()]), block(1, vec![])],
        &[(0, 1, EdgeKind::Normal)],
        0,
    );
    let sources = HashSet::from([BlockId(0)]);
    let empty = HashSet::new();
    assert!(!reaches(&cfg, &sources, &empty));
    assert!(!reaches(&cfg, &empty, &sources));
}

#[test]
fn search_terminates_on_a_looping_method() {
    let cfg = cfg(
        vec![
            block(0, vec![random_call()]),
            block(1, vec![]),
            block(2, vec![sin_call()]),
        ],
        &[
            (0, 1, EdgeKind::Normal),
            (1, 0, EdgeKind::Normal),
            (1, 2, EdgeKind::ConditionalBranch),
        ],
        0,
    );
    assert!(source_reaches_sink(&cfg, is_random, is_sin));
}

#[test]
fn virtual_random_call_is_not_a_source() {
    let cfg = cfg(
        vec![block(
            0,
            vec![
                common::virtual_call("java.lang.Math", "random"),
                sin_call(),
            ],
        )],
        &[],
        0,
    );
    assert!(!source_reaches_sink(&cfg, is_random, is_sin));
}
