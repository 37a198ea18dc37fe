// retefa-diag: model-based diagnosis for finite-automata networks
// Copyright (C) 2026  retefa-diag contributors
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! End-to-end tests over the fixture networks in [`crate::fixtures`],
//! exercising space construction, pruning, extraction, and diagnoser-driven
//! diagnosis together rather than any single module in isolation.
//! Per-module unit tests live beside their code; this is the integration
//! layer.

use crate::{diagnoser, diagnosis, fixtures, linear_diagnosis, pruned_observation_space, pruned_space, regex};
use lazy_static::lazy_static;

lazy_static! {
    /// Shared interning table for the observation labels used across the
    /// table-driven diagnosis test below.
    static ref O1: String = "o1".to_string();
    static ref O: String = "o".to_string();
}

/// One row of the table-driven diagnosis check: a fixture constructor, the
/// observation to diagnose it against, and the expected (equivalence-class)
/// diagnosis.
struct ScenarioRow {
    name: &'static str,
    network: fn() -> crate::Network,
    observation: fn() -> Vec<String>,
    expected: &'static str,
}

lazy_static! {
    static ref SCENARIOS: Vec<ScenarioRow> = vec![
        ScenarioRow {
            name: "minimal_loop",
            network: fixtures::minimal_loop,
            observation: || vec![O1.clone()],
            expected: "f",
        },
        ScenarioRow {
            name: "alternation_from_parallel",
            network: fixtures::alternation_from_parallel,
            observation: || vec![O.clone()],
            expected: "a|b",
        },
        ScenarioRow {
            name: "series_collapse",
            network: fixtures::series_collapse,
            observation: || vec![O.clone()],
            expected: "abc",
        },
        ScenarioRow {
            name: "self_loop_under_star",
            network: fixtures::self_loop_under_star,
            observation: || vec![O.clone()],
            expected: "ax*b",
        },
    ];
}

#[test]
fn table_driven_scenarios_match_their_expected_diagnosis() {
    for row in SCENARIOS.iter() {
        let net = (row.network)();
        let observation = (row.observation)();
        let space = pruned_observation_space(&net, &observation).unwrap();
        let got = diagnosis(&space);
        assert!(
            regex::equivalent(&got, row.expected),
            "scenario {:?}: expected {:?}, got {:?}",
            row.name,
            row.expected,
            got
        );
    }
}

#[test]
fn minimal_loop_observation_space_tracks_observation_index_per_node() {
    let net = fixtures::minimal_loop();
    let observation = vec!["o1".to_string()];
    let space = pruned_observation_space(&net, &observation).unwrap();

    // N0 (the initial node, observationIndex 0) has not yet consumed the
    // one-label observation, so it is non-accepting despite empty buffers;
    // firing t1 reaches a non-accepting N1 (observationIndex 1, buffer
    // "x"); firing the silent t2 from there reaches a third, distinct node
    // that shares N0's state/buffer but not its observationIndex, and which
    // is accepting once the observation is fully consumed.
    assert_eq!(space.node_count(), 3);
    assert_eq!(space.edge_count(), 2);

    let n0 = space.node(space.initial());
    assert!(!n0.is_accepting);
    assert_eq!(n0.observation_index, 0);
    assert!(n0.buffers_empty());

    let accepting: Vec<_> = space.node_indices().filter(|&n| space.node(n).is_accepting).collect();
    assert_eq!(accepting.len(), 1);
    let terminal = space.node(accepting[0]);
    assert_eq!(terminal.observation_index, 1);
    assert!(terminal.buffers_empty());
}

#[test]
fn minimal_loop_diagnosis_is_f() {
    let net = fixtures::minimal_loop();
    let observation = vec!["o1".to_string()];
    let space = pruned_observation_space(&net, &observation).unwrap();
    assert!(regex::equivalent(&diagnosis(&space), "f"));
}

#[test]
fn minimal_loop_linear_diagnosis_matches_batch() {
    let net = fixtures::minimal_loop();
    let observation = vec!["o1".to_string()];
    let space = pruned_observation_space(&net, &observation).unwrap();
    let d = diagnoser(&pruned_space(&net).unwrap());
    assert!(regex::equivalent(&linear_diagnosis(&d, &observation), &diagnosis(&space)));
}

#[test]
fn alternation_from_parallel_transitions() {
    let net = fixtures::alternation_from_parallel();
    let observation = vec!["o".to_string()];
    let space = pruned_observation_space(&net, &observation).unwrap();
    assert!(regex::equivalent(&diagnosis(&space), "a|b"));
}

#[test]
fn series_collapse_concatenates_relevance() {
    let net = fixtures::series_collapse();
    let observation = vec!["o".to_string()];
    let space = pruned_observation_space(&net, &observation).unwrap();
    assert!(regex::equivalent(&diagnosis(&space), "abc"));
}

#[test]
fn self_loop_under_star_is_starred() {
    let net = fixtures::self_loop_under_star();
    let observation = vec!["o".to_string()];
    let space = pruned_observation_space(&net, &observation).unwrap();
    assert!(regex::equivalent(&diagnosis(&space), "ax*b"));
}

#[test]
fn two_acceptance_closure_alternates_decorations() {
    let net = fixtures::two_acceptance_closure();
    let space = pruned_space(&net).unwrap();
    let d = diagnoser(&space);

    // Single closure rooted at the BS initial node, with three acceptance
    // nodes: the entry itself (vacuously BS-accepting, no links to keep
    // nonempty) plus a1 and a2.
    assert_eq!(d.node_count(), 1);
    let root = d.node(d.initial());
    assert!(root.is_accepting());
    assert!(regex::equivalent(root.closure.diagnosis.as_deref().unwrap_or(""), "ε|p|q"));
}

#[test]
fn unfiltered_space_matches_observation_filtered_acceptance_count() {
    // The unfiltered space always accepts at the initial node (every
    // configuration reachable with empty buffers is accepting, regardless
    // of what has been observed); this must still hold once a network has
    // more than a trivial single-state loop.
    let net = fixtures::series_collapse();
    let space = pruned_space(&net).unwrap();
    assert!(space.node(space.initial()).is_accepting);
}

#[test]
fn observation_incompatible_label_is_rejected() {
    let net = fixtures::minimal_loop();
    let bogus = vec!["not-a-real-label".to_string()];
    let err = pruned_observation_space(&net, &bogus).unwrap_err();
    match err {
        crate::Error::ObservationIncompatible(label) => assert_eq!(label, "not-a-real-label"),
        other => panic!("expected ObservationIncompatible, got {:?}", other),
    }
}

#[test]
fn empty_observation_is_trivially_satisfied_by_the_initial_node() {
    // With an empty observation, the initial node's observationIndex (0)
    // already equals its length, so it is accepting from construction and
    // no transition can ever fire (every transition here is observable, and
    // an empty observation admits no labels to match against).
    let net = fixtures::alternation_from_parallel();
    let space = pruned_observation_space(&net, &[]).unwrap();
    assert_eq!(space.node_count(), 1);
    assert_eq!(diagnosis(&space), "");
}
