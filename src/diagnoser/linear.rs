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

//! Linear diagnosis: walk a [`super::Diagnoser`] one observation label at a
//! time, relaxing a frontier of `(node, accumulated relevance)` pairs, so
//! that diagnosing an observation costs one pass over its labels instead of
//! rebuilding an observation-filtered space from scratch.

use super::{DiagNodeIdx, Diagnoser};
use crate::network::Label;
use crate::regex;
use std::collections::HashMap;

/// Diagnose `observation` against `diagnoser`: returns a relevance regex,
/// possibly empty.
pub fn diagnose(diagnoser: &Diagnoser, observation: &[Label]) -> String {
    let mut frontier: HashMap<DiagNodeIdx, String> = HashMap::new();
    frontier.insert(diagnoser.initial(), String::new());

    for label in observation {
        let mut next: HashMap<DiagNodeIdx, String> = HashMap::new();
        for (&x, r) in &frontier {
            for (_, y, edge) in diagnoser.outgoing(x) {
                if &edge.observability != label {
                    continue;
                }
                let r_prime = regex::concat(r, &edge.relevance);
                next.entry(y)
                    .and_modify(|existing| *existing = regex::alternate(existing, &r_prime))
                    .or_insert(r_prime);
            }
        }
        log::trace!("diagnoser frontier after label {:?}: {} node(s)", label, next.len());
        frontier = next;
    }

    let accepting: Vec<(DiagNodeIdx, String)> = frontier
        .into_iter()
        .filter(|(x, _)| diagnoser.node(*x).is_accepting())
        .collect();

    match accepting.len() {
        0 => String::new(),
        1 => {
            let (x, r) = &accepting[0];
            regex::concat(r, diagnoser.node(*x).closure.diagnosis.as_deref().unwrap_or(""))
        }
        _ => {
            let mut out: Option<String> = None;
            for (x, r) in &accepting {
                let term = regex::concat(r, diagnoser.node(*x).closure.diagnosis.as_deref().unwrap_or(""));
                out = Some(match out {
                    Some(acc) => regex::alternate(&acc, &term),
                    None => term,
                });
            }
            out.unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{fixtures, regex, space};

    #[test]
    fn minimal_loop_linear_diagnosis_is_f() {
        let net = fixtures::minimal_loop();
        let space = space::prune(space::Space::build(&net)).unwrap();
        let d = super::super::build(&space);
        let result = super::diagnose(&d, &["o1".to_string()]);
        assert!(regex::equivalent(&result, "f"));
    }

    #[test]
    fn empty_observation_yields_the_initial_closures_own_diagnosis() {
        let net = fixtures::minimal_loop();
        let space = space::prune(space::Space::build(&net)).unwrap();
        let d = super::super::build(&space);
        // With no labels consumed, the frontier never leaves the initial
        // closure, whose own diagnosis is the empty word.
        let result = super::diagnose(&d, &[]);
        assert!(regex::equivalent(&result, ""));
    }

    #[test]
    fn series_collapse_linear_diagnosis_matches_batch() {
        let net = fixtures::series_collapse();
        let space = space::prune(space::Space::build(&net)).unwrap();
        let d = super::super::build(&space);
        let result = super::diagnose(&d, &["o".to_string()]);
        assert!(regex::equivalent(&result, "abc"));
    }
}
