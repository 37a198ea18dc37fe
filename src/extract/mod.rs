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

//! # Regex extraction
//!
//! State elimination over a behavioral space, collapsing it down to a
//! single relevance-regex edge, plus the silent-closure machinery used by
//! the diagnoser.
//!
//! Rewrite priority is series first, then parallel, then the
//! intermediate-node-with-self-loop rule: this order is semantically
//! significant for the textual form of the result, though not for the
//! language it denotes.

pub mod closure;

pub use closure::{build_closure, entry_nodes, extract_subscripted, Closure};

use crate::regex;
use crate::space::{Edge, Node, NodeIdx, Space};

fn synthetic_node(accepting: bool) -> Node {
    Node { state_vector: Vec::new(), buffer_vector: Vec::new(), is_accepting: accepting, observation_index: 0 }
}

/// Introduce the normalized single source `n0` and single sink `nq` that
/// the reduction loop requires.
fn normalize(g: &mut Space) -> (NodeIdx, NodeIdx) {
    let n0 = if g.incoming(g.initial()).next().is_some() {
        let fresh = g.add_node(synthetic_node(false));
        g.add_edge(fresh, g.initial(), Edge::synthetic(""));
        g.set_initial(fresh);
        fresh
    } else {
        g.initial()
    };

    let acceptance = g.acceptance_nodes();
    debug_assert!(!acceptance.is_empty(), "extract operates on a pruned space, which always has an acceptance node");
    let needs_sink = acceptance.len() > 1 || g.outgoing(acceptance[0]).next().is_some();
    let nq = if needs_sink {
        let fresh = g.add_node(synthetic_node(true));
        for &a in &acceptance {
            g.node_mut(a).is_accepting = false;
            g.add_edge(a, fresh, Edge::synthetic(""));
        }
        fresh
    } else {
        acceptance[0]
    };
    (n0, nq)
}

/// A node qualifies as the interior of a series chain iff it has exactly
/// one incoming and one outgoing edge, neither of which is a self-loop.
fn find_series_node(g: &Space) -> Option<NodeIdx> {
    g.node_indices().find(|&v| {
        let mut incoming = g.incoming(v);
        let (in_e, in_src, _) = match incoming.next() {
            Some(x) => x,
            None => return false,
        };
        if incoming.next().is_some() || in_src == v {
            return false;
        }
        let _ = in_e;
        let mut outgoing = g.outgoing(v);
        let (_, _, out_tgt) = match outgoing.next() {
            Some(x) => x,
            None => return false,
        };
        outgoing.next().is_none() && out_tgt != v
    })
}

fn collapse_series(g: &mut Space, v: NodeIdx) {
    let (in_edge, in_src, _) = g.incoming(v).next().expect("v chosen as a series node");
    let (out_edge, _, out_tgt) = g.outgoing(v).next().expect("v chosen as a series node");
    let label = regex::concat(&g.edge(in_edge).relevance, &g.edge(out_edge).relevance);
    g.remove_node(v);
    g.add_edge(in_src, out_tgt, Edge::synthetic(label));
}

/// The first pair `(u, v)` (in edge-discovery order) joined by two or more
/// parallel edges, together with those edges.
fn find_parallel_bundle(g: &Space) -> Option<(NodeIdx, NodeIdx, Vec<crate::space::EdgeIdx>)> {
    let mut groups: Vec<((NodeIdx, NodeIdx), Vec<crate::space::EdgeIdx>)> = Vec::new();
    for e in g.edge_indices() {
        let pair = g.endpoints(e);
        match groups.iter_mut().find(|(p, _)| *p == pair) {
            Some(entry) => entry.1.push(e),
            None => groups.push((pair, vec![e])),
        }
    }
    groups.into_iter().find(|(_, edges)| edges.len() >= 2).map(|((u, v), edges)| (u, v, edges))
}

fn collapse_parallel(g: &mut Space, u: NodeIdx, v: NodeIdx, edges: Vec<crate::space::EdgeIdx>) {
    let mut label: Option<String> = None;
    for &e in &edges {
        let r = g.edge(e).relevance.clone();
        label = Some(match label {
            Some(acc) => regex::alternate(&acc, &r),
            None => r,
        });
    }
    for &e in &edges {
        g.remove_edge(e);
    }
    g.add_edge(u, v, Edge::synthetic(label.unwrap_or_default()));
}

fn collapse_intermediate(g: &mut Space, w: NodeIdx) {
    let incoming: Vec<(crate::space::EdgeIdx, NodeIdx)> =
        g.incoming(w).filter(|&(_, s, _)| s != w).map(|(e, s, _)| (e, s)).collect();
    let outgoing: Vec<(crate::space::EdgeIdx, NodeIdx)> =
        g.outgoing(w).filter(|&(_, _, t)| t != w).map(|(e, _, t)| (e, t)).collect();
    let loop_relevance =
        g.outgoing(w).find(|&(_, _, t)| t == w).map(|(e, _, _)| g.edge(e).relevance.clone()).unwrap_or_default();

    let mut new_edges = Vec::with_capacity(incoming.len() * outgoing.len());
    for (&(in_e, x), &(out_e, y)) in itertools::iproduct!(&incoming, &outgoing) {
        let r_in = g.edge(in_e).relevance.clone();
        let r_out = g.edge(out_e).relevance.clone();
        new_edges.push((x, y, regex::intermediate_replace(&r_in, &loop_relevance, &r_out)));
    }

    g.remove_node(w);
    for (x, y, label) in new_edges {
        g.add_edge(x, y, Edge::synthetic(label));
    }
}

/// Collapse the pruned behavioral space `space` to a single relevance-regex
/// string.
///
/// Operates on a deep copy ([`Space::deep_copy`]); `space` itself is left
/// untouched so the caller can reuse it (e.g. once per closure entry when
/// the diagnoser is compiled).
pub fn extract(space: &Space) -> String {
    let mut g = space.deep_copy();
    let (n0, nq) = normalize(&mut g);

    while g.edge_count() > 1 {
        if let Some(v) = find_series_node(&g) {
            log::trace!("series collapse at node {:?}", v);
            collapse_series(&mut g, v);
            continue;
        }
        if let Some((u, v, edges)) = find_parallel_bundle(&g) {
            log::trace!("parallel collapse {:?} -> {:?} ({} edges)", u, v, edges.len());
            collapse_parallel(&mut g, u, v, edges);
            continue;
        }
        let w = g
            .node_indices()
            .find(|&n| n != n0 && n != nq)
            .expect("edge_count() > 1 implies some eliminable node remains");
        log::trace!("intermediate collapse at node {:?}", w);
        collapse_intermediate(&mut g, w);
    }

    match g.edge_indices().next() {
        Some(e) => g.edge(e).relevance.clone(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use crate::{fixtures, regex, space};

    fn filtered(network_fn: fn() -> crate::Network, observation: &[&str]) -> String {
        let net = network_fn();
        let observation: Vec<String> = observation.iter().map(|s| s.to_string()).collect();
        let space = space::prune(space::build_observation(&net, &observation).unwrap()).unwrap();
        super::extract(&space)
    }

    #[test]
    fn minimal_loop_extracts_f() {
        assert!(regex::equivalent(&filtered(fixtures::minimal_loop, &["o1"]), "f"));
    }

    #[test]
    fn alternation_extracts_a_or_b() {
        assert!(regex::equivalent(&filtered(fixtures::alternation_from_parallel, &["o"]), "a|b"));
    }

    #[test]
    fn series_extracts_concatenation() {
        assert!(regex::equivalent(&filtered(fixtures::series_collapse, &["o"]), "abc"));
    }

    #[test]
    fn self_loop_extracts_starred_form() {
        assert!(regex::equivalent(&filtered(fixtures::self_loop_under_star, &["o"]), "ax*b"));
    }
}
