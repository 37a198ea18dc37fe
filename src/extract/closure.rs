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

//! Silent closures and the subscripted regex extractor.
//!
//! A silent closure is the sub-graph reachable from an entry node by
//! following only unobservable edges. The subscripted extractor runs the
//! same three state-elimination rewrites as the unlabeled extractor, but
//! keeps track of which closure-acceptance node each surviving edge's
//! relevance ultimately decorates, using the originating space's own
//! `NodeIdx` values as that tag directly rather than deriving a separate
//! identity map: a `NodeIdx` is already a stable, copyable integer handle,
//! so no translation step is needed once the working copy is done.

use crate::regex;
use crate::space::{NodeIdx, Space};
use petgraph::stable_graph::StableDiGraph;
use std::collections::HashMap;

/// The silent closure of an entry node: every node/edge reachable from it by
/// following only unobservable edges, plus the exit/acceptance classification
/// of each closure node.
#[derive(Debug, Clone)]
pub struct Closure {
    /// The BS node this closure was built from.
    pub entry: NodeIdx,
    /// All nodes reachable from `entry` via silent edges (includes `entry`).
    pub nodes: Vec<NodeIdx>,
    /// All silent edges traversed while building the closure.
    pub edges: Vec<crate::space::EdgeIdx>,
    /// Nodes with at least one observable outgoing edge in the BS.
    pub exit_nodes: Vec<NodeIdx>,
    /// Nodes that are exit nodes or themselves accepting in the behavioral
    /// space.
    pub acceptance_nodes: Vec<NodeIdx>,
    /// Per-acceptance-node relevance regex, filled by [`extract_subscripted`].
    pub decorations: HashMap<NodeIdx, String>,
    /// Alternation of the decorations of acceptance nodes that are also
    /// BS-accepting; `None` if no such node exists.
    pub diagnosis: Option<String>,
}

/// Build the silent closure rooted at `entry`.
pub fn build_closure(space: &Space, entry: NodeIdx) -> Closure {
    let mut nodes = vec![entry];
    let mut edges = Vec::new();
    let mut seen = std::collections::HashSet::new();
    seen.insert(entry);
    let mut stack = vec![entry];

    while let Some(n) = stack.pop() {
        for (e, _, t) in space.outgoing(n) {
            if space.edge(e).is_silent() {
                edges.push(e);
                if seen.insert(t) {
                    nodes.push(t);
                    stack.push(t);
                }
            }
        }
    }

    let mut exit_nodes = Vec::new();
    let mut acceptance_nodes = Vec::new();
    for &n in &nodes {
        let is_exit = space.outgoing(n).any(|(e, _, _)| !space.edge(e).is_silent());
        if is_exit {
            exit_nodes.push(n);
        }
        if is_exit || space.node(n).is_accepting {
            acceptance_nodes.push(n);
        }
    }

    Closure { entry, nodes, edges, exit_nodes, acceptance_nodes, decorations: HashMap::new(), diagnosis: None }
}

/// The entry nodes a diagnoser needs one closure per: the behavioral
/// space's initial node, plus every target of an observable edge.
pub fn entry_nodes(space: &Space) -> Vec<NodeIdx> {
    let mut seen = std::collections::HashSet::new();
    let mut entries = vec![space.initial()];
    seen.insert(space.initial());
    for e in space.edge_indices() {
        if !space.edge(e).is_silent() {
            let (_, target) = space.endpoints(e);
            if seen.insert(target) {
                entries.push(target);
            }
        }
    }
    entries
}

/// A subscript names the original closure acceptance node an edge's
/// relevance regex ultimately flows into; `None` is `⊥`.
type Subscript = Option<NodeIdx>;

#[derive(Debug, Clone)]
struct WEdge {
    relevance: String,
    subscript: Subscript,
}

type Work = StableDiGraph<(), WEdge>;
type WIdx = petgraph::stable_graph::NodeIndex;

fn w_incoming(g: &Work, n: WIdx) -> Vec<(petgraph::stable_graph::EdgeIndex, WIdx)> {
    use petgraph::visit::EdgeRef;
    g.edges_directed(n, petgraph::Direction::Incoming).map(|e| (e.id(), e.source())).collect()
}

fn w_outgoing(g: &Work, n: WIdx) -> Vec<(petgraph::stable_graph::EdgeIndex, WIdx)> {
    use petgraph::visit::EdgeRef;
    g.edges_directed(n, petgraph::Direction::Outgoing).map(|e| (e.id(), e.target())).collect()
}

fn has_duplicate_subscript(g: &Work) -> bool {
    let mut seen: Vec<Subscript> = Vec::new();
    for e in g.edge_indices() {
        let s = g[e].subscript;
        if seen.contains(&s) {
            return true;
        }
        seen.push(s);
    }
    false
}

fn find_series_node(g: &Work) -> Option<WIdx> {
    g.node_indices().find(|&v| {
        let incoming = w_incoming(g, v);
        let outgoing = w_outgoing(g, v);
        if incoming.len() != 1 || outgoing.len() != 1 {
            return false;
        }
        let (in_e, in_src) = incoming[0];
        let (_, out_tgt) = outgoing[0];
        in_src != v && out_tgt != v && g[in_e].subscript.is_none()
    })
}

fn collapse_series(g: &mut Work, orig_of: &HashMap<WIdx, NodeIdx>, closure: &Closure, v: WIdx, nq: WIdx) {
    let (in_e, in_src) = w_incoming(g, v)[0];
    let (out_e, out_tgt) = w_outgoing(g, v)[0];
    let r_in = g[in_e].relevance.clone();
    let r_out = g[out_e].relevance.clone();
    let out_subscript = g[out_e].subscript;

    let (label, subscript) = if let Some(sigma) = out_subscript {
        (regex::concat(&r_in, &r_out), Some(sigma))
    } else {
        let v_as_acceptance = orig_of.get(&v).copied().filter(|o| closure.acceptance_nodes.contains(o));
        if out_tgt == nq || v_as_acceptance.is_some() {
            (r_in, v_as_acceptance)
        } else {
            (regex::concat(&r_in, &r_out), None)
        }
    };

    g.remove_node(v);
    g.add_edge(in_src, out_tgt, WEdge { relevance: label, subscript });
}

fn find_parallel_bundle(g: &Work) -> Option<(WIdx, WIdx, Subscript, Vec<petgraph::stable_graph::EdgeIndex>)> {
    let mut groups: Vec<((WIdx, WIdx, Subscript), Vec<petgraph::stable_graph::EdgeIndex>)> = Vec::new();
    for e in g.edge_indices() {
        let (s, t) = g.edge_endpoints(e).expect("valid edge index");
        let key = (s, t, g[e].subscript);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1.push(e),
            None => groups.push((key, vec![e])),
        }
    }
    groups.into_iter().find(|(_, edges)| edges.len() >= 2).map(|((u, v, s), edges)| (u, v, s, edges))
}

fn collapse_parallel(
    g: &mut Work,
    u: WIdx,
    v: WIdx,
    subscript: Subscript,
    edges: Vec<petgraph::stable_graph::EdgeIndex>,
) {
    let mut label: Option<String> = None;
    for &e in &edges {
        let r = g[e].relevance.clone();
        label = Some(match label {
            Some(acc) => regex::alternate(&acc, &r),
            None => r,
        });
    }
    for &e in &edges {
        g.remove_edge(e);
    }
    g.add_edge(u, v, WEdge { relevance: label.unwrap_or_default(), subscript });
}

fn collapse_intermediate(g: &mut Work, orig_of: &HashMap<WIdx, NodeIdx>, closure: &Closure, w: WIdx, nq: WIdx) {
    let incoming: Vec<(petgraph::stable_graph::EdgeIndex, WIdx)> =
        w_incoming(g, w).into_iter().filter(|&(_, s)| s != w).collect();
    let outgoing: Vec<(petgraph::stable_graph::EdgeIndex, WIdx)> =
        w_outgoing(g, w).into_iter().filter(|&(_, t)| t != w).collect();
    let loop_relevance =
        w_outgoing(g, w).into_iter().find(|&(_, t)| t == w).map(|(e, _)| g[e].relevance.clone()).unwrap_or_default();

    let w_as_acceptance = orig_of.get(&w).copied().filter(|o| closure.acceptance_nodes.contains(o));

    let mut new_edges = Vec::with_capacity(incoming.len() * outgoing.len());
    for (&(in_e, x), &(out_e, y)) in itertools::iproduct!(&incoming, &outgoing) {
        let r_in = g[in_e].relevance.clone();
        let r_out = g[out_e].relevance.clone();
        let label = regex::intermediate_replace(&r_in, &loop_relevance, &r_out);
        let subscript = if let Some(sigma) = g[out_e].subscript {
            Some(sigma)
        } else if y == nq && w_as_acceptance.is_some() {
            w_as_acceptance
        } else {
            None
        };
        new_edges.push((x, y, label, subscript));
    }

    g.remove_node(w);
    for (x, y, label, subscript) in new_edges {
        g.add_edge(x, y, WEdge { relevance: label, subscript });
    }
}

/// Run the subscripted state-elimination reduction over `closure`'s silent
/// edges, producing a per-acceptance-node decoration and an overall
/// diagnosis. Fills in `closure.decorations`/`closure.diagnosis` and also
/// returns them for callers that only need the values.
pub fn extract_subscripted(space: &Space, closure: &mut Closure) -> (HashMap<NodeIdx, String>, Option<String>) {
    let mut g: Work = StableDiGraph::new();
    let mut mapped: HashMap<NodeIdx, WIdx> = HashMap::new();
    let mut orig_of: HashMap<WIdx, NodeIdx> = HashMap::new();

    for &n in &closure.nodes {
        let w = g.add_node(());
        mapped.insert(n, w);
        orig_of.insert(w, n);
    }
    for &e in &closure.edges {
        let (s, t) = space.endpoints(e);
        g.add_edge(mapped[&s], mapped[&t], WEdge { relevance: space.edge(e).relevance.clone(), subscript: None });
    }

    let mut entry_w = mapped[&closure.entry];
    if !w_incoming(&g, entry_w).is_empty() {
        let n0 = g.add_node(());
        g.add_edge(n0, entry_w, WEdge { relevance: String::new(), subscript: None });
        entry_w = n0;
    }

    let nq = g.add_node(());
    for &a in &closure.acceptance_nodes {
        let aw = mapped[&a];
        g.add_edge(aw, nq, WEdge { relevance: String::new(), subscript: Some(a) });
    }

    while g.node_count() > 2 || has_duplicate_subscript(&g) {
        if let Some(v) = find_series_node(&g) {
            log::trace!("subscripted series collapse at {:?}", v);
            collapse_series(&mut g, &orig_of, closure, v, nq);
            continue;
        }
        if let Some((u, v, s, edges)) = find_parallel_bundle(&g) {
            log::trace!("subscripted parallel collapse {:?} -> {:?}", u, v);
            collapse_parallel(&mut g, u, v, s, edges);
            continue;
        }
        let w = g
            .node_indices()
            .find(|&n| n != entry_w && n != nq)
            .expect("node_count() > 2 implies some eliminable node remains");
        log::trace!("subscripted intermediate collapse at {:?}", w);
        collapse_intermediate(&mut g, &orig_of, closure, w, nq);
    }

    let mut decorations: HashMap<NodeIdx, String> = HashMap::new();
    for e in g.edge_indices() {
        let sigma = g[e].subscript.expect("reduction invariant: every surviving edge carries a subscript");
        let r = g[e].relevance.clone();
        decorations
            .entry(sigma)
            .and_modify(|existing| *existing = regex::alternate(existing, &r))
            .or_insert(r);
    }

    let diagnosis = {
        let mut acc: Option<String> = None;
        for &a in &closure.acceptance_nodes {
            if space.node(a).is_accepting {
                if let Some(d) = decorations.get(&a) {
                    acc = Some(match acc {
                        Some(existing) => regex::alternate(&existing, d),
                        None => d.clone(),
                    });
                }
            }
        }
        acc
    };

    closure.decorations = decorations.clone();
    closure.diagnosis = diagnosis.clone();
    (decorations, diagnosis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fixtures, regex};

    #[test]
    fn entry_nodes_includes_initial_and_observable_targets() {
        let net = fixtures::minimal_loop();
        let observation = vec!["o1".to_string()];
        let space = crate::space::build_observation(&net, &observation).unwrap();
        let entries = entry_nodes(&space);
        assert!(entries.contains(&space.initial()));
        // t1 is the only observable edge; its target must also be an entry.
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn two_acceptance_closure_decorates_both_branches() {
        let net = fixtures::two_acceptance_closure();
        let space = crate::space::Space::build(&net);
        let mut closure = build_closure(&space, space.initial());
        assert_eq!(closure.acceptance_nodes.len(), 3);

        extract_subscripted(&space, &mut closure);
        assert!(regex::equivalent(closure.diagnosis.as_deref().unwrap_or(""), "ε|p|q"));
    }
}
