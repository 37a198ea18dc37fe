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

//! # Diagnoser
//!
//! A compiled graph with one node per silent closure, enabling linear
//! diagnosis in the length of the observation instead of rebuilding an
//! observation-filtered space per query. Each diagnoser edge is a relabeled
//! observable edge of the underlying behavioral space; a frontier walk over
//! this graph (see [`linear`]) relaxes one observation label at a time.

mod linear;

pub use linear::diagnose;

use crate::extract::{build_closure, entry_nodes, extract_subscripted, Closure};
use crate::network::Label;
use crate::space::{NodeIdx, Space};
use petgraph::stable_graph::StableDiGraph;

/// Index of a node in a [`Diagnoser`].
pub type DiagNodeIdx = petgraph::stable_graph::NodeIndex;
/// Index of an edge in a [`Diagnoser`].
pub type DiagEdgeIdx = petgraph::stable_graph::EdgeIndex;

/// A diagnoser node: the silent closure of one BS entry node.
#[derive(Debug, Clone)]
pub struct DiagNode {
    /// The closure this node carries.
    pub closure: Closure,
}

impl DiagNode {
    /// True iff this node's closure has a non-null diagnosis.
    pub fn is_accepting(&self) -> bool {
        self.closure.diagnosis.is_some()
    }
}

/// A diagnoser edge: a relabeled observable BS edge between two closures.
#[derive(Debug, Clone)]
pub struct DiagEdge {
    /// Observability label (never empty: only observable BS edges become
    /// diagnoser edges).
    pub observability: Label,
    /// The exit node's closure decoration (the relevance accumulated from
    /// the closure's entry up to `u`) composed *before* this step's own
    /// relevance, i.e. `decorations[u] ⊕ rel`, not `rel ⊕ decorations[u]`:
    /// the silent prefix that got us to the exit node has to read as a
    /// prefix of the word, or concatenation order across a walk of several
    /// diagnoser edges stops matching the order the underlying transitions
    /// actually fired in.
    pub relevance: Label,
}

/// The compiled diagnoser graph.
#[derive(Debug, Clone)]
pub struct Diagnoser {
    graph: StableDiGraph<DiagNode, DiagEdge>,
    initial: DiagNodeIdx,
}

impl Diagnoser {
    /// The diagnoser node corresponding to the BS initial node.
    pub fn initial(&self) -> DiagNodeIdx {
        self.initial
    }

    /// Borrow a diagnoser node's payload.
    pub fn node(&self, n: DiagNodeIdx) -> &DiagNode {
        &self.graph[n]
    }

    /// Iterate `(edge index, target, edge)` for edges outgoing from `n`.
    pub fn outgoing(&self, n: DiagNodeIdx) -> impl Iterator<Item = (DiagEdgeIdx, DiagNodeIdx, &DiagEdge)> + '_ {
        use petgraph::visit::EdgeRef;
        self.graph.edges(n).map(move |e| (e.id(), e.target(), e.weight()))
    }

    /// Number of nodes (one per distinct closure entry).
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Build the diagnoser for a pruned behavioral space `space`.
pub fn build(space: &Space) -> Diagnoser {
    let entries = entry_nodes(space);

    let mut graph: StableDiGraph<DiagNode, DiagEdge> = StableDiGraph::new();
    let mut node_of: std::collections::HashMap<NodeIdx, DiagNodeIdx> = std::collections::HashMap::new();

    for &entry in &entries {
        let mut closure = build_closure(space, entry);
        extract_subscripted(space, &mut closure);
        let idx = graph.add_node(DiagNode { closure });
        node_of.insert(entry, idx);
    }

    for &entry in &entries {
        let x = node_of[&entry];
        let exit_nodes = graph[x].closure.exit_nodes.clone();
        for u in exit_nodes {
            let decoration = graph[x].closure.decorations.get(&u).cloned().unwrap_or_default();
            for (e, _, v) in space.outgoing(u) {
                let edge = space.edge(e);
                if edge.is_silent() {
                    continue;
                }
                let y = match node_of.get(&v) {
                    Some(&y) => y,
                    None => {
                        debug_assert!(false, "every observable edge's target must be a discovered entry node");
                        continue;
                    }
                };
                // Decoration (the silent prefix into `u`) composed before this
                // edge's own relevance, not after: see the note on
                // `DiagEdge::relevance` above.
                let relevance = crate::regex::concat(&decoration, &edge.relevance);
                graph.add_edge(x, y, DiagEdge { observability: edge.observability.clone(), relevance });
            }
        }
    }

    let initial = node_of[&space.initial()];
    log::info!("built diagnoser with {} node(s) and {} edge(s)", graph.node_count(), graph.edge_count());
    Diagnoser { graph, initial }
}

#[cfg(test)]
mod tests {
    use crate::fixtures;
    use crate::space::Space;

    #[test]
    fn minimal_loop_diagnoser_has_two_closures() {
        let net = fixtures::minimal_loop();
        let space = Space::build(&net);
        let d = super::build(&space);
        // One closure entry at the BS initial node, one at t1's target;
        // both closures exit through the same BS node (N0), so each
        // contributes its own "o1"-labeled edge back into t1's target.
        assert_eq!(d.node_count(), 2);
        assert_eq!(d.edge_count(), 2);
    }
}
