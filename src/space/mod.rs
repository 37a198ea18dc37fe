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

//! # Behavioral space
//!
//! The reachability graph over joint configurations (state vector + link
//! buffer contents): nodes and edges are owned by an arena
//! (`petgraph::stable_graph::StableDiGraph`) and referenced by integer
//! index. `StableDiGraph` is used rather than `Graph` because pruning and
//! state-elimination both remove nodes/edges from the middle of the
//! structure while other indices must remain valid.

mod builder;
mod observation;
mod prune;

pub use observation::build_observation;
pub use prune::prune;

use crate::network::{Label, StateIndex};
use petgraph::stable_graph::StableDiGraph;

/// Index of a node in a [`Space`].
pub type NodeIdx = petgraph::stable_graph::NodeIndex;
/// Index of an edge in a [`Space`].
pub type EdgeIdx = petgraph::stable_graph::EdgeIndex;

/// A behavioral-space node: a joint configuration of the network.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node {
    /// One state index per behavior, in network behavior order.
    pub state_vector: Vec<StateIndex>,
    /// One link-buffer content per link, in network link order; `""` means
    /// the slot is empty.
    pub buffer_vector: Vec<Label>,
    /// True iff every buffer slot is empty (and, for observation-filtered
    /// spaces, the whole observation has been consumed).
    pub is_accepting: bool,
    /// Number of observable labels consumed to reach this node; `0` for
    /// unfiltered spaces.
    pub observation_index: usize,
}

impl Node {
    /// True iff every buffer slot is empty, irrespective of acceptance.
    pub fn buffers_empty(&self) -> bool {
        self.buffer_vector.iter().all(|b| b.is_empty())
    }
}

/// A behavioral-space edge.
///
/// Edges originating from a transition firing carry a [`TransitionRef`]
/// back to the network; edges synthesized by the extraction rewrites carry
/// only labels. Modeled as an `Option` rather than a dummy sentinel
/// transition.
#[derive(Debug, Clone)]
pub struct Edge {
    /// The transition this edge was created from, if any.
    pub transition: Option<crate::network::TransitionRef>,
    /// Relevance label (empty = no contribution).
    pub relevance: Label,
    /// Observability label (empty = silent).
    pub observability: Label,
}

impl Edge {
    /// True iff this edge is silent (unobservable).
    pub fn is_silent(&self) -> bool {
        self.observability.is_empty()
    }

    pub(crate) fn synthetic(relevance: impl Into<Label>) -> Self {
        Self { transition: None, relevance: relevance.into(), observability: String::new() }
    }
}

/// A labeled directed multigraph over behavioral-space [`Node`]s and
/// [`Edge`]s, with a designated initial node.
#[derive(Debug, Clone)]
pub struct Space {
    graph: StableDiGraph<Node, Edge>,
    initial: NodeIdx,
    /// Nodes popped off the construction frontier; only surfaced publicly
    /// when the `count-states` feature is enabled, but always tracked since
    /// the counter itself is free.
    explored: usize,
}

impl Space {
    pub(crate) fn empty(initial: Node) -> Self {
        let mut graph = StableDiGraph::new();
        let initial = graph.add_node(initial);
        Self { graph, initial, explored: 0 }
    }

    pub(crate) fn mark_explored(&mut self) {
        self.explored += 1;
    }

    /// Build the unfiltered behavioral space of `network`: an exhaustive
    /// reachability exploration of the joint state.
    pub fn build(network: &crate::Network) -> Self {
        builder::build(network)
    }

    /// The designated initial node.
    pub fn initial(&self) -> NodeIdx {
        self.initial
    }

    /// Set the initial node (used by the extraction rewrites when they
    /// introduce a fresh `n0`).
    pub(crate) fn set_initial(&mut self, n: NodeIdx) {
        self.initial = n;
    }

    /// Number of nodes currently in the space.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges currently in the space.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Borrow a node's payload.
    pub fn node(&self, n: NodeIdx) -> &Node {
        &self.graph[n]
    }

    /// Mutably borrow a node's payload.
    pub fn node_mut(&mut self, n: NodeIdx) -> &mut Node {
        &mut self.graph[n]
    }

    /// Borrow an edge's payload.
    pub fn edge(&self, e: EdgeIdx) -> &Edge {
        &self.graph[e]
    }

    /// Iterate all node indices currently present, in arena order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        self.graph.node_indices()
    }

    /// Iterate all edge indices currently present, in arena order.
    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIdx> + '_ {
        self.graph.edge_indices()
    }

    /// Iterate `(edge index, source, target)` for edges outgoing from `n`.
    pub fn outgoing(&self, n: NodeIdx) -> impl Iterator<Item = (EdgeIdx, NodeIdx, NodeIdx)> + '_ {
        use petgraph::visit::EdgeRef;
        self.graph.edges(n).map(|e| (e.id(), e.source(), e.target()))
    }

    /// Iterate `(edge index, source, target)` for edges incoming to `n`.
    pub fn incoming(&self, n: NodeIdx) -> impl Iterator<Item = (EdgeIdx, NodeIdx, NodeIdx)> + '_ {
        use petgraph::visit::EdgeRef;
        self.graph.edges_directed(n, petgraph::Direction::Incoming).map(|e| (e.id(), e.source(), e.target()))
    }

    /// Endpoints of an edge.
    pub fn endpoints(&self, e: EdgeIdx) -> (NodeIdx, NodeIdx) {
        self.graph.edge_endpoints(e).expect("edge index must be valid")
    }

    pub(crate) fn add_node(&mut self, node: Node) -> NodeIdx {
        self.graph.add_node(node)
    }

    pub(crate) fn add_edge(&mut self, from: NodeIdx, to: NodeIdx, edge: Edge) -> EdgeIdx {
        self.graph.add_edge(from, to, edge)
    }

    pub(crate) fn remove_node(&mut self, n: NodeIdx) {
        self.graph.remove_node(n);
    }

    pub(crate) fn remove_edge(&mut self, e: EdgeIdx) {
        self.graph.remove_edge(e);
    }

    /// All acceptance nodes currently in the space.
    pub fn acceptance_nodes(&self) -> Vec<NodeIdx> {
        self.graph.node_indices().filter(|&n| self.graph[n].is_accepting).collect()
    }

    /// Deep copy of this space (for the extractors, which must not mutate
    /// the input they are handed: the original space is reused once per
    /// closure entry when the diagnoser is compiled).
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// Number of nodes popped off the construction frontier, tracked only
    /// when the `count-states` feature is enabled.
    #[cfg(feature = "count-states")]
    pub fn num_explored(&self) -> usize {
        self.explored
    }
}

/// Construction-time node identity: two nodes are equal iff their state
/// vector, buffer vector, `is_accepting` flag and `observation_index` all
/// match. Since a state/buffer vector's positions are fixed by
/// behavior/link identity, positional equality coincides with set-equality
/// over per-behavior state and per-link buffer contents, so [`Node`] itself
/// (which derives `Hash`/`Eq` positionally) doubles as its own
/// construction-time key.
pub(crate) type NodeKey = Node;
