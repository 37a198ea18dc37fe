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

//! Unfiltered behavioral-space construction.
//!
//! DFS reachability over the joint state: a LIFO frontier of nodes to
//! explore, firing every outgoing transition of every behavior's current
//! state from the popped node. Deduplication against the space uses a
//! `HashMap` keyed by [`super::NodeKey`] rather than a linear scan, to keep
//! construction close to linear in the size of the behavioral space.

use super::{Edge, Node, NodeIdx, NodeKey, Space};
use crate::network::{Network, TransitionRef};
use std::collections::HashMap;

/// Build the initial node: one state per behavior (its initial state), one
/// empty buffer per link.
fn initial_node(network: &Network) -> Node {
    let state_vector = network.behaviors().iter().map(|b| b.initial_state).collect();
    let buffer_vector = vec![String::new(); network.num_links()];
    Node { state_vector, buffer_vector, is_accepting: true, observation_index: 0 }
}

/// Attempt to fire `transition` (owned by the behavior at position
/// `behavior_pos`) from `node`. Returns the successor node if the firing
/// conditions hold: the required event (if any) is present on its link and
/// every output event's link is free.
fn fire(network: &Network, node: &Node, behavior_pos: usize, tref: TransitionRef) -> Option<Node> {
    let behavior = network.behavior(crate::network::BehaviorId(behavior_pos as u32));
    let transition = &behavior.transitions[tref.index];

    let mut buffer_vector = node.buffer_vector.clone();

    if let Some(req) = &transition.required_event {
        let slot = req.link.index();
        if buffer_vector[slot] != req.event {
            return None;
        }
        buffer_vector[slot] = String::new();
    }

    for out in &transition.output_events {
        let slot = out.link.index();
        if !buffer_vector[slot].is_empty() {
            return None;
        }
        buffer_vector[slot] = out.event.clone();
    }

    let mut state_vector = node.state_vector.clone();
    state_vector[behavior_pos] = transition.target;

    let is_accepting = buffer_vector.iter().all(|b| b.is_empty());
    Some(Node { state_vector, buffer_vector, is_accepting, observation_index: node.observation_index })
}

/// Build the unfiltered behavioral space of `network`.
pub fn build(network: &Network) -> Space {
    let mut space = Space::empty(initial_node(network));
    let mut index: HashMap<NodeKey, NodeIdx> = HashMap::new();
    index.insert(space.node(space.initial()).clone(), space.initial());

    let mut frontier = vec![space.initial()];
    while let Some(current) = frontier.pop() {
        space.mark_explored();
        log::trace!("exploring node {:?}", current);
        let current_node = space.node(current).clone();

        for (behavior_pos, behavior) in network.behaviors().iter().enumerate() {
            let state = current_node.state_vector[behavior_pos];
            for t_idx in behavior.outgoing(state) {
                let tref = TransitionRef { behavior: crate::network::BehaviorId(behavior_pos as u32), index: t_idx };
                let transition = &behavior.transitions[t_idx];
                if let Some(successor) = fire(network, &current_node, behavior_pos, tref) {
                    let target = match index.get(&successor) {
                        Some(&existing) => existing,
                        None => {
                            let idx = space.add_node(successor.clone());
                            index.insert(successor, idx);
                            frontier.push(idx);
                            idx
                        }
                    };
                    space.add_edge(
                        current,
                        target,
                        Edge {
                            transition: Some(tref),
                            relevance: transition.relevance.clone(),
                            observability: transition.observability.clone(),
                        },
                    );
                }
            }
        }
    }

    log::info!("built behavioral space with {} node(s) and {} edge(s)", space.node_count(), space.edge_count());
    space
}

#[cfg(test)]
mod tests {
    use crate::fixtures;

    #[test]
    fn minimal_loop_oscillates_between_two_configurations() {
        let net = fixtures::minimal_loop();
        let space = super::build(&net);
        // t1 fills the link (non-accepting); t2 drains it again, landing
        // back on a node value-equal to the initial one.
        assert_eq!(space.node_count(), 2);
        assert_eq!(space.edge_count(), 2);
        assert!(space.node(space.initial()).is_accepting);
    }

    #[test]
    fn series_collapse_network_is_a_simple_chain() {
        let net = fixtures::series_collapse();
        let space = super::build(&net);
        assert_eq!(space.node_count(), 4);
        assert_eq!(space.edge_count(), 3);
    }
}
