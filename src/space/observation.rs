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

//! Observation-filtered behavioral-space construction: the same DFS shape
//! as the unfiltered builder, with two additions: a transition may only fire
//! if it is silent or matches the next expected observation label, and
//! acceptance additionally requires the whole observation to have been
//! consumed.

use super::{Edge, Node, NodeIdx, NodeKey, Space};
use crate::network::{Label, Network, TransitionRef};
use std::collections::HashMap;

fn initial_node(network: &Network, observation: &[Label]) -> Node {
    let state_vector = network.behaviors().iter().map(|b| b.initial_state).collect();
    let buffer_vector = vec![String::new(); network.num_links()];
    // Unlike the unfiltered builder's unconditional "isAccepting = true",
    // acceptance here (buffers empty AND observation fully consumed) applies
    // to the initial node as much as to any successor: with a nonempty
    // observation, the initial node starts non-accepting, since nothing has
    // been consumed yet.
    let is_accepting = observation.is_empty();
    Node { state_vector, buffer_vector, is_accepting, observation_index: 0 }
}

#[allow(clippy::too_many_arguments)]
fn fire(
    network: &Network,
    node: &Node,
    behavior_pos: usize,
    tref: TransitionRef,
    observation: &[Label],
) -> Option<Node> {
    let behavior = network.behavior(crate::network::BehaviorId(behavior_pos as u32));
    let transition = &behavior.transitions[tref.index];

    let may_fire = transition.is_silent()
        || (node.observation_index < observation.len()
            && transition.observability == observation[node.observation_index]);
    if !may_fire {
        return None;
    }

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

    let observation_index =
        if transition.is_silent() { node.observation_index } else { node.observation_index + 1 };

    let is_accepting = buffer_vector.iter().all(|b| b.is_empty()) && observation_index == observation.len();

    Some(Node { state_vector, buffer_vector, is_accepting, observation_index })
}

/// Build the behavioral space of `network` restricted to paths whose
/// observable labels prefix `observation`.
///
/// # Errors
/// [`crate::Error::ObservationIncompatible`] if some label of `observation`
/// is not the observability label of any transition in `network` (checked
/// before any exploration begins).
pub fn build_observation(network: &Network, observation: &[Label]) -> Result<Space, crate::Error> {
    network.check_observation_labels(observation)?;

    let mut space = Space::empty(initial_node(network, observation));
    let mut index: HashMap<NodeKey, NodeIdx> = HashMap::new();
    index.insert(space.node(space.initial()).clone(), space.initial());

    let mut frontier = vec![space.initial()];
    while let Some(current) = frontier.pop() {
        space.mark_explored();
        let current_node = space.node(current).clone();

        for (behavior_pos, behavior) in network.behaviors().iter().enumerate() {
            let state = current_node.state_vector[behavior_pos];
            for t_idx in behavior.outgoing(state) {
                let tref = TransitionRef { behavior: crate::network::BehaviorId(behavior_pos as u32), index: t_idx };
                let transition = &behavior.transitions[t_idx];
                if let Some(successor) = fire(network, &current_node, behavior_pos, tref, observation) {
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

    log::info!(
        "built observation-filtered space with {} node(s) and {} edge(s) for {} label(s)",
        space.node_count(),
        space.edge_count(),
        observation.len()
    );
    Ok(space)
}

#[cfg(test)]
mod tests {
    use crate::fixtures;

    #[test]
    fn minimal_loop_initial_node_is_non_accepting_for_nonempty_observation() {
        let net = fixtures::minimal_loop();
        let observation = vec!["o1".to_string()];
        let space = super::build_observation(&net, &observation).unwrap();
        assert!(!space.node(space.initial()).is_accepting);
        assert_eq!(space.node_count(), 3);
    }

    #[test]
    fn empty_observation_keeps_only_the_initial_node() {
        let net = fixtures::minimal_loop();
        let space = super::build_observation(&net, &[]).unwrap();
        assert_eq!(space.node_count(), 1);
        assert!(space.node(space.initial()).is_accepting);
    }

    #[test]
    fn rejects_observation_with_unknown_label() {
        let net = fixtures::minimal_loop();
        let err = super::build_observation(&net, &["nope".to_string()]).unwrap_err();
        assert!(matches!(err, crate::Error::ObservationIncompatible(_)));
    }
}
