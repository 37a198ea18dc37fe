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

//! Pruning: discard every node that cannot reach an acceptance node.
//!
//! Expressed as a single backward mark from the acceptance set followed by a
//! rebuild into a fresh, densely-indexed [`Space`], which keeps the renumber
//! pass from needing its own bookkeeping structure.

use super::{NodeIdx, Space};
use std::collections::{HashSet, VecDeque};

/// Prune `space` to the nodes and edges that lie on some path from the
/// initial node to an acceptance node.
///
/// Survivors are renumbered `0..N` in the order they originally appeared in
/// `space`.
///
/// # Errors
/// [`crate::Error::EmptySpace`] if `space` has no acceptance node to begin
/// with, or if pruning would discard the initial node (equivalently: no
/// accepting behavior is reachable at all).
pub fn prune(space: Space) -> Result<Space, crate::Error> {
    let acceptance: Vec<NodeIdx> = space.acceptance_nodes();
    if acceptance.is_empty() {
        log::error!("space has no acceptance node; nothing to prune to");
        return Err(crate::Error::EmptySpace("no acceptance node before pruning".to_string()));
    }

    // Backward mark: a node is kept iff it can reach some acceptance node,
    // i.e. it is reachable from the acceptance set by walking edges in
    // reverse.
    let mut kept: HashSet<NodeIdx> = HashSet::new();
    let mut queue: VecDeque<NodeIdx> = VecDeque::new();
    for &n in &acceptance {
        if kept.insert(n) {
            queue.push_back(n);
        }
    }
    while let Some(n) = queue.pop_front() {
        for (_, source, _) in space.incoming(n) {
            if kept.insert(source) {
                queue.push_back(source);
            }
        }
    }

    if !kept.contains(&space.initial()) {
        log::error!("initial node cannot reach any acceptance node after pruning");
        return Err(crate::Error::EmptySpace("initial node cannot reach any acceptance node".to_string()));
    }

    let mut pruned = Space::empty(space.node(space.initial()).clone());
    // Space::empty already allocated a node for the initial payload; reuse
    // that slot instead of re-adding it below.
    let mut remap: std::collections::HashMap<NodeIdx, NodeIdx> = std::collections::HashMap::new();
    remap.insert(space.initial(), pruned.initial());

    for n in space.node_indices() {
        if n == space.initial() || !kept.contains(&n) {
            continue;
        }
        let new_idx = pruned.add_node(space.node(n).clone());
        remap.insert(n, new_idx);
    }

    for e in space.edge_indices() {
        let (from, to) = space.endpoints(e);
        if let (Some(&new_from), Some(&new_to)) = (remap.get(&from), remap.get(&to)) {
            pruned.add_edge(new_from, new_to, space.edge(e).clone());
        }
    }

    log::info!(
        "pruned space from {} node(s)/{} edge(s) to {} node(s)/{} edge(s)",
        space.node_count(),
        space.edge_count(),
        pruned.node_count(),
        pruned.edge_count()
    );
    Ok(pruned)
}

#[cfg(test)]
mod tests {
    use crate::fixtures;
    use crate::space::Space;

    #[test]
    fn observation_filtered_minimal_loop_keeps_every_node() {
        let net = fixtures::minimal_loop();
        let observation = vec!["o1".to_string()];
        let space = crate::space::build_observation(&net, &observation).unwrap();
        let before = space.node_count();
        let pruned = super::prune(space).unwrap();
        assert_eq!(pruned.node_count(), before);
    }

    #[test]
    fn unfiltered_minimal_loop_keeps_every_node() {
        let net = fixtures::minimal_loop();
        let space = Space::build(&net);
        let before = space.node_count();
        let pruned = super::prune(space).unwrap();
        assert_eq!(pruned.node_count(), before);
    }
}
