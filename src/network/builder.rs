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

//! Validating builder for [`Network`](super::Network).
//!
//! Any collaborator that deserializes a network description (XML or
//! otherwise) is expected to drive this builder rather than construct a
//! [`Network`](super::Network) directly: every method resolves its name
//! arguments immediately and fails fast with [`Error::UnresolvedReference`]
//! on the first dangling reference.

use super::{Behavior, BehaviorId, Label, Link, LinkEvent, LinkId, Network, StateIndex, Transition};
use crate::Error;

/// Incrementally assembles a [`Network`], validating cross-references as
/// they are added.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    behaviors: Vec<Behavior>,
    links: Vec<Link>,
}

impl NetworkBuilder {
    /// Start an empty builder.
    pub fn new() -> Self {
        Self { behaviors: Vec::new(), links: Vec::new() }
    }

    /// Add a new, empty behavior and return its id.
    pub fn add_behavior(&mut self, name: impl Into<String>) -> BehaviorId {
        let id = BehaviorId(self.behaviors.len() as u32);
        self.behaviors.push(Behavior {
            name: name.into(),
            states: Vec::new(),
            initial_state: 0,
            transitions: Vec::new(),
        });
        id
    }

    /// Add a state to `behavior`, returning its index.
    ///
    /// # Errors
    /// [`Error::UnresolvedReference`] if `behavior` does not exist.
    pub fn add_state(&mut self, behavior: BehaviorId, name: impl Into<String>) -> Result<StateIndex, Error> {
        let b = self.behavior_mut(behavior)?;
        let idx = b.states.len();
        b.states.push(name.into());
        Ok(idx)
    }

    /// Set the initial state of `behavior` by name (invariant L2).
    ///
    /// # Errors
    /// [`Error::UnresolvedReference`] if the behavior or the state name does
    /// not exist.
    pub fn set_initial_state(&mut self, behavior: BehaviorId, state_name: &str) -> Result<(), Error> {
        let idx = self.find_state(behavior, state_name)?;
        self.behavior_mut(behavior)?.initial_state = idx;
        Ok(())
    }

    /// Add a link between two behaviors, returning its id.
    ///
    /// # Errors
    /// [`Error::UnresolvedReference`] if either behavior does not exist.
    pub fn add_link(
        &mut self,
        name: impl Into<String>,
        source_behavior: BehaviorId,
        target_behavior: BehaviorId,
    ) -> Result<LinkId, Error> {
        self.behavior_mut(source_behavior)?;
        self.behavior_mut(target_behavior)?;
        let id = LinkId(self.links.len() as u32);
        self.links.push(Link { name: name.into(), source_behavior, target_behavior });
        Ok(id)
    }

    /// Add a transition to `behavior`.
    ///
    /// `required_event` and `output_events` are `(link_name, event_name)`
    /// pairs, resolved against the links already added to this builder.
    ///
    /// # Errors
    /// [`Error::UnresolvedReference`] if `behavior`, either state name, or
    /// any link name does not resolve.
    #[allow(clippy::too_many_arguments)]
    pub fn add_transition(
        &mut self,
        behavior: BehaviorId,
        name: impl Into<String>,
        source_state: &str,
        target_state: &str,
        required_event: Option<(&str, &str)>,
        output_events: &[(&str, &str)],
        observability: impl Into<Label>,
        relevance: impl Into<Label>,
    ) -> Result<TransitionRef, Error> {
        let source = self.find_state(behavior, source_state)?;
        let target = self.find_state(behavior, target_state)?;

        let required_event = required_event
            .map(|(link_name, event)| -> Result<LinkEvent, Error> {
                let link = self.find_link(link_name)?;
                Ok(LinkEvent::new(link, event))
            })
            .transpose()?;

        let mut outputs = Vec::with_capacity(output_events.len());
        for (link_name, event) in output_events {
            let link = self.find_link(link_name)?;
            outputs.push(LinkEvent::new(link, *event));
        }

        let b = self.behavior_mut(behavior)?;
        let index = b.transitions.len();
        b.transitions.push(Transition {
            name: name.into(),
            source,
            target,
            required_event,
            output_events: outputs,
            observability: observability.into(),
            relevance: relevance.into(),
        });
        Ok(TransitionRef { behavior, index })
    }

    /// Finalize the network.
    ///
    /// # Errors
    /// [`Error::MalformedInput`] if any behavior has no states at all (an
    /// initial state could not possibly exist), which would otherwise let an
    /// unset `initial_state` of `0` silently point nowhere.
    pub fn build(self) -> Result<Network, Error> {
        for b in &self.behaviors {
            if b.states.is_empty() {
                return Err(Error::MalformedInput(format!(
                    "behavior '{}' has no states, so no initial state can exist",
                    b.name
                )));
            }
            if b.initial_state >= b.states.len() {
                return Err(Error::UnresolvedReference(format!(
                    "behavior '{}' has no initial state set",
                    b.name
                )));
            }
        }
        log::info!(
            "built network with {} behavior(s) and {} link(s)",
            self.behaviors.len(),
            self.links.len()
        );
        Ok(Network { behaviors: self.behaviors, links: self.links })
    }

    fn behavior_mut(&mut self, id: BehaviorId) -> Result<&mut Behavior, Error> {
        self.behaviors
            .get_mut(id.0 as usize)
            .ok_or_else(|| Error::UnresolvedReference(format!("{}", id)))
    }

    fn find_state(&self, behavior: BehaviorId, name: &str) -> Result<StateIndex, Error> {
        let b = self
            .behaviors
            .get(behavior.0 as usize)
            .ok_or_else(|| Error::UnresolvedReference(format!("{}", behavior)))?;
        b.states
            .iter()
            .position(|s| s == name)
            .ok_or_else(|| Error::UnresolvedReference(format!("state '{}' in behavior '{}'", name, b.name)))
    }

    fn find_link(&self, name: &str) -> Result<LinkId, Error> {
        self.links
            .iter()
            .position(|l| l.name == name)
            .map(|i| LinkId(i as u32))
            .ok_or_else(|| Error::UnresolvedReference(format!("link '{}'", name)))
    }
}

/// A resolved reference to a transition: its owning behavior and its index
/// within that behavior's transition list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRef {
    /// Owning behavior.
    pub behavior: BehaviorId,
    /// Index within `behavior`'s transition list.
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unresolved_initial_state() {
        let mut b = NetworkBuilder::new();
        let beh = b.add_behavior("B1");
        b.add_state(beh, "a").unwrap();
        let err = b.set_initial_state(beh, "nope").unwrap_err();
        assert!(matches!(err, Error::UnresolvedReference(_)));
    }

    #[test]
    fn rejects_unresolved_link_in_transition() {
        let mut b = NetworkBuilder::new();
        let beh = b.add_behavior("B1");
        b.add_state(beh, "a").unwrap();
        b.set_initial_state(beh, "a").unwrap();
        let err = b
            .add_transition(beh, "t1", "a", "a", Some(("ghost", "x")), &[], "", "")
            .unwrap_err();
        assert!(matches!(err, Error::UnresolvedReference(_)));
    }

    #[test]
    fn builds_minimal_loop_network() {
        let mut b = NetworkBuilder::new();
        let b1 = b.add_behavior("B1");
        let b2 = b.add_behavior("B2");
        b.add_state(b1, "a").unwrap();
        b.set_initial_state(b1, "a").unwrap();
        b.add_state(b2, "b").unwrap();
        b.set_initial_state(b2, "b").unwrap();
        let link = b.add_link("L", b1, b2).unwrap();
        b.add_transition(b1, "t1", "a", "a", None, &[("L", "x")], "o1", "f").unwrap();
        b.add_transition(b2, "t2", "b", "b", Some(("L", "x")), &[], "", "").unwrap();
        let net = b.build().unwrap();
        assert_eq!(net.num_behaviors(), 2);
        assert_eq!(net.num_links(), 1);
        assert_eq!(net.link(link).name, "L");
    }
}
