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

//! # Network model
//!
//! Pure, immutable-once-built description of a network of communicating
//! finite automata: [`Behavior`]s linked by single-slot [`Link`]s, the whole
//! bundle assembled through [`NetworkBuilder`].

pub(crate) mod builder;

pub use builder::{NetworkBuilder, TransitionRef};

use std::fmt;

/// A label attached to a transition (observability or relevance).
///
/// The empty string denotes "no label": a silent transition (empty
/// observability) or a transition that contributes nothing to the diagnosis
/// (empty relevance).
pub type Label = String;

/// An event name carried on a link.
pub type EventName = String;

/// Index of a [`Behavior`] within a [`Network`], and the position of its
/// state in every behavioral-space node's state vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BehaviorId(pub(crate) u32);

/// Index of a [`Link`] within a [`Network`], and the position of its content
/// in every behavioral-space node's buffer vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(pub(crate) u32);

/// Index of a state within its owning [`Behavior`]'s state list.
pub type StateIndex = usize;

/// Index of a transition within its owning [`Behavior`]'s transition list.
pub type TransitionIndex = usize;

impl BehaviorId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl LinkId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BehaviorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "behavior#{}", self.0)
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link#{}", self.0)
    }
}

/// A required or output event attached to a [`Transition`]: the link it
/// travels on, and the event name it carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkEvent {
    /// The link this event is sent/expected on.
    pub link: LinkId,
    /// The event name.
    pub event: EventName,
}

impl LinkEvent {
    pub(crate) fn new(link: LinkId, event: impl Into<EventName>) -> Self {
        Self { link, event: event.into() }
    }
}

/// A local transition of a [`Behavior`].
///
/// May require an event on an incoming link and may emit events on outgoing
/// links; labeled with optional observability and relevance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Name, unique within the owning behavior.
    pub name: String,
    /// Source state index (within the owning behavior).
    pub source: StateIndex,
    /// Target state index (within the owning behavior).
    pub target: StateIndex,
    /// The event that must be present on its link's buffer for this
    /// transition to fire, if any.
    pub required_event: Option<LinkEvent>,
    /// Events written to their links' buffers when this transition fires,
    /// in order.
    pub output_events: Vec<LinkEvent>,
    /// Observability label; empty means silent.
    pub observability: Label,
    /// Relevance label; empty means no contribution to the diagnosis.
    pub relevance: Label,
}

impl Transition {
    /// True if this transition is silent (unobservable).
    pub fn is_silent(&self) -> bool {
        self.observability.is_empty()
    }
}

/// A local finite-state automaton participating in the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Behavior {
    /// Name, unique within the network.
    pub name: String,
    /// State names, unique within this behavior.
    pub states: Vec<String>,
    /// Index of the initial state.
    pub initial_state: StateIndex,
    /// Transitions, grouped by nothing in particular; use
    /// [`Behavior::outgoing`] to iterate a state's outgoing transitions.
    pub transitions: Vec<Transition>,
}

impl Behavior {
    /// Iterate the indices of transitions outgoing from `state`.
    pub fn outgoing(&self, state: StateIndex) -> impl Iterator<Item = TransitionIndex> + '_ {
        self.transitions.iter().enumerate().filter_map(move |(i, t)| (t.source == state).then(|| i))
    }
}

/// A single-slot directed buffer between two behaviors, carrying at most one
/// event at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Name, unique within the network.
    pub name: String,
    /// The behavior that writes to this link.
    pub source_behavior: BehaviorId,
    /// The behavior that reads from this link.
    pub target_behavior: BehaviorId,
}

/// An immutable, validated network of communicating finite automata.
///
/// Built exclusively through [`NetworkBuilder`], which enforces invariants
/// L1 (every link/state reference resolves) and L2 (every behavior has an
/// initial state).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    pub(crate) behaviors: Vec<Behavior>,
    pub(crate) links: Vec<Link>,
}

impl Network {
    /// Start building a new network.
    pub fn builder() -> NetworkBuilder {
        NetworkBuilder::new()
    }

    /// All behaviors, in the fixed order used to index state vectors.
    pub fn behaviors(&self) -> &[Behavior] {
        &self.behaviors
    }

    /// All links, in the fixed order used to index buffer vectors.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Look up a behavior by id.
    pub fn behavior(&self, id: BehaviorId) -> &Behavior {
        &self.behaviors[id.index()]
    }

    /// Look up a link by id.
    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.index()]
    }

    /// Number of behaviors (the length of every state vector).
    pub fn num_behaviors(&self) -> usize {
        self.behaviors.len()
    }

    /// Number of links (the length of every buffer vector).
    pub fn num_links(&self) -> usize {
        self.links.len()
    }

    /// Collect the set of observability labels used by any transition in
    /// the network (silent transitions contribute nothing).
    pub fn observable_labels(&self) -> std::collections::HashSet<&str> {
        self.behaviors
            .iter()
            .flat_map(|b| b.transitions.iter())
            .filter(|t| !t.is_silent())
            .map(|t| t.observability.as_str())
            .collect()
    }

    /// Check that every label of `observation` is the observability label of
    /// some transition in this network, before any observation-filtered
    /// exploration begins.
    ///
    /// # Errors
    /// Returns [`crate::Error::ObservationIncompatible`] naming the first
    /// offending label found.
    pub fn check_observation_labels(&self, observation: &[Label]) -> Result<(), crate::Error> {
        let known = self.observable_labels();
        for label in observation {
            if !known.contains(label.as_str()) {
                log::error!("observation label {:?} matches no transition in the network", label);
                return Err(crate::Error::ObservationIncompatible(label.clone()));
            }
        }
        Ok(())
    }
}
