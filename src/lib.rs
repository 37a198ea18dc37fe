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

#![deny(missing_docs)]

//! # retefa-diag: model-based diagnosis for networks of communicating automata
//!
//! Given a network of finite-state [`network::Behavior`]s exchanging events
//! over single-slot [`network::Link`]s, this library builds the joint
//! reachability graph of the network (the *behavioral space*), optionally
//! restricts it to the paths consistent with an observed sequence of labels,
//! and extracts a regular expression over relevance labels describing what
//! could have happened — a *diagnosis*.
//!
//! ## Structure
//!
//! - **[`network`]**: the network model — [`network::Behavior`]s,
//!   [`network::Link`]s and [`network::Transition`]s, assembled through the
//!   validating [`network::NetworkBuilder`].
//! - **[`space`]**: the behavioral space — [`space::Space::build`] for the
//!   unfiltered joint reachability graph, [`space::build_observation`] for
//!   the observation-filtered variant, and [`space::prune`] to discard
//!   configurations that cannot reach acceptance.
//! - **[`extract`]**: state elimination. [`extract::extract`] collapses a
//!   pruned space to a single relevance regex; [`extract::build_closure`]
//!   and [`extract::extract_subscripted`] compute the silent closures the
//!   diagnoser is built from.
//! - **[`diagnoser`]**: [`diagnoser::build`] compiles a pruned space into a
//!   [`diagnoser::Diagnoser`] that [`diagnoser::diagnose`] can then query in
//!   time linear in the observation length, without rebuilding a filtered
//!   space per query.
//! - **[`regex`]**: the small algebra (`concat`, `alternate`,
//!   `intermediate_replace`) the extractors are built from.
//!
//! ## Usage
//!
//! ```
//! use retefa_diag::{pruned_observation_space, diagnosis, Network};
//!
//! # fn main() -> Result<(), retefa_diag::Error> {
//! // B1 emits "x" on L, observably; B2 consumes it silently.
//! let mut b = Network::builder();
//! let b1 = b.add_behavior("B1");
//! let b2 = b.add_behavior("B2");
//! b.add_state(b1, "a")?;
//! b.set_initial_state(b1, "a")?;
//! b.add_state(b2, "b")?;
//! b.set_initial_state(b2, "b")?;
//! b.add_link("L", b1, b2)?;
//! b.add_transition(b1, "t1", "a", "a", None, &[("L", "x")], "o1", "f")?;
//! b.add_transition(b2, "t2", "b", "b", Some(("L", "x")), &[], "", "")?;
//! let network = b.build()?;
//!
//! let observation = vec!["o1".to_string()];
//! let space = pruned_observation_space(&network, &observation)?;
//! assert_eq!(diagnosis(&space), "f");
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - *`count-states`*: expose [`space::Space::num_explored`], the number of
//!   nodes popped off the construction frontier.
//! - *`fixtures`*: expose the [`fixtures`] module outside of test builds.

mod error;
pub mod network;
pub mod space;

pub mod extract;
pub mod regex;

pub mod diagnoser;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

#[cfg(test)]
mod test;

pub use error::Error;
pub use network::{Network, NetworkBuilder};

use network::Label;

/// Build the unfiltered behavioral space of `network` and prune it to the
/// configurations that can reach acceptance.
///
/// # Errors
/// [`Error::EmptySpace`] if no configuration of `network` can reach
/// acceptance.
pub fn pruned_space(network: &Network) -> Result<space::Space, Error> {
    space::prune(space::Space::build(network))
}

/// Build the behavioral space of `network` restricted to paths consistent
/// with `observation`, then prune it.
///
/// # Errors
/// [`Error::ObservationIncompatible`] if a label of `observation` matches no
/// transition's observability; [`Error::EmptySpace`] if no configuration can
/// reach acceptance while consuming all of `observation`.
pub fn pruned_observation_space(network: &Network, observation: &[Label]) -> Result<space::Space, Error> {
    space::prune(space::build_observation(network, observation)?)
}

/// Collapse a pruned (observation-filtered) behavioral space to its
/// relevance-regex diagnosis.
pub fn diagnosis(space: &space::Space) -> String {
    extract::extract(space)
}

/// Compile a pruned behavioral space into a diagnoser.
pub fn diagnoser(space: &space::Space) -> diagnoser::Diagnoser {
    diagnoser::build(space)
}

/// Query a diagnoser with a linear observation.
pub fn linear_diagnosis(d: &diagnoser::Diagnoser, observation: &[Label]) -> String {
    diagnoser::diagnose(d, observation)
}
