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

//! Seed fixture networks used across this crate's tests, one function per
//! concrete scenario: each fixture is built fresh by its caller rather than
//! shared through a global, since none of them are expensive to construct.

use crate::network::{Network, NetworkBuilder};

/// Scenario 1: two behaviors, one link, a single loop in each. `B1` emits
/// `"x"` on `L` with observability `"o1"`/relevance `"f"`; `B2` consumes it
/// silently.
pub fn minimal_loop() -> Network {
    let mut b = NetworkBuilder::new();
    let b1 = b.add_behavior("B1");
    let b2 = b.add_behavior("B2");
    b.add_state(b1, "a").unwrap();
    b.set_initial_state(b1, "a").unwrap();
    b.add_state(b2, "b").unwrap();
    b.set_initial_state(b2, "b").unwrap();
    let link = b.add_link("L", b1, b2).unwrap();
    let _ = link;
    b.add_transition(b1, "t1", "a", "a", None, &[("L", "x")], "o1", "f").unwrap();
    b.add_transition(b2, "t2", "b", "b", Some(("L", "x")), &[], "", "").unwrap();
    b.build().unwrap()
}

/// Scenario 2: two transitions from the same state with the same
/// observability but different relevance, producing an alternation
/// (`"a|b"`) once collapsed.
pub fn alternation_from_parallel() -> Network {
    let mut b = NetworkBuilder::new();
    let b1 = b.add_behavior("B1");
    b.add_state(b1, "s0").unwrap();
    b.add_state(b1, "s1").unwrap();
    b.set_initial_state(b1, "s0").unwrap();
    b.add_transition(b1, "t1", "s0", "s1", None, &[], "o", "a").unwrap();
    b.add_transition(b1, "t2", "s0", "s1", None, &[], "o", "b").unwrap();
    b.build().unwrap()
}

/// Scenario 3: a silent two-hop chain feeding into a single observable
/// transition, collapsing to the concatenation `"abc"`.
pub fn series_collapse() -> Network {
    let mut b = NetworkBuilder::new();
    let b1 = b.add_behavior("B1");
    b.add_state(b1, "s0").unwrap();
    b.add_state(b1, "s1").unwrap();
    b.add_state(b1, "s2").unwrap();
    b.add_state(b1, "s3").unwrap();
    b.set_initial_state(b1, "s0").unwrap();
    b.add_transition(b1, "t1", "s0", "s1", None, &[], "", "a").unwrap();
    b.add_transition(b1, "t2", "s1", "s2", None, &[], "", "b").unwrap();
    b.add_transition(b1, "t3", "s2", "s3", None, &[], "o", "c").unwrap();
    b.build().unwrap()
}

/// Scenario 4: a silent self-loop on an intermediate state, collapsing to
/// `"ax*b"` once the loop's relevance is starred.
pub fn self_loop_under_star() -> Network {
    let mut b = NetworkBuilder::new();
    let b1 = b.add_behavior("B1");
    b.add_state(b1, "s0").unwrap();
    b.add_state(b1, "s1").unwrap();
    b.add_state(b1, "s2").unwrap();
    b.set_initial_state(b1, "s0").unwrap();
    b.add_transition(b1, "t1", "s0", "s1", None, &[], "", "a").unwrap();
    b.add_transition(b1, "loop", "s1", "s1", None, &[], "", "x").unwrap();
    b.add_transition(b1, "t2", "s1", "s2", None, &[], "o", "b").unwrap();
    b.build().unwrap()
}

/// Scenario 5: a network whose single closure reaches two distinct
/// BS-accepting states via silent paths decorated `"p"` and `"q"`
/// respectively. The initial state is itself BS-accepting too (there are no
/// links, so its buffers are vacuously empty), contributing a third,
/// empty-word alternative, so the closure's diagnosis is `"ε|p|q"`.
pub fn two_acceptance_closure() -> Network {
    let mut b = NetworkBuilder::new();
    let b1 = b.add_behavior("B1");
    b.add_state(b1, "s0").unwrap();
    b.add_state(b1, "a1").unwrap();
    b.add_state(b1, "a2").unwrap();
    b.set_initial_state(b1, "s0").unwrap();
    b.add_transition(b1, "t1", "s0", "a1", None, &[], "", "p").unwrap();
    b.add_transition(b1, "t2", "s0", "a2", None, &[], "", "q").unwrap();
    b.build().unwrap()
}
