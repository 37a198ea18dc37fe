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

//! Module containing all error types

use thiserror::Error;

/// Main error type, returned by every fallible operation of this crate.
///
/// Each variant names the offending entity so that callers can log it
/// alongside the triggering input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Structural validation of the network description failed.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// A name referenced somewhere in the network (state, link, behavior)
    /// does not resolve to a defined entity.
    #[error("unresolved reference: {0}")]
    UnresolvedReference(String),
    /// A label of the linear observation is not the observability label of
    /// any transition in the network.
    #[error("observation incompatible with network: label {0:?} is not produced by any transition")]
    ObservationIncompatible(String),
    /// A behavioral space is empty, either before or after pruning.
    #[error("empty space: {0}")]
    EmptySpace(String),
    /// Reserved for unsupported input polymorphism at the task-entry layer.
    #[error("not implemented: {0}")]
    NotImplemented(String),
}
