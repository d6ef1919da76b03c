/*
 * SPDX-FileCopyrightText: 2025 The blocksplit developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Vertex-centric algorithms in the gather/apply model.
//!
//! The [`Algorithm`] trait is the contract between graph algorithms and the
//! engines replaying partitioned edge blocks. [`Replay`] is an in-memory
//! engine following the same protocol, and [`PageRank`] and
//! [`ConnectedComponents`] are implementations of the contract.

mod algorithm;
pub use algorithm::{Algorithm, Element};

mod replay;
pub use replay::Replay;

mod pagerank;
pub use pagerank::PageRank;

mod components;
pub use components::ConnectedComponents;
