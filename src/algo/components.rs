/*
 * SPDX-FileCopyrightText: 2025 The blocksplit developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{Algorithm, Element};
use std::sync::atomic::{AtomicBool, Ordering};

/// Connected components by minimum-label propagation.
///
/// Each vertex starts with a label (usually its id) and repeatedly takes the
/// minimum label among its own and those of its in-neighbors. On a symmetric
/// graph, at convergence every vertex is labeled by the smallest label in its
/// component.
///
/// The stored label is used directly as accumulator, so this algorithm
/// opts out of [`initialize`](Algorithm::initialize) and
/// [`apply`](Algorithm::apply).
#[derive(Debug, Default)]
pub struct ConnectedComponents {
    changed: AtomicBool,
    iterations: usize,
}

impl ConnectedComponents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the initial labels of a graph with `num_vertices` vertices.
    pub fn initial_labels(num_vertices: usize) -> Vec<usize> {
        (0..num_vertices).collect()
    }

    /// Returns whether the last iteration left all labels unchanged.
    pub fn is_converged(&self) -> bool {
        self.iterations > 0 && !self.changed.load(Ordering::Relaxed)
    }

    /// Returns the number of iterations completed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

impl<W: ?Sized> Algorithm<W> for ConnectedComponents {
    type Source = usize;
    type Destination = usize;
    type Edge = ();

    fn initialize(&self, _worker: &W, _destination: &mut Element<usize>) {}

    fn gather(
        &self,
        _worker: &W,
        source: &Element<usize>,
        destination: &mut Element<usize>,
        _edge: &(),
    ) {
        if source.value < destination.value {
            destination.value = source.value;
            self.changed.store(true, Ordering::Relaxed);
        }
    }

    fn process(
        &self,
        accumulator1: &Element<usize>,
        accumulator2: &Element<usize>,
        out: &mut Element<usize>,
    ) {
        out.value = accumulator1.value.min(accumulator2.value);
    }

    fn apply(&self, _worker: &W, _out: &mut Element<usize>) {}

    fn is_initialized(&self) -> bool {
        false
    }

    fn is_applied(&self) -> bool {
        false
    }

    fn before_iteration(&mut self, _iteration: usize, _worker: &W) {
        self.changed.store(false, Ordering::Relaxed);
    }

    fn after_iteration(&mut self, iteration: usize, _worker: &W) {
        self.iterations += 1;
        log::debug!(
            "Iteration {}: labels {}",
            iteration,
            if self.changed.load(Ordering::Relaxed) {
                "changed"
            } else {
                "stable"
            }
        );
    }
}
