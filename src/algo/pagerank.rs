/*
 * SPDX-FileCopyrightText: 2025 The blocksplit developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{Algorithm, Element};

/// PageRank by power iteration.
///
/// Sources transfer their rank divided by their outdegree; the new rank of a
/// vertex is (1 − *d*) / *n* + *d* times the sum of the contributions of its
/// incoming edges, where *d* is the damping factor. The rank of vertices
/// without outgoing edges is not redistributed.
#[derive(Debug, Clone)]
pub struct PageRank {
    out_degrees: Vec<usize>,
    damping: f64,
}

impl PageRank {
    /// Creates a new instance for a graph with the given outdegrees.
    pub fn new(out_degrees: Vec<usize>, damping: f64) -> Self {
        Self {
            out_degrees,
            damping,
        }
    }

    /// Creates a new instance computing outdegrees from a list of edges.
    pub fn from_edges<E>(num_vertices: usize, edges: &[(usize, usize, E)], damping: f64) -> Self {
        let mut out_degrees = vec![0; num_vertices];
        for &(source, _, _) in edges {
            out_degrees[source] += 1;
        }
        Self::new(out_degrees, damping)
    }

    /// Returns the number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.out_degrees.len()
    }

    /// Returns the initial rank of every vertex.
    pub fn initial_rank(&self) -> f64 {
        1.0 / self.num_vertices() as f64
    }
}

impl<W: ?Sized> Algorithm<W> for PageRank {
    type Source = f64;
    type Destination = f64;
    type Edge = ();

    fn initialize_source(&self, _worker: &W, source: &mut Element<f64>) {
        let out_degree = self.out_degrees[source.id];
        if out_degree != 0 {
            source.value /= out_degree as f64;
        }
    }

    fn initialize(&self, _worker: &W, destination: &mut Element<f64>) {
        destination.value = 0.0;
    }

    fn gather(
        &self,
        _worker: &W,
        source: &Element<f64>,
        destination: &mut Element<f64>,
        _edge: &(),
    ) {
        destination.value += source.value;
    }

    fn process(&self, accumulator1: &Element<f64>, accumulator2: &Element<f64>, out: &mut Element<f64>) {
        out.value = accumulator1.value + accumulator2.value;
    }

    fn apply(&self, _worker: &W, out: &mut Element<f64>) {
        out.value = (1.0 - self.damping) / self.num_vertices() as f64 + self.damping * out.value;
    }
}
