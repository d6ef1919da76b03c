/*
 * SPDX-FileCopyrightText: 2025 The blocksplit developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{Algorithm, Element};
use derivative::Derivative;
use derive_setters::*;
use dsi_progress_logger::ProgressLog;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// An in-memory engine running an [`Algorithm`] on a slice of edges.
///
/// Edges are triples (source, destination, data), where source and
/// destination are indices into the slice of vertex values. Each iteration
/// follows the protocol described in [`Algorithm`]:
///
/// 1. [`before_iteration`](Algorithm::before_iteration) is called;
/// 2. accumulators are loaded from the vertex values if
///    [`is_destination_loaded`](Algorithm::is_destination_loaded), or
///    set to default values otherwise;
/// 3. if [`is_source_loaded`](Algorithm::is_source_loaded), source values are
///    obtained from the vertex values by [`From`], and
///    [`initialize_source`](Algorithm::initialize_source) is called on each
///    vertex that is the source of some edge; otherwise, sources have default
///    values;
/// 4. if [`is_initialized`](Algorithm::is_initialized),
///    [`initialize`](Algorithm::initialize) is called on each accumulator;
/// 5. edges are divided in [chunks](Replay::chunk_size), and each chunk is
///    gathered into a private copy of the accumulators (in parallel, if the
///    `rayon` feature is enabled);
/// 6. private copies are merged using [`process`](Algorithm::process);
/// 7. if [`is_applied`](Algorithm::is_applied),
///    [`apply`](Algorithm::apply) is called on each merged accumulator;
/// 8. if [`is_destination_stored`](Algorithm::is_destination_stored), merged
///    accumulators replace the vertex values;
/// 9. [`after_iteration`](Algorithm::after_iteration) is called.
///
/// Since every chunk starts from a copy of the accumulators of step 4, their
/// value must be idempotent with respect to [`process`](Algorithm::process)
/// (e.g., zero for a sum, or any value for a minimum).
///
/// # Examples
///
/// ```rust
/// use blocksplit::algo::{Algorithm, Element, Replay};
/// use dsi_progress_logger::no_logging;
///
/// /// Counts incoming edges.
/// struct InDegree;
///
/// impl Algorithm<()> for InDegree {
///     type Source = usize;
///     type Destination = usize;
///     type Edge = ();
///
///     fn initialize(&self, _: &(), d: &mut Element<usize>) { d.value = 0; }
///     fn gather(&self, _: &(), _: &Element<usize>, d: &mut Element<usize>, _: &()) {
///         d.value += 1;
///     }
///     fn process(&self, a: &Element<usize>, b: &Element<usize>, out: &mut Element<usize>) {
///         out.value = a.value + b.value;
///     }
///     fn apply(&self, _: &(), _: &mut Element<usize>) {}
///     fn is_source_loaded(&self) -> bool { false }
///     fn is_destination_loaded(&self) -> bool { false }
/// }
///
/// let edges = [(0, 1, ()), (2, 1, ()), (1, 0, ())];
/// let mut values = vec![0; 3];
/// Replay::default()
///     .chunk_size(1)
///     .run(&mut InDegree, &(), &edges, &mut values, 1, no_logging![]);
/// assert_eq!(values, vec![1, 2, 0]);
/// ```
#[derive(Setters, Debug, Clone, Copy, Derivative)]
#[derivative(Default)]
#[setters(generate = false)]
pub struct Replay {
    /// The number of edges gathered into the same partial accumulators. The
    /// default is 2¹⁶.
    #[setters(generate = true)]
    #[derivative(Default(value = "1 << 16"))]
    chunk_size: usize,
}

impl Replay {
    /// Runs `iterations` iterations of `algorithm`, updating `values`.
    ///
    /// # Panics
    ///
    /// If an edge has an endpoint that is not a valid index into `values`.
    pub fn run<W, A>(
        &self,
        algorithm: &mut A,
        worker: &W,
        edges: &[(usize, usize, A::Edge)],
        values: &mut [A::Destination],
        iterations: usize,
        pl: &mut impl ProgressLog,
    ) where
        W: ?Sized + Sync,
        A: Algorithm<W> + Sync,
        A::Source: From<A::Destination> + Default + Send + Sync,
        A::Destination: Clone + Default + Send + Sync,
        A::Edge: Sync,
    {
        pl.item_name("iteration");
        pl.expected_updates(Some(iterations));
        pl.start(format!(
            "Replaying {} edges on {} vertices...",
            edges.len(),
            values.len()
        ));
        for iteration in 0..iterations {
            algorithm.before_iteration(iteration, worker);
            let merged = self.gather(algorithm, worker, edges, values);
            if algorithm.is_destination_stored() {
                for (value, acc) in values.iter_mut().zip(merged) {
                    *value = acc.value;
                }
            }
            algorithm.after_iteration(iteration, worker);
            pl.update();
        }
        pl.done();
    }

    /// Computes the merged and applied accumulators of an iteration.
    fn gather<W, A>(
        &self,
        algorithm: &A,
        worker: &W,
        edges: &[(usize, usize, A::Edge)],
        values: &[A::Destination],
    ) -> Vec<Element<A::Destination>>
    where
        W: ?Sized + Sync,
        A: Algorithm<W> + Sync,
        A::Source: From<A::Destination> + Default + Send + Sync,
        A::Destination: Clone + Default + Send + Sync,
        A::Edge: Sync,
    {
        let mut accumulators: Vec<Element<A::Destination>> = if algorithm.is_destination_loaded()
        {
            values
                .iter()
                .enumerate()
                .map(|(id, value)| Element::new(id, value.clone()))
                .collect()
        } else {
            (0..values.len())
                .map(|id| Element::new(id, A::Destination::default()))
                .collect()
        };

        let sources: Vec<Element<A::Source>> = if algorithm.is_source_loaded() {
            let mut touched = vec![false; values.len()];
            for &(source, _, _) in edges {
                touched[source] = true;
            }
            values
                .iter()
                .zip(touched)
                .enumerate()
                .map(|(id, (value, touched))| {
                    let mut source = Element::new(id, A::Source::from(value.clone()));
                    if touched {
                        algorithm.initialize_source(worker, &mut source);
                    }
                    source
                })
                .collect()
        } else {
            (0..values.len())
                .map(|id| Element::new(id, A::Source::default()))
                .collect()
        };

        if algorithm.is_initialized() {
            for acc in accumulators.iter_mut() {
                algorithm.initialize(worker, acc);
            }
        }

        let gather_chunk = |chunk: &[(usize, usize, A::Edge)]| {
            let mut partial = accumulators.clone();
            for (source, destination, edge) in chunk {
                algorithm.gather(worker, &sources[*source], &mut partial[*destination], edge);
            }
            partial
        };

        let merge = |mut left: Vec<Element<A::Destination>>,
                     right: Vec<Element<A::Destination>>| {
            for (l, r) in left.iter_mut().zip(right.iter()) {
                let mut out = l.clone();
                algorithm.process(l, r, &mut out);
                *l = out;
            }
            left
        };

        let chunk_size = self.chunk_size.max(1);
        #[cfg(feature = "rayon")]
        let merged = edges
            .par_chunks(chunk_size)
            .map(gather_chunk)
            .reduce_with(merge);
        #[cfg(not(feature = "rayon"))]
        let merged = edges.chunks(chunk_size).map(gather_chunk).reduce(merge);

        let mut merged = merged.unwrap_or(accumulators);

        if algorithm.is_applied() {
            for acc in merged.iter_mut() {
                algorithm.apply(worker, acc);
            }
        }
        merged
    }
}
