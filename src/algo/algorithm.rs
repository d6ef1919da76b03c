/*
 * SPDX-FileCopyrightText: 2025 The blocksplit developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/// A vertex id together with a value.
///
/// Elements carry vertex values, transferable source values, and (partial)
/// accumulators alike. The value is opaque to the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Element<V> {
    /// The id of the vertex.
    pub id: usize,
    /// The value associated with the vertex.
    pub value: V,
}

impl<V> Element<V> {
    pub fn new(id: usize, value: V) -> Self {
        Self { id, value }
    }
}

/// A vertex-centric algorithm in the gather/apply model.
///
/// An engine runs an algorithm by iterations. Within an iteration, for each
/// destination vertex the engine
///
/// 1. calls [`initialize`](Algorithm::initialize), if
///    [`is_initialized`](Algorithm::is_initialized) is true;
/// 2. calls [`gather`](Algorithm::gather) once for each edge entering the
///    vertex, possibly from several threads, each one folding into its own
///    partial accumulator;
/// 3. merges the partial accumulators with [`process`](Algorithm::process);
/// 4. calls [`apply`](Algorithm::apply) on the merged accumulator, if
///    [`is_applied`](Algorithm::is_applied) is true;
/// 5. stores the result, if
///    [`is_destination_stored`](Algorithm::is_destination_stored) is true.
///
/// No step is skipped, except for those controlled by flags. The iteration is
/// surrounded by calls to [`before_iteration`](Algorithm::before_iteration)
/// and [`after_iteration`](Algorithm::after_iteration); an engine stops
/// iterating simply by not starting a new iteration.
///
/// The worker `W` is a handle to the engine running the algorithm, and it is
/// passed through unchanged.
///
/// # Concurrency
///
/// [`gather`](Algorithm::gather), [`process`](Algorithm::process),
/// [`initialize`](Algorithm::initialize),
/// [`initialize_source`](Algorithm::initialize_source) and
/// [`apply`](Algorithm::apply) take `&self`, as engines may call them from
/// several threads: a partial accumulator, however, is never shared between
/// threads, so [`gather`](Algorithm::gather) has exclusive access to it.
/// [`process`](Algorithm::process) must be associative and commutative, as
/// the engine chooses how to group partial accumulators, and how many there
/// are.
pub trait Algorithm<W: ?Sized> {
    /// The value transferred from a source along its edges.
    type Source;
    /// The value of a destination vertex, and of its accumulators.
    type Destination;
    /// The data associated with an edge.
    type Edge;

    /// Prepares the value a source vertex transfers along its edges.
    ///
    /// Called once for each source vertex before its edges are gathered, if
    /// [`is_source_loaded`](Algorithm::is_source_loaded) is true.
    fn initialize_source(&self, _worker: &W, _source: &mut Element<Self::Source>) {}

    /// Initializes the accumulator of a destination vertex.
    fn initialize(&self, worker: &W, destination: &mut Element<Self::Destination>);

    /// Folds the contribution of an edge into a partial accumulator of its
    /// destination.
    fn gather(
        &self,
        worker: &W,
        source: &Element<Self::Source>,
        destination: &mut Element<Self::Destination>,
        edge: &Self::Edge,
    );

    /// Combines two partial accumulators of the same vertex into `out`.
    ///
    /// `out` initially contains a copy of one of the two accumulators.
    fn process(
        &self,
        accumulator1: &Element<Self::Destination>,
        accumulator2: &Element<Self::Destination>,
        out: &mut Element<Self::Destination>,
    );

    /// Computes the new value of a vertex from its merged accumulator.
    fn apply(&self, worker: &W, out: &mut Element<Self::Destination>);

    /// Returns whether [`initialize`](Algorithm::initialize) must be called.
    /// By default is true.
    fn is_initialized(&self) -> bool {
        true
    }

    /// Returns whether [`apply`](Algorithm::apply) must be called. By default
    /// is true.
    fn is_applied(&self) -> bool {
        true
    }

    /// Called before an iteration starts.
    fn before_iteration(&mut self, _iteration: usize, _worker: &W) {}

    /// Called after an iteration has finished.
    fn after_iteration(&mut self, _iteration: usize, _worker: &W) {}

    /// Returns whether source values must be loaded from the stored vertex
    /// values. If false, sources have default values. By default is true.
    fn is_source_loaded(&self) -> bool {
        true
    }

    /// Returns whether accumulators start from the stored vertex values. If
    /// false, they start from default values. By default is true.
    fn is_destination_loaded(&self) -> bool {
        true
    }

    /// Returns whether merged accumulators are stored as the new vertex
    /// values at the end of the iteration. By default is true.
    ///
    /// Stored values are the ones loaded at the next iteration, after
    /// [`before_iteration`](Algorithm::before_iteration) has been called. An
    /// algorithm returning false keeps the current stored values, and can
    /// update its own state in [`after_iteration`](Algorithm::after_iteration).
    fn is_destination_stored(&self) -> bool {
        true
    }
}
