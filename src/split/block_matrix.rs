/*
 * SPDX-FileCopyrightText: 2025 The blocksplit developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use epserde::prelude::*;
use mem_dbg::*;

/// A square, dense, row-major matrix of edge counts.
///
/// Cell (*r*, *c*) counts the edges whose selected endpoint falls in partition
/// *r* and whose other endpoint falls in partition *c*. The matrix can be
/// [grown](BlockMatrix::grow) in place: growth changes the row stride, so
/// rows are moved to their new offsets, and every count previously recorded
/// at (*r*, *c*) is still found at (*r*, *c*) afterwards.
///
/// # Examples
///
/// ```rust
/// use blocksplit::split::BlockMatrix;
///
/// let mut blocks = BlockMatrix::new(2);
/// blocks.increment(1, 0);
/// blocks.grow(3);
/// blocks.increment(2, 2);
/// assert_eq!(blocks.dim(), 3);
/// assert_eq!(blocks.get(1, 0), 1);
/// assert_eq!(blocks.get(2, 2), 1);
/// assert_eq!(blocks.total(), 2);
/// ```
#[derive(Epserde, Debug, Clone, Default, PartialEq, Eq, Hash, MemDbg, MemSize)]
pub struct BlockMatrix {
    /// The counts, `dim * dim` of them, in row-major order.
    counts: Vec<u64>,
    /// The number of rows (and columns).
    dim: usize,
}

impl BlockMatrix {
    /// Creates a zeroed matrix with `dim` rows and columns.
    pub fn new(dim: usize) -> Self {
        Self {
            counts: vec![0; dim * dim],
            dim,
        }
    }

    /// Returns the number of rows (and columns).
    #[inline(always)]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the count of block (`row`, `col`).
    ///
    /// # Panics
    ///
    /// If `row` or `col` are not smaller than [`dim`](BlockMatrix::dim).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u64 {
        assert!(
            row < self.dim && col < self.dim,
            "Block ({}, {}) out of a {}x{} matrix",
            row,
            col,
            self.dim,
            self.dim
        );
        self.counts[row * self.dim + col]
    }

    /// Increments the count of block (`row`, `col`), which must be within the
    /// current dimension.
    #[inline(always)]
    pub fn increment(&mut self, row: usize, col: usize) {
        debug_assert!(row < self.dim && col < self.dim);
        self.counts[row * self.dim + col] += 1;
    }

    /// Grows the matrix to `new_dim` rows and columns.
    ///
    /// Nothing happens if `new_dim` is not larger than the current dimension.
    /// Otherwise the buffer is extended and rows are moved, from the last one
    /// down to the second one, to the start of their wider slot; the tail of
    /// every old row is then zeroed. The first row never moves.
    pub fn grow(&mut self, new_dim: usize) {
        let old_dim = self.dim;
        if new_dim <= old_dim {
            return;
        }
        self.counts.resize(new_dim * new_dim, 0);

        // Destinations never overlap the sources of rows yet to be moved
        for row in (0..old_dim).rev() {
            let start = row * new_dim;
            if row > 0 {
                let old_start = row * old_dim;
                self.counts
                    .copy_within(old_start..old_start + old_dim, start);
            }
            self.counts[start + old_dim..start + new_dim].fill(0);
        }
        self.dim = new_dim;
    }

    /// Returns the sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Returns the counts in row-major order.
    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }

    /// Returns the counts of row `row`.
    pub fn row(&self, row: usize) -> &[u64] {
        &self.counts[row * self.dim..(row + 1) * self.dim]
    }

    /// Returns an iterator over the rows of the matrix.
    pub fn rows(&self) -> impl Iterator<Item = &[u64]> + '_ {
        // chunks panics on zero
        self.counts.chunks(self.dim.max(1))
    }

    /// Consumes the matrix, returning its row-major counts.
    pub fn into_vec(self) -> Vec<u64> {
        self.counts
    }
}
