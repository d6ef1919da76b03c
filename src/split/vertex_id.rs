/*
 * SPDX-FileCopyrightText: 2025 The blocksplit developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::fmt::{Debug, Display};
use core::hash::Hash;
use core::str::FromStr;

/// Unsigned integer types usable as vertex identifiers.
///
/// Partition indices are obtained by shifting identifiers to the right, so the
/// only arithmetic we need is a shift followed by a conversion to `usize`.
/// Identifiers must fit in a `usize` once shifted, which is always the case on
/// 64-bit platforms.
pub trait VertexId:
    Copy + Ord + Hash + Debug + Display + Default + FromStr + Send + Sync + 'static
{
    /// The smallest identifier.
    const ZERO: Self;

    /// Shifts the identifier right by `shift` bits and converts the result to
    /// an index. Shifts larger than the width of the type give zero.
    fn shifted(self, shift: u32) -> usize;
}

macro_rules! impl_vertex_id {
    ($($ty:ty),*) => {$(
        impl VertexId for $ty {
            const ZERO: Self = 0;

            #[inline(always)]
            fn shifted(self, shift: u32) -> usize {
                self.checked_shr(shift).unwrap_or(0) as usize
            }
        }
    )*};
}

impl_vertex_id!(u32, u64, usize);
