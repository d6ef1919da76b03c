/*
 *
 * SPDX-FileCopyrightText: 2025 The blocksplit developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Utility functions and lenders.

*/

pub mod file;
pub use file::*;

pub mod lenders;
pub use lenders::*;
