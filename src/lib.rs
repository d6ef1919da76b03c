/*
 * SPDX-FileCopyrightText: 2025 The blocksplit developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![deny(unconditional_recursion)]
#![doc = "Partition and block-adjacency sizing for out-of-core graph processing, and the gather/apply algorithm contract."]

pub mod algo;
pub mod split;
pub mod utils;

pub mod prelude {
    pub use crate::algo::*;
    pub use crate::split::*;
}

/// Initializes the `env_logger` logger with a custom format including
/// the elapsed time since initialization, and default level `info`.
pub fn init_env_logger() -> anyhow::Result<()> {
    use std::io::Write;

    let start = std::time::Instant::now();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(move |buf, record| {
            let elapsed = start.elapsed();
            writeln!(
                buf,
                "[{:>4}.{:03}s {} {}] {}",
                elapsed.as_secs(),
                elapsed.subsec_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()?;
    Ok(())
}
