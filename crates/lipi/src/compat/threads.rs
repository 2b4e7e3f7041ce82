//! # Thread Utilities

use std::{num::NonZeroUsize, thread};

/// The search list of environment variables that Rayon uses to control parallelism.
#[cfg(feature = "rayon")]
const RAYON_VARS: &[&str] = &["RAYON_NUM_THREADS", "RAYON_RS_NUM_CPUS"];

/// Get the max parallelism available.
///
/// When `rayon` is enabled, will scan over `RAYON_VARS`.
pub fn est_max_parallelism() -> usize {
    let default = || {
        thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    };

    #[cfg(feature = "rayon")]
    for name in RAYON_VARS {
        if let Some(x @ 1..) = std::env::var(name)
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
        {
            return x;
        }
    }

    default()
}

/// Resolve the max pool size.
///
/// ``min(max_pool, thread::available_parallelism(), env::var("RAYON_NUM_THREADS"))``
pub fn resolve_max_pool(max_pool: Option<NonZeroUsize>) -> usize {
    let sys_max = est_max_parallelism();

    let max_pool = max_pool.map(|x| x.get()).unwrap_or(sys_max);

    core::cmp::min(max_pool, sys_max)
}
