use std::cmp::Ordering;
use std::thread::available_parallelism;

use eyre::{Result, WrapErr};
use rayon::{ThreadPool, ThreadPoolBuilder};

// Negative values count from the number of available cores: -1 = all cores, -2 = all but one.
fn _normalize(requested: isize, max: isize) -> usize {
    match requested.cmp(&0) {
        Ordering::Less => (max + requested + 1).max(1) as usize,
        Ordering::Equal => 1,
        Ordering::Greater => requested.min(max) as usize,
    }
}

/// Number of worker threads to use for the requested parallelism level.
pub fn threads(requested: isize) -> Result<usize> {
    let max = available_parallelism()?.get() as isize;
    Ok(_normalize(requested, max))
}

/// Rayon pool with the requested parallelism level. The calling thread takes part in the work.
pub fn pool(requested: isize) -> Result<ThreadPool> {
    let threads = threads(requested)?;
    ThreadPoolBuilder::new()
        .num_threads(threads)
        .use_current_thread()
        .build()
        .wrap_err_with(|| format!("Failed to build a thread pool with {threads} threads"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threads_normalization() {
        for (requested, max, expected) in [
            (0, 8, 1),
            (1, 8, 1),
            (6, 8, 6),
            (8, 8, 8),
            (100, 8, 8),
            (-1, 8, 8),
            (-3, 8, 6),
            (-8, 8, 1),
            (-20, 8, 1),
        ] {
            assert_eq!(_normalize(requested, max), expected);
        }
    }

    #[test]
    fn test_pool() -> Result<()> {
        let pool = pool(1)?;
        assert_eq!(pool.current_num_threads(), 1);
        assert_eq!(pool.install(|| 2 + 2), 4);
        Ok(())
    }
}
