//! Worker pool for module transforms.

use crate::error::BuildResult;
use rayon::prelude::*;

/// Dedicated rayon pool, so a build never competes with the global pool of
/// an embedding host.
pub struct ParallelRuntime {
    pool: rayon::ThreadPool,
}

impl ParallelRuntime {
    /// `None` uses one thread per CPU core.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BuildError::ThreadPool`] if the pool cannot start.
    pub fn new(num_threads: Option<usize>) -> BuildResult<Self> {
        let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|idx| format!("ecss-{idx}"));
        if let Some(num) = num_threads {
            builder = builder.num_threads(num);
        }
        let pool = builder.build()?;
        Ok(Self { pool })
    }

    /// Apply `work` to every item in parallel. Results keep the input order.
    pub fn map_ordered<T, R, F>(&self, items: &[T], work: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Send + Sync,
    {
        self.pool.install(|| items.par_iter().map(&work).collect())
    }

    #[inline]
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    #[inline]
    pub const fn pool(&self) -> &rayon::ThreadPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_follow_input_order() {
        let runtime = ParallelRuntime::new(Some(4)).unwrap();
        assert_eq!(runtime.threads(), 4);
        let items: Vec<u32> = (0..256).collect();
        let doubled = runtime.map_ordered(&items, |item| item * 2);
        assert_eq!(doubled, items.iter().map(|item| item * 2).collect::<Vec<_>>());
    }
}
