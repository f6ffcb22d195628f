use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::GenError;

/// Where the data-parallel stages run: rayon's global pool, or a dedicated pool.
#[derive(Clone, Default)]
pub struct Workers {
    pool: Option<Arc<ThreadPool>>,
}

impl Workers {
    pub fn global() -> Self {
        Self { pool: None }
    }

    /// `threads == 0` keeps the global pool.
    pub fn with_threads(threads: usize) -> Result<Self, GenError> {
        if threads == 0 {
            return Ok(Self::global());
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("atoll-gen-{i}"))
            .build()
            .map_err(|e| GenError::WorkerPool(e.to_string()))?;
        log::debug!(target: "mapgen", "built worker pool with {} threads", threads);
        Ok(Self {
            pool: Some(Arc::new(pool)),
        })
    }

    pub fn threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    pub fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

impl std::fmt::Debug for Workers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workers")
            .field("dedicated", &self.pool.is_some())
            .field("threads", &self.threads())
            .finish()
    }
}
