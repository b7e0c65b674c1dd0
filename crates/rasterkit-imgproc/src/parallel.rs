use rayon::prelude::*;

use rasterkit_image::ImageError;

/// Default number of elements below which scheduled work runs sequentially.
pub const DEFAULT_MIN_WORK_SIZE: usize = 100 * 100;

/// A work-partitioning scheduler backed by a fixed-size worker pool.
///
/// The scheduler splits an iteration space (rows or channel indices) across
/// its pool so that each unit executes exactly once, with no ordering
/// guarantee across units. Callers guarantee that every unit writes to a
/// disjoint target, which is why no locking happens here. Work smaller than
/// [`Scheduler::min_work_size`] runs sequentially on the calling thread.
///
/// Configuration lives on the instance, not in process-wide statics; every
/// operation borrows the scheduler it should run on. Reconfiguration affects
/// all subsequent calls through the same instance.
///
/// # Examples
///
/// ```
/// use rasterkit_imgproc::parallel::Scheduler;
///
/// let scheduler = Scheduler::with_workers(2).unwrap();
///
/// let mut rows = vec![0.0f64; 12];
/// scheduler
///     .run_rows(&mut rows, 4, 12, |row, samples| {
///         samples.iter_mut().for_each(|s| *s = row as f64);
///         Ok(())
///     })
///     .unwrap();
///
/// assert_eq!(rows[0], 0.0);
/// assert_eq!(rows[11], 2.0);
/// ```
pub struct Scheduler {
    pool: rayon::ThreadPool,
    workers: usize,
    min_work_size: usize,
}

impl Scheduler {
    /// Create a scheduler sized to the hardware parallelism.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker pool fails to build.
    pub fn new() -> Result<Self, ImageError> {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::with_workers(workers)
    }

    /// Create a scheduler with a fixed number of workers.
    ///
    /// # Errors
    ///
    /// Returns an error if `workers` is zero or the pool fails to build.
    pub fn with_workers(workers: usize) -> Result<Self, ImageError> {
        if workers == 0 {
            return Err(ImageError::InvalidWorkerCount(workers));
        }
        let pool = build_pool(workers)?;
        Ok(Self {
            pool,
            workers,
            min_work_size: DEFAULT_MIN_WORK_SIZE,
        })
    }

    /// Number of worker threads in the pool.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Element count below which scheduled work runs sequentially.
    pub fn min_work_size(&self) -> usize {
        self.min_work_size
    }

    /// Set the sequential-execution threshold in elements.
    pub fn set_min_work_size(&mut self, min_work_size: usize) {
        self.min_work_size = min_work_size;
    }

    /// Resize the worker pool.
    ///
    /// # Errors
    ///
    /// Returns an error if `workers` is zero or the new pool fails to build;
    /// the previous pool stays in place on failure.
    pub fn set_workers(&mut self, workers: usize) -> Result<(), ImageError> {
        if workers == 0 {
            return Err(ImageError::InvalidWorkerCount(workers));
        }
        if workers != self.workers {
            self.pool = build_pool(workers)?;
            self.workers = workers;
        }
        Ok(())
    }

    /// Whether a call over `work_size` elements will run on the pool.
    pub fn is_parallel(&self, work_size: usize) -> bool {
        self.workers > 1 && work_size >= self.min_work_size
    }

    /// Execute `op` once for every unit index in `0..units`.
    ///
    /// `work_size` is the total element count of the call and decides the
    /// sequential/parallel dispatch. The first detected failure propagates to
    /// the caller; units already in flight may still finish, but the caller
    /// discards their output along with the failed call.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `op`.
    pub fn run<F>(&self, units: usize, work_size: usize, op: F) -> Result<(), ImageError>
    where
        F: Fn(usize) -> Result<(), ImageError> + Send + Sync,
    {
        if self.is_parallel(work_size) {
            self.pool
                .install(|| (0..units).into_par_iter().try_for_each(|unit| op(unit)))
        } else {
            (0..units).try_for_each(op)
        }
    }

    /// Execute `op` over disjoint consecutive rows of `buf`.
    ///
    /// The buffer is split into `buf.len() / row_len` chunks; `op` receives
    /// the row index and the exclusive slice for that row, so no two units
    /// can write to overlapping memory.
    ///
    /// # Errors
    ///
    /// Returns an error if `row_len` is zero or does not evenly divide the
    /// buffer, or the first error produced by `op`.
    pub fn run_rows<F>(
        &self,
        buf: &mut [f64],
        row_len: usize,
        work_size: usize,
        op: F,
    ) -> Result<(), ImageError>
    where
        F: Fn(usize, &mut [f64]) -> Result<(), ImageError> + Send + Sync,
    {
        if row_len == 0 || buf.len() % row_len != 0 {
            return Err(ImageError::InvalidRowLength(row_len, buf.len()));
        }
        if self.is_parallel(work_size) {
            self.pool.install(|| {
                buf.par_chunks_exact_mut(row_len)
                    .enumerate()
                    .try_for_each(|(row, chunk)| op(row, chunk))
            })
        } else {
            buf.chunks_exact_mut(row_len)
                .enumerate()
                .try_for_each(|(row, chunk)| op(row, chunk))
        }
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("workers", &self.workers)
            .field("min_work_size", &self.min_work_size)
            .finish()
    }
}

fn build_pool(workers: usize) -> Result<rayon::ThreadPool, ImageError> {
    log::debug!("building worker pool with {workers} threads");
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| ImageError::ThreadPool(e.to_string()))
}
