//! Row-parallel fan-out/join.
//!
//! Work is split into contiguous, disjoint row ranges and each range runs on
//! its own scoped thread. Transforms hand every task an exclusive `&mut` band
//! of the output buffer and a shared `&` view of the input, so no locking is
//! needed and the result does not depend on scheduling order.

use std::num::NonZeroUsize;
use std::ops::Range;
use std::sync::Arc;
use std::thread::{self, Scope, ScopedJoinHandle};

/// Splits a row count into per-worker ranges and runs them concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Splitter {
    workers: NonZeroUsize,
}

impl Default for Splitter {
    /// One worker per unit of available parallelism.
    fn default() -> Self {
        let workers = thread::available_parallelism().unwrap_or(NonZeroUsize::MIN);
        Self { workers }
    }
}

impl Splitter {
    /// Create a splitter with a fixed worker count. Zero is treated as one.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: NonZeroUsize::new(workers).unwrap_or(NonZeroUsize::MIN),
        }
    }

    /// Number of workers `P` used to partition rows.
    pub fn workers(&self) -> usize {
        self.workers.get()
    }

    /// Partition `[0, rows)` into `min(rows, P)` contiguous ranges.
    ///
    /// With fewer rows than workers every row gets its own range. Otherwise
    /// each range holds `rows / P` rows and the last one extends to `rows`,
    /// picking up the remainder.
    ///
    /// ```
    /// use termglyph::Splitter;
    ///
    /// let ranges = Splitter::new(3).ranges(7);
    /// assert_eq!(ranges, vec![0..2, 2..4, 4..7]);
    /// ```
    pub fn ranges(&self, rows: usize) -> Vec<Range<usize>> {
        let workers = self.workers.get();
        if rows < workers {
            return (0..rows).map(|row| row..row + 1).collect();
        }

        let chunk = rows / workers;
        (0..workers)
            .map(|i| {
                let start = i * chunk;
                let end = if i + 1 == workers { rows } else { start + chunk };
                start..end
            })
            .collect()
    }

    /// Run `f` once per range of `[0, rows)` on threads of `scope`.
    ///
    /// The returned [`Join`] must be waited on to observe completion and to
    /// re-raise task panics.
    pub fn spawn<'scope, 'env, F>(
        &self,
        scope: &'scope Scope<'scope, 'env>,
        rows: usize,
        f: F,
    ) -> Join<'scope>
    where
        F: Fn(Range<usize>) + Send + Sync + 'scope,
    {
        let ranges = self.ranges(rows);
        log::trace!("splitting {} rows into {} ranges", rows, ranges.len());

        let f = Arc::new(f);
        let handles = ranges
            .into_iter()
            .map(|range| {
                let f = Arc::clone(&f);
                scope.spawn(move || f(range))
            })
            .collect();

        Join { handles }
    }

    /// Split `data` into bands of whole rows (`row_len` elements each) and
    /// run `f(rows, band)` on every band concurrently, returning once all
    /// bands are done.
    ///
    /// A trailing partial row (if `data.len()` is not a multiple of
    /// `row_len`) is left untouched.
    pub fn for_each_band<T, F>(&self, data: &mut [T], row_len: usize, f: F)
    where
        T: Send,
        F: Fn(Range<usize>, &mut [T]) + Sync,
    {
        if row_len == 0 {
            return;
        }
        let rows = data.len() / row_len;
        let ranges = self.ranges(rows);

        match ranges.len() {
            0 => return,
            1 => {
                f(0..rows, &mut data[..rows * row_len]);
                return;
            }
            _ => {}
        }

        log::trace!(
            "splitting {} rows of {} elements into {} bands",
            rows,
            row_len,
            ranges.len()
        );

        let mut bands = Vec::with_capacity(ranges.len());
        let mut rest = data;
        for range in ranges {
            let (band, tail) = std::mem::take(&mut rest).split_at_mut(range.len() * row_len);
            bands.push((range, band));
            rest = tail;
        }

        let f = &f;
        thread::scope(|scope| {
            let handles = bands
                .into_iter()
                .map(|(range, band)| scope.spawn(move || f(range, band)))
                .collect();
            Join { handles }.wait();
        });
    }
}

/// Completion handle for a set of spawned range tasks.
#[must_use = "a Join does nothing unless waited on"]
pub struct Join<'scope> {
    handles: Vec<ScopedJoinHandle<'scope, ()>>,
}

impl Join<'_> {
    /// Number of tasks behind this handle.
    pub fn tasks(&self) -> usize {
        self.handles.len()
    }

    /// Block until every task has finished.
    ///
    /// If any task panicked, the first panic is resumed on the calling thread
    /// after all tasks have been joined.
    pub fn wait(self) {
        let mut first_panic = None;
        for handle in self.handles {
            if let Err(payload) = handle.join() {
                first_panic.get_or_insert(payload);
            }
        }
        if let Some(payload) = first_panic {
            std::panic::resume_unwind(payload);
        }
    }
}
