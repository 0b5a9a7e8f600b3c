use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use rayon::prelude::*;

use crate::{
    MatboardError, MatboardResult,
    compose::{params::LayoutParams, render::EncodedBuffer, render::compose},
    export::{
        ARCHIVE_FILE_NAME, ExportFailure, ExportItem, ExportOutput, ExportReport, archive, names,
    },
};

/// Threading controls for batch export.
#[derive(Clone, Debug)]
pub struct ExportThreading {
    /// Composite batch items on a rayon pool instead of sequentially.
    pub parallel: bool,
    /// Override worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for ExportThreading {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

/// Shared one-way flag the UI shell raises to abandon a running export.
///
/// The flag is observed between items: pending composites are skipped,
/// already-running ones complete and are discarded along with any partial
/// archive state, and the run returns [`MatboardError::Cancelled`].
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// A fresh, unraised flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Shared busy indicator for the UI: raised while an export run is underway,
/// lowered on every exit path.
#[derive(Clone, Debug, Default)]
pub struct ProgressFlag(Arc<AtomicBool>);

impl ProgressFlag {
    /// A fresh, lowered flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an export run is currently underway.
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn set(&self, busy: bool) {
        self.0.store(busy, Ordering::Relaxed);
    }
}

/// Options for [`export_all`].
#[derive(Clone, Debug, Default)]
pub struct ExportOptions {
    /// How batch items are scheduled.
    pub threading: ExportThreading,
    /// Observed between items to abandon the run.
    pub cancel: Option<CancelFlag>,
    /// Raised while the run is underway.
    pub progress: Option<ProgressFlag>,
}

/// Lowers the progress flag on every exit path, including error returns.
struct BusyGuard<'a>(Option<&'a ProgressFlag>);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if let Some(progress) = self.0 {
            progress.set(false);
        }
    }
}

/// Composite every item and produce a single buffer or one zip archive.
///
/// - Empty selection: `Ok` report with no output.
/// - One item: the compositor runs once; any error surfaces directly as
///   `Err`, success yields [`ExportOutput::Single`] with the suggested name
///   `stem.ext`.
/// - Two or more items: every item is composited (in parallel on a dedicated
///   rayon pool unless `opts.threading.parallel` is off). Failed items are
///   enumerated in [`ExportReport::failures`] while the survivors are packed
///   into [`ExportOutput::Archive`] under deterministic, collision-free entry
///   names. If every item fails, the report carries no output and all
///   failures. The single/archive split is decided by the input count, so a
///   selection of several photos always yields an archive even when only one
///   survives.
#[tracing::instrument(skip(items, opts), fields(items = items.len()))]
pub fn export_all(
    items: &[ExportItem],
    params: &LayoutParams,
    opts: &ExportOptions,
) -> MatboardResult<ExportReport> {
    let _busy = BusyGuard(opts.progress.as_ref());
    if let Some(progress) = opts.progress.as_ref() {
        progress.set(true);
    }

    if items.is_empty() {
        return Ok(ExportReport::default());
    }
    if let Some(cancel) = opts.cancel.as_ref()
        && cancel.is_cancelled()
    {
        return Err(MatboardError::Cancelled);
    }
    params.validate()?;

    if let [item] = items {
        let buffer = compose(&item.image, params)?;
        let file_name = format!(
            "{}.{}",
            names::output_stem(&item.display_name, 0),
            params.format.extension()
        );
        return Ok(ExportReport {
            output: Some(ExportOutput::Single { file_name, buffer }),
            failures: Vec::new(),
        });
    }

    let results = compose_batch(items, params, opts)?;

    let mut encoded = Vec::new();
    let mut stems = Vec::new();
    let mut failures = Vec::new();
    for (idx, (item, result)) in items.iter().zip(results).enumerate() {
        match result {
            Ok(buffer) => {
                stems.push(names::output_stem(&item.display_name, idx));
                encoded.push(buffer);
            }
            Err(error) => {
                tracing::warn!(item = %item.display_name, %error, "batch item failed");
                failures.push(ExportFailure {
                    display_name: item.display_name.clone(),
                    error,
                });
            }
        }
    }

    if encoded.is_empty() {
        return Ok(ExportReport {
            output: None,
            failures,
        });
    }

    let entry_names = names::assign_entry_names(&stems, params.format.extension());
    let entries: Vec<(String, EncodedBuffer)> = entry_names.into_iter().zip(encoded).collect();
    let bytes = archive::pack_entries(&entries)?;
    let entry_names = entries.into_iter().map(|(name, _)| name).collect();

    Ok(ExportReport {
        output: Some(ExportOutput::Archive {
            file_name: ARCHIVE_FILE_NAME.to_string(),
            bytes,
            entry_names,
        }),
        failures,
    })
}

/// Run the compositor over every item, in input order.
///
/// Returns one result per item; only a cancelled run aborts the whole batch.
fn compose_batch(
    items: &[ExportItem],
    params: &LayoutParams,
    opts: &ExportOptions,
) -> MatboardResult<Vec<MatboardResult<EncodedBuffer>>> {
    let cancel = opts.cancel.as_ref();
    let compose_one = |item: &ExportItem| -> MatboardResult<EncodedBuffer> {
        if let Some(cancel) = cancel
            && cancel.is_cancelled()
        {
            return Err(MatboardError::Cancelled);
        }
        compose(&item.image, params)
    };

    let results: Vec<MatboardResult<EncodedBuffer>> = if opts.threading.parallel {
        let pool = build_thread_pool(opts.threading.threads)?;
        pool.install(|| items.par_iter().map(compose_one).collect())
    } else {
        items.iter().map(compose_one).collect()
    };

    if results
        .iter()
        .any(|r| matches!(r, Err(MatboardError::Cancelled)))
    {
        return Err(MatboardError::Cancelled);
    }
    Ok(results)
}

fn build_thread_pool(threads: Option<usize>) -> MatboardResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MatboardError::validation(
            "export threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| MatboardError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/export/batch.rs"]
mod tests;
