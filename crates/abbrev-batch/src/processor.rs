use abbrev_core::{AbbrevConfig, AbbrevError, AbbreviationResult, Method, Result};
use abbrev_engine::text::char_len;
use abbrev_engine::{verify_with_target, Abbreviator};
use serde::Serialize;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::columns::{find_column, OutputLayout};

pub const TIMED_OUT_TAG: &str = "Error: timed out";

/// Progress is logged every this many finished rows.
const PROGRESS_INTERVAL: usize = 100;

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub column: String,
    pub target_length: usize,
    pub use_model: bool,
    pub row_timeout: Duration,
    pub deadline: Duration,
    pub max_concurrency: usize,
}

impl BatchOptions {
    pub fn from_config(config: &AbbrevConfig) -> Self {
        Self {
            column: config.batch.column.clone(),
            target_length: config.abbreviation.target_length,
            use_model: config.abbreviation.use_model,
            row_timeout: config.batch.row_timeout(),
            deadline: config.batch.deadline(),
            max_concurrency: config.batch.max_concurrency,
        }
    }

    pub fn with_target_length(mut self, target_length: usize) -> Self {
        self.target_length = target_length;
        self
    }

    pub fn with_model(mut self, use_model: bool) -> Self {
        self.use_model = use_model;
        self
    }

    pub fn with_row_timeout(mut self, row_timeout: Duration) -> Self {
        self.row_timeout = row_timeout;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::from_config(&AbbrevConfig::default())
    }
}

/// Per-batch statistics. Percentages are 0-100.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchStats {
    /// Rows the abbreviator ran on, failed ones included.
    pub processed: usize,
    /// Rows without a usable value: too short, or an empty cell.
    pub skipped: usize,
    /// Rows that came back degraded (method `error`).
    pub failed: usize,
    /// Processed rows whose result fits the target.
    pub success_count: usize,
    pub success_rate: f64,
    pub avg_reduction: f64,
    pub elapsed: Duration,
}

/// Processed rows, ready to be written out.
#[derive(Debug, Clone)]
pub struct BatchTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub stats: BatchStats,
}

impl BatchTable {
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());
        writer.write_record(&self.headers).map_err(csv_error)?;
        for row in &self.rows {
            writer.write_record(row).map_err(csv_error)?;
        }
        let bytes = writer.into_inner().map_err(|e| AbbrevError::Csv(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| AbbrevError::Csv(e.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub csv: String,
    pub stats: BatchStats,
}

/// Runs the abbreviator over many rows concurrently, preserving input order.
pub struct BatchProcessor {
    abbreviator: Arc<Abbreviator>,
}

impl BatchProcessor {
    pub fn new(abbreviator: Arc<Abbreviator>) -> Self {
        Self { abbreviator }
    }

    /// Parse CSV from `reader`, process every row, and render CSV back.
    pub async fn process_csv<R: Read>(&self, reader: R, opts: &BatchOptions) -> Result<BatchOutput> {
        let (headers, rows) = read_csv(reader)?;
        let table = self.process_rows(headers, rows, opts).await?;
        Ok(BatchOutput { csv: table.to_csv()?, stats: table.stats })
    }

    /// Process rows under `headers`. Fails only when the text column is
    /// missing; every per-row problem degrades that row instead.
    pub async fn process_rows(&self, headers: Vec<String>, rows: Vec<Vec<String>>, opts: &BatchOptions) -> Result<BatchTable> {
        let started = Instant::now();
        let column = find_column(&headers, &opts.column)
            .ok_or_else(|| AbbrevError::validation(format!("input must contain a '{}' column", opts.column)))?;
        let layout = OutputLayout::new(headers);
        let deadline = started + opts.deadline;
        let semaphore = Arc::new(Semaphore::new(opts.max_concurrency.max(1)));

        let mut stats = BatchStats::default();
        let mut pending: Vec<(Vec<String>, Option<JoinHandle<AbbreviationResult>>)> = Vec::with_capacity(rows.len());

        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() <= column {
                tracing::warn!(row = idx + 1, "row has no value for the text column, skipping");
                stats.skipped += 1;
                continue;
            }
            if row[column].trim().is_empty() {
                stats.skipped += 1;
                pending.push((row, None));
                continue;
            }
            let job = RowJob {
                abbreviator: Arc::clone(&self.abbreviator),
                semaphore: Arc::clone(&semaphore),
                text: row[column].clone(),
                target_length: opts.target_length,
                use_model: opts.use_model,
                row_timeout: opts.row_timeout,
                deadline,
            };
            pending.push((row, Some(tokio::spawn(job.run()))));
        }

        let mut out_rows = Vec::with_capacity(pending.len());
        let mut total_reduction = 0.0;
        for (row, handle) in pending {
            let Some(handle) = handle else {
                out_rows.push(layout.pad(row));
                continue;
            };
            let text = &row[column];
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(error = %e, "row task failed");
                    degraded(text, format!("Error: {e}"))
                }
            };
            let report = verify_with_target(text, &result.abbreviated, &result.applied_rules, opts.target_length);

            stats.processed += 1;
            if result.method_used == Method::Error {
                stats.failed += 1;
            }
            if result.target_met(opts.target_length) {
                stats.success_count += 1;
            }
            total_reduction += result.reduction_pct();
            if stats.processed % PROGRESS_INTERVAL == 0 {
                tracing::info!(processed = stats.processed, "batch progress");
            }
            out_rows.push(layout.fill(row, &result, &report));
        }

        if stats.processed > 0 {
            stats.success_rate = stats.success_count as f64 / stats.processed as f64 * 100.0;
            stats.avg_reduction = total_reduction / stats.processed as f64;
        }
        stats.elapsed = started.elapsed();
        tracing::info!(
            processed = stats.processed,
            skipped = stats.skipped,
            failed = stats.failed,
            success_rate = %format!("{:.1}%", stats.success_rate),
            avg_reduction = %format!("{:.1}%", stats.avg_reduction),
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "batch completed"
        );

        Ok(BatchTable { headers: layout.headers, rows: out_rows, stats })
    }
}

/// One row's unit of work.
struct RowJob {
    abbreviator: Arc<Abbreviator>,
    semaphore: Arc<Semaphore>,
    text: String,
    target_length: usize,
    use_model: bool,
    row_timeout: Duration,
    deadline: Instant,
}

impl RowJob {
    async fn run(self) -> AbbreviationResult {
        let permit = match tokio::time::timeout_at(self.deadline, Arc::clone(&self.semaphore).acquire_owned()).await {
            Ok(Ok(permit)) => permit,
            _ => {
                tracing::warn!("batch deadline reached before row started");
                return degraded(&self.text, TIMED_OUT_TAG.to_string());
            }
        };

        let budget = self.row_timeout.min(self.deadline.saturating_duration_since(Instant::now()));
        let abbreviator = self.abbreviator;
        let text = self.text.clone();
        let (target_length, use_model) = (self.target_length, self.use_model);
        // The permit moves into the blocking task so the bound holds even
        // after a timeout stops waiting on it.
        let work = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            abbreviator.abbreviate(&text, target_length, use_model)
        });

        match tokio::time::timeout(budget, work).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                tracing::error!(error = %e, "row abbreviation panicked");
                degraded(&self.text, format!("Error: {e}"))
            }
            Err(_) => {
                tracing::warn!(timeout_ms = budget.as_millis() as u64, "row timed out");
                degraded(&self.text, TIMED_OUT_TAG.to_string())
            }
        }
    }
}

fn degraded(text: &str, tag: String) -> AbbreviationResult {
    AbbreviationResult::new(text.to_string(), char_len(text), vec![tag], Method::Error)
}

fn csv_error(e: csv::Error) -> AbbrevError {
    AbbrevError::Csv(e.to_string())
}

/// Read a header row and records. Invalid UTF-8 is replaced, rows may be
/// ragged.
fn read_csv<R: Read>(reader: R) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);
    let headers: Vec<String> = rdr
        .byte_headers()
        .map_err(csv_error)?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = String::from_utf8_lossy(h);
            if i == 0 { h.trim_start_matches('\u{feff}').to_string() } else { h.into_owned() }
        })
        .collect();
    let mut rows = Vec::new();
    for record in rdr.byte_records() {
        let record = record.map_err(csv_error)?;
        rows.push(record.iter().map(|f| String::from_utf8_lossy(f).into_owned()).collect());
    }
    Ok((headers, rows))
}
