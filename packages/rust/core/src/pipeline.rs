//! End-to-end catalog build: spreadsheet export → CSV rows → entries.
//!
//! [`fetch_all_entries`] is the fail-soft surface for presentation code: it
//! never returns an error, only a possibly empty list. [`fetch_report`] is the
//! same pipeline with errors and skip diagnostics kept.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, instrument};

use climatemap_sheet::{build_client, fetch_csv_capped, parse_document};
use climatemap_shared::{Entry, Result, SheetConfig};

use crate::normalize::{NormalizeContext, Rejection, RowOutcome, normalize_row};

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Per-reason counts of rows that did not become entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkipCounts {
    pub missing_name: usize,
    pub header_echo: usize,
    pub unresolved_country: usize,
    /// Unresolved country spellings and how often each appeared.
    pub unknown_countries: BTreeMap<String, usize>,
}

impl SkipCounts {
    fn record(&mut self, rejection: &Rejection) {
        match rejection {
            Rejection::MissingName => self.missing_name += 1,
            Rejection::HeaderEcho => self.header_echo += 1,
            Rejection::UnresolvedCountry { country } => {
                self.unresolved_country += 1;
                if !country.is_empty() {
                    *self.unknown_countries.entry(country.clone()).or_default() += 1;
                }
            }
        }
    }

    /// Total skipped rows.
    pub fn total(&self) -> usize {
        self.missing_name + self.header_echo + self.unresolved_country
    }
}

/// A built catalog plus diagnostics about the rows that were dropped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogReport {
    /// Accepted entries in row order.
    pub entries: Vec<Entry>,
    /// Non-blank data rows read from the document.
    pub rows_seen: usize,
    pub skipped: SkipCounts,
    pub built_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when the catalog is built.
    fn done(&self, report: &CatalogReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self, _report: &CatalogReport) {}
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Parse and normalize CSV text. Pure and synchronous.
pub fn build_catalog(csv_text: &str, ctx: &NormalizeContext) -> CatalogReport {
    let document = parse_document(csv_text);
    let rows_seen = document.rows.len();

    let mut entries = Vec::with_capacity(rows_seen);
    let mut skipped = SkipCounts::default();

    for (index, row) in document.rows.iter().enumerate() {
        match normalize_row(row, index, ctx) {
            RowOutcome::Accepted(entry) => entries.push(entry),
            RowOutcome::Rejected(rejection) => {
                debug!(row = index, reason = %rejection, "row skipped");
                skipped.record(&rejection);
            }
        }
    }

    CatalogReport {
        entries,
        rows_seen,
        skipped,
        built_at: Utc::now(),
    }
}

/// Download the sheet export and build the catalog, surfacing failures.
#[instrument(skip_all, fields(gid = %sheet.gid))]
pub async fn fetch_report(
    sheet: &SheetConfig,
    ctx: &NormalizeContext,
    progress: &dyn ProgressReporter,
) -> Result<CatalogReport> {
    let start = Instant::now();
    let url = sheet.export_url();

    progress.phase("Downloading spreadsheet");
    let client = build_client(sheet)?;
    let csv_text = fetch_csv_capped(&client, &url, sheet.max_response_bytes).await?;

    progress.phase("Building catalog");
    let report = build_catalog(&csv_text, ctx);

    info!(
        entries = report.entries.len(),
        rows = report.rows_seen,
        skipped_missing_name = report.skipped.missing_name,
        skipped_header_echo = report.skipped.header_echo,
        skipped_unresolved_country = report.skipped.unresolved_country,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "loaded climate robotics entries"
    );

    progress.done(&report);
    Ok(report)
}

/// Fetch every entry, or an empty list if anything goes wrong.
///
/// Failures are logged, never returned.
pub async fn fetch_all_entries(sheet: &SheetConfig, ctx: &NormalizeContext) -> Vec<Entry> {
    match fetch_report(sheet, ctx, &SilentProgress).await {
        Ok(report) => report.entries,
        Err(e) => {
            error!(error = %e, "error fetching climate robotics data");
            Vec::new()
        }
    }
}
