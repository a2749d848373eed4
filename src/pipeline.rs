use crate::config::{FilterSet, ScraperOptions};
use crate::export::{output_path, run_timestamp, write_table, ExportFormat};
use crate::fetch::{FetchOutcome, Fetcher, HttpPageSource, PageSource};
use crate::progress::PageProgress;
use crate::record::{to_table, RawRecord};
use crate::util::init_tracing_once;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// End-to-end driver: fetch all pages for a filter set, then export them.
#[derive(Clone, Debug, Default)]
pub struct AdScraper {
    pub(crate) opts: ScraperOptions,
    pub(crate) format: ExportFormat,
}

/// What a completed run produced.
#[derive(Debug, PartialEq, Eq)]
pub enum RunReport {
    /// The first page was empty or failed; nothing was written.
    NoAds,
    Saved { path: PathBuf, total: usize },
}

impl AdScraper {
    pub fn new() -> Self {
        Self::default()
    }

    // -------- Builder methods --------
    pub fn endpoint(mut self, url: impl Into<String>) -> Self { self.opts = self.opts.with_endpoint(url); self }
    pub fn output_dir(mut self, dir: impl AsRef<Path>) -> Self { self.opts = self.opts.with_output_dir(dir); self }
    pub fn timeout(mut self, timeout: Duration) -> Self { self.opts = self.opts.with_timeout(timeout); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn format(mut self, format: ExportFormat) -> Self { self.format = format; self }

    pub fn options(&self) -> &ScraperOptions { &self.opts }

    /// Run the page loop against the configured endpoint.
    /// Page failures end the loop early; only client construction errors surface here.
    pub fn fetch(&self, filters: &FilterSet) -> Result<FetchOutcome> {
        init_tracing_once();
        let source = HttpPageSource::new(&self.opts).context("building HTTP client")?;
        Ok(self.fetch_from(source, filters))
    }

    /// Same loop over any page source.
    pub fn fetch_from<S: PageSource>(&self, source: S, filters: &FilterSet) -> FetchOutcome {
        tracing::info!(
            max_pages = filters.max_pages(),
            keywords = ?filters.keywords(),
            countries = ?filters.countries(),
            industries = ?filters.industries(),
            "fetching ads"
        );
        let progress = PageProgress::new(filters.max_pages(), self.opts.progress);
        Fetcher::new(source).with_progress(progress).fetch_detailed(filters)
    }

    /// Project and write `records` under the output directory. Returns the file path.
    pub fn export(&self, records: &[RawRecord], filters: &FilterSet) -> Result<PathBuf> {
        let table = to_table(records);
        let keywords = filters.keywords().unwrap_or_default();
        let path = output_path(&self.opts.output_dir, keywords, run_timestamp(), self.format)?;
        write_table(&table, &path, self.format).with_context(|| format!("writing {}", path.display()))
    }

    pub fn run(&self, filters: &FilterSet) -> Result<RunReport> {
        init_tracing_once();
        let source = HttpPageSource::new(&self.opts).context("building HTTP client")?;
        self.run_from(source, filters)
    }

    pub fn run_from<S: PageSource>(&self, source: S, filters: &FilterSet) -> Result<RunReport> {
        let outcome = self.fetch_from(source, filters);
        if outcome.records.is_empty() {
            tracing::info!(stop = ?outcome.stop, "no records fetched; nothing to export");
            return Ok(RunReport::NoAds);
        }
        let path = self.export(&outcome.records, filters)?;
        Ok(RunReport::Saved { path, total: outcome.records.len() })
    }
}
