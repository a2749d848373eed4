use crate::error::ConfigError;
use crate::query::{normalize_country, split_list};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://ads.tiktok.com/creative_radar_api/v1/popular_trend/list";
pub const DEFAULT_OUTPUT_DIR: &str = "tiktok_ads_data";
pub const DEFAULT_MAX_PAGES: u32 = 5;
pub const DEFAULT_DELAY_RANGE: (f64, f64) = (1.0, 3.0);

/// Query filters and paging limits for one run. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterSet {
    keywords: Option<Vec<String>>,   // ordered, duplicates kept
    countries: Option<Vec<String>>,  // upper-cased, deduped
    industries: Option<Vec<String>>, // deduped
    max_pages: u32,
    delay_range: (f64, f64),         // seconds, min <= max
}

impl FilterSet {
    pub fn builder() -> FilterSetBuilder {
        FilterSetBuilder::default()
    }

    pub fn keywords(&self) -> Option<&[String]> { self.keywords.as_deref() }
    pub fn countries(&self) -> Option<&[String]> { self.countries.as_deref() }
    pub fn industries(&self) -> Option<&[String]> { self.industries.as_deref() }
    pub fn max_pages(&self) -> u32 { self.max_pages }
    pub fn delay_range(&self) -> (f64, f64) { self.delay_range }
}

/// Builder with the interactive tool's defaults: 5 pages, 1-3 s between requests.
#[derive(Clone, Debug)]
pub struct FilterSetBuilder {
    keywords: Vec<String>,
    countries: Vec<String>,
    industries: Vec<String>,
    max_pages: u32,
    delay_range: (f64, f64),
}

impl Default for FilterSetBuilder {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            countries: Vec::new(),
            industries: Vec::new(),
            max_pages: DEFAULT_MAX_PAGES,
            delay_range: DEFAULT_DELAY_RANGE,
        }
    }
}

impl FilterSetBuilder {
    pub fn keywords<I, S>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords = clean(iter);
        self
    }
    pub fn countries<I, S>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.countries = clean(iter).iter().map(|c| normalize_country(c)).collect();
        self
    }
    pub fn industries<I, S>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.industries = clean(iter);
        self
    }
    /// Comma-separated variants, as typed at the prompt or on the command line.
    pub fn keywords_csv(self, s: &str) -> Self { self.keywords(split_list(s)) }
    pub fn countries_csv(self, s: &str) -> Self { self.countries(split_list(s)) }
    pub fn industries_csv(self, s: &str) -> Self { self.industries(split_list(s)) }

    pub fn max_pages(mut self, n: u32) -> Self {
        self.max_pages = n;
        self
    }
    pub fn delay_range(mut self, min_secs: f64, max_secs: f64) -> Self {
        self.delay_range = (min_secs, max_secs);
        self
    }
    /// No pause between pages. Handy for tests and local mirrors.
    pub fn no_delay(self) -> Self { self.delay_range(0.0, 0.0) }

    pub fn build(self) -> Result<FilterSet, ConfigError> {
        if self.max_pages == 0 {
            return Err(ConfigError::InvalidMaxPages(self.max_pages));
        }
        let (min, max) = self.delay_range;
        let representable = |s: f64| Duration::try_from_secs_f64(s).is_ok();
        if !(representable(min) && representable(max)) || min > max {
            return Err(ConfigError::InvalidDelayRange { min, max });
        }
        Ok(FilterSet {
            keywords: non_empty(self.keywords),
            countries: non_empty(dedup_keep_order(self.countries)),
            industries: non_empty(dedup_keep_order(self.industries)),
            max_pages: self.max_pages,
            delay_range: self.delay_range,
        })
    }
}

fn clean<I, S>(iter: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    iter.into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn dedup_keep_order(v: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(v.len());
    for s in v {
        if !out.contains(&s) {
            out.push(s);
        }
    }
    out
}

fn non_empty(v: Vec<String>) -> Option<Vec<String>> {
    if v.is_empty() { None } else { Some(v) }
}

/// Where and how the scraper talks to the endpoint and writes its output.
#[derive(Clone, Debug)]
pub struct ScraperOptions {
    pub endpoint: String,
    pub output_dir: PathBuf,
    pub timeout: Duration,
    pub progress: bool, // show page spinner
}

impl Default for ScraperOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timeout: Duration::from_secs(30),
            progress: true,
        }
    }
}

impl ScraperOptions {
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
}
