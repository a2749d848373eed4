//! Paginated fetch loop over the trend-list endpoint.
//!
//! Pages are requested strictly in order. The loop stops at the first empty
//! page, after `max_pages` requests, or at the first failed page; whatever was
//! gathered up to that point is returned. There is no retry.

use crate::config::{FilterSet, ScraperOptions};
use crate::error::FetchError;
use crate::progress::PageProgress;
use crate::query::PageQuery;
use crate::record::RawRecord;
use rand::Rng;
use reqwest::blocking::{Client, Request};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER};
use serde_json::Value;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const ORIGIN_URL: &str = "https://ads.tiktok.com";
const REFERER_URL: &str = "https://ads.tiktok.com/business/creativecenter/inspiration/popular/pc/en";

/// Anything that can answer a page query with a list of records.
/// An empty list means the listing is exhausted.
pub trait PageSource {
    fn fetch_page(&mut self, query: &PageQuery) -> Result<Vec<RawRecord>, FetchError>;
}

impl<S: PageSource + ?Sized> PageSource for &mut S {
    fn fetch_page(&mut self, query: &PageQuery) -> Result<Vec<RawRecord>, FetchError> {
        (**self).fetch_page(query)
    }
}

/// HTTP page source. Owns the one client (connection pool + default headers)
/// used for every page of a run.
pub struct HttpPageSource {
    client: Client,
    endpoint: String,
}

impl HttpPageSource {
    pub fn new(opts: &ScraperOptions) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(default_headers())
            .timeout(opts.timeout)
            .build()?;
        Ok(Self { client, endpoint: opts.endpoint.clone() })
    }

    /// The GET request for one page, without sending it.
    pub fn build_request(&self, query: &PageQuery) -> Result<Request, FetchError> {
        Ok(self.client.get(&self.endpoint).query(&query.params()).build()?)
    }
}

fn default_headers() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
    h.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    h.insert(ORIGIN, HeaderValue::from_static(ORIGIN_URL));
    h.insert(REFERER, HeaderValue::from_static(REFERER_URL));
    h
}

impl PageSource for HttpPageSource {
    fn fetch_page(&mut self, query: &PageQuery) -> Result<Vec<RawRecord>, FetchError> {
        let req = self.build_request(query)?;
        tracing::debug!(url = %req.url(), "GET page {}", query.page);
        let resp = self.client.execute(req)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16() });
        }
        let body = resp.bytes()?;
        parse_page(&body)
    }
}

/// Interpret a response body shaped `{ "data": { "list": [ {...}, ... ] } }`.
///
/// A missing or null `data`/`data.list` is an empty page. A `list` that is not
/// an array of objects is a payload error.
pub fn parse_page(body: &[u8]) -> Result<Vec<RawRecord>, FetchError> {
    let mut doc: Value = serde_json::from_slice(body)?;
    let list = match doc.pointer_mut("/data/list").map(Value::take) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(FetchError::Payload(format!("data.list is {}, expected an array", json_kind(&other))))
        }
    };
    list.into_iter()
        .enumerate()
        .map(|(i, item)| {
            RawRecord::try_from(item).map_err(|other| {
                FetchError::Payload(format!("data.list[{i}] is {}, expected an object", json_kind(&other)))
            })
        })
        .collect()
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Why the page loop ended.
#[derive(Debug)]
pub enum StopReason {
    /// `max_pages` pages were fetched, all non-empty.
    PageLimit,
    /// `page` came back empty.
    Exhausted { page: u32 },
    /// `page` failed; earlier pages are kept.
    Failed { page: u32, error: FetchError },
}

impl StopReason {
    /// True for the two clean endings.
    pub fn is_clean(&self) -> bool {
        !matches!(self, StopReason::Failed { .. })
    }
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub records: Vec<RawRecord>,
    pub requests: u32,
    pub stop: StopReason,
}

/// Uniform draw from `(min, max)` seconds. Unrepresentable ranges yield no pause.
pub fn draw_delay<R: Rng + ?Sized>(range: (f64, f64), rng: &mut R) -> Duration {
    let (min, max) = range;
    let secs = if max > min && (max - min).is_finite() { rng.gen_range(min..=max) } else { min };
    Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::ZERO)
}

pub struct Fetcher<S> {
    source: S,
    progress: PageProgress,
}

impl<S: PageSource> Fetcher<S> {
    pub fn new(source: S) -> Self {
        Self { source, progress: PageProgress::hidden() }
    }

    pub fn with_progress(mut self, progress: PageProgress) -> Self {
        self.progress = progress;
        self
    }

    /// All records gathered before the loop stopped, in arrival order.
    pub fn fetch(&mut self, filters: &FilterSet) -> Vec<RawRecord> {
        self.fetch_detailed(filters).records
    }

    pub fn fetch_detailed(&mut self, filters: &FilterSet) -> FetchOutcome {
        let mut records: Vec<RawRecord> = Vec::new();
        let mut requests = 0u32;
        let mut rng = rand::thread_rng();
        let mut page = 1u32;

        let stop = loop {
            if page > filters.max_pages() {
                break StopReason::PageLimit;
            }
            let query = PageQuery::for_page(filters, page);
            requests += 1;
            match self.source.fetch_page(&query) {
                Ok(batch) if batch.is_empty() => {
                    tracing::info!(page, "empty page; listing exhausted");
                    break StopReason::Exhausted { page };
                }
                Ok(batch) => {
                    tracing::debug!(page, count = batch.len(), "page received");
                    records.extend(batch);
                    self.progress.page_done(records.len());
                }
                Err(error) => {
                    tracing::warn!("Error fetching page {page}: {error}");
                    break StopReason::Failed { page, error };
                }
            }

            if page < filters.max_pages() {
                let pause = draw_delay(filters.delay_range(), &mut rng);
                if !pause.is_zero() {
                    std::thread::sleep(pause);
                }
            }
            page += 1;
        };

        self.progress.finish(records.len());
        tracing::info!(requests, total = records.len(), ?stop, "fetch finished");
        FetchOutcome { records, requests, stop }
    }

    pub fn into_source(self) -> S {
        self.source
    }
}
