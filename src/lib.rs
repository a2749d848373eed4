mod config;
mod error;
mod query;
mod record;

mod fetch;
mod progress;
mod util;
mod ndjson;
mod export;
mod pipeline;
mod prompt;

pub use crate::config::{FilterSet, FilterSetBuilder, ScraperOptions, DEFAULT_ENDPOINT, DEFAULT_MAX_PAGES, DEFAULT_OUTPUT_DIR};
pub use crate::error::{ConfigError, ExportError, FetchError};
pub use crate::query::{PageQuery, split_list};
pub use crate::record::{to_table, ExportRow, ExportTable, RawRecord, FIELD_NAMES};

// Fetch loop, transport seam and payload parsing.
pub use crate::fetch::{draw_delay, parse_page, FetchOutcome, Fetcher, HttpPageSource, PageSource, StopReason};

// Export writers and output naming.
pub use crate::export::{output_path, run_timestamp, write_jsonl, write_spreadsheet, write_table, ExportFormat, COLUMN_WIDTH, SHEET_NAME};

pub use crate::pipeline::{AdScraper, RunReport};
pub use crate::progress::PageProgress;
pub use crate::prompt::Prompter;
pub use crate::util::init_tracing_once;

// export NDJSON helper
pub use crate::ndjson::NdjsonWriter;
