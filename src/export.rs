//! Table export: fixed-width `.xlsx` workbook (default) or line-delimited JSON.

use crate::error::ExportError;
use crate::ndjson::NdjsonWriter;
use crate::record::{ExportTable, FIELD_NAMES};
use crate::util::sanitize_file_component;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use time::macros::format_description;
use time::OffsetDateTime;

pub const SHEET_NAME: &str = "Ad Data";
pub const COLUMN_WIDTH: f64 = 20.0;
/// Excel's per-cell text limit, in characters.
pub const MAX_CELL_CHARS: usize = 32_767;
const FILE_PREFIX: &str = "tiktok_ads";

/// Output file format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Jsonl,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Jsonl => "jsonl",
        }
    }
}

/// Local wall-clock time, or UTC when the local offset is unavailable.
pub fn run_timestamp() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

pub fn format_timestamp(ts: OffsetDateTime) -> Result<String, ExportError> {
    Ok(ts.format(format_description!("[year][month][day]_[hour][minute][second]"))?)
}

/// `<dir>/tiktok_ads_<kw1-kw2>_<YYYYMMDD_HHMMSS>.<ext>`
pub fn output_path(
    dir: &Path,
    keywords: &[String],
    ts: OffsetDateTime,
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    let joined = sanitize_file_component(&keywords.join("-"));
    let stamp = format_timestamp(ts)?;
    Ok(dir.join(format!("{FILE_PREFIX}_{joined}_{stamp}.{}", format.extension())))
}

pub fn write_table(table: &ExportTable, path: &Path, format: ExportFormat) -> Result<PathBuf, ExportError> {
    match format {
        ExportFormat::Xlsx => write_spreadsheet(table, path),
        ExportFormat::Jsonl => write_jsonl(table, path),
    }
}

/// Single sheet, header row then one row per record, every column 20 wide.
pub fn write_spreadsheet(table: &ExportTable, path: &Path) -> Result<PathBuf, ExportError> {
    ensure_parent(path)?;

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header = Format::new().set_bold();
    for (col, name) in FIELD_NAMES.iter().enumerate() {
        let col = col as u16;
        sheet.set_column_width(col, COLUMN_WIDTH)?;
        sheet.write_string_with_format(0, col, *name, &header)?;
    }

    for (i, row) in table.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in row.cells().into_iter().enumerate() {
            if let Some(v) = cell {
                write_cell(sheet, r, col as u16, v)?;
            }
        }
    }

    workbook.save(path)?;
    tracing::info!(rows = table.len(), path = %path.display(), "spreadsheet written");
    Ok(path.to_path_buf())
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, v: &Value) -> Result<(), XlsxError> {
    match v {
        Value::Null => {}
        Value::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        Value::Number(n) => match n.as_f64() {
            Some(f) => {
                sheet.write_number(row, col, f)?;
            }
            None => {
                sheet.write_string(row, col, n.to_string())?;
            }
        },
        Value::String(s) => {
            sheet.write_string(row, col, clip_cell_text(s, row, col))?;
        }
        other => {
            let text = other.to_string();
            sheet.write_string(row, col, clip_cell_text(&text, row, col))?;
        }
    }
    Ok(())
}

/// Truncate text that Excel would refuse, so one oversized field cannot sink the file.
fn clip_cell_text(s: &str, row: u32, col: u16) -> &str {
    match s.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => {
            tracing::warn!(
                row,
                column = FIELD_NAMES[usize::from(col)],
                chars = s.chars().count(),
                "cell text exceeds {MAX_CELL_CHARS} characters; truncated"
            );
            &s[..cut]
        }
        None => s,
    }
}

/// One JSON object per row, all twelve keys present.
pub fn write_jsonl(table: &ExportTable, path: &Path) -> Result<PathBuf, ExportError> {
    ensure_parent(path)?;
    let mut w = NdjsonWriter::create(path, 64 * 1024)?;
    for row in table {
        w.write_value(row)?;
    }
    let out = w.finish()?;
    tracing::info!(rows = table.len(), path = %out.display(), "jsonl written");
    Ok(out)
}

fn ensure_parent(path: &Path) -> Result<(), ExportError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .map_err(|source| ExportError::CreateDir { path: dir.to_path_buf(), source }),
        _ => Ok(()),
    }
}
