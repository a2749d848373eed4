#![allow(dead_code)]

use adlib_export::{FetchError, PageQuery, PageSource, RawRecord};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// `n` fake ads numbered from `start`: title `ad-<i>`, likes `<i>`.
pub fn ads_json(start: usize, n: usize) -> Vec<Value> {
    (start..start + n)
        .map(|i| json!({
            "title": format!("ad-{i}"),
            "likes": i,
            "ad_id": format!("id{i}"),
        }))
        .collect()
}

pub fn ads(start: usize, n: usize) -> Vec<RawRecord> {
    ads_json(start, n)
        .into_iter()
        .map(|v| RawRecord::try_from(v).unwrap())
        .collect()
}

/// Response body shaped like the trend-list endpoint.
pub fn page_body(start: usize, n: usize) -> Value {
    json!({ "code": 0, "msg": "OK", "data": { "list": ads_json(start, n) } })
}

/// Page source that replays a fixed script and records every query it sees.
/// Once the script runs out it answers with empty pages.
pub struct ScriptedSource {
    script: VecDeque<Result<Vec<RawRecord>, FetchError>>,
    pub queries: Vec<PageQuery>,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<Vec<RawRecord>, FetchError>>) -> Self {
        Self { script: script.into(), queries: Vec::new() }
    }

    /// Consecutive pages of the given sizes, numbered continuously.
    pub fn pages(sizes: &[usize]) -> Self {
        let mut start = 0;
        let script = sizes
            .iter()
            .map(|&n| {
                let page = ads(start, n);
                start += n;
                Ok(page)
            })
            .collect();
        Self::new(script)
    }

    pub fn pages_requested(&self) -> Vec<u32> {
        self.queries.iter().map(|q| q.page).collect()
    }
}

impl PageSource for ScriptedSource {
    fn fetch_page(&mut self, query: &PageQuery) -> Result<Vec<RawRecord>, FetchError> {
        self.queries.push(query.clone());
        self.script.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub fn titles(records: &[RawRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.field("title").and_then(|v| v.as_str()).unwrap_or_default().to_string())
        .collect()
}

pub fn expected_titles(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("ad-{i}")).collect()
}

fn read_zip_entry(path: &Path, name: &str) -> String {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut s = String::new();
    archive.by_name(name).unwrap().read_to_string(&mut s).unwrap();
    s
}

/// Number of `<row>` elements in the first worksheet of an `.xlsx` file.
pub fn xlsx_row_count(path: &Path) -> usize {
    xlsx_sheet_xml(path).matches("<row ").count()
}

/// Shared strings of an `.xlsx` file in table order (first-write order).
pub fn xlsx_shared_strings(path: &Path) -> Vec<String> {
    let xml = read_zip_entry(path, "xl/sharedStrings.xml");
    xml.split("<t>")
        .skip(1)
        .filter_map(|chunk| chunk.split("</t>").next())
        .map(str::to_string)
        .collect()
}

pub fn xlsx_workbook_xml(path: &Path) -> String {
    read_zip_entry(path, "xl/workbook.xml")
}

pub fn xlsx_sheet_xml(path: &Path) -> String {
    read_zip_entry(path, "xl/worksheets/sheet1.xml")
}
