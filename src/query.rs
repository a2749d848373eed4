//! Per-page request parameters and list normalization helpers used by the filters.

use crate::config::FilterSet;

pub const PAGE_SIZE: u32 = 20;
pub const PERIOD_DAYS: u32 = 7;
pub const SORT_BY: &str = "trending";

/// Query string for one page of the trend list.
/// Filters are pre-joined; `None` means the key is not sent at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
    pub period: u32,
    pub sort_by: &'static str,
    pub search_keys: Option<String>,
    pub countries: Option<String>,
    pub industries: Option<String>,
}

impl PageQuery {
    pub fn for_page(filters: &FilterSet, page: u32) -> Self {
        Self {
            page,
            limit: PAGE_SIZE,
            period: PERIOD_DAYS,
            sort_by: SORT_BY,
            search_keys: filters.keywords().and_then(join_list),
            countries: filters.countries().and_then(join_list),
            industries: filters.industries().and_then(join_list),
        }
    }

    /// Ordered `(key, value)` pairs ready for URL encoding.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("period", self.period.to_string()),
            ("sort_by", self.sort_by.to_string()),
        ];
        if let Some(v) = &self.search_keys { out.push(("search_keys", v.clone())); }
        if let Some(v) = &self.countries { out.push(("countries", v.clone())); }
        if let Some(v) = &self.industries { out.push(("industries", v.clone())); }
        out
    }
}

/// Comma-join; empty input yields `None` so the key is omitted.
pub fn join_list(items: &[String]) -> Option<String> {
    if items.is_empty() { None } else { Some(items.join(",")) }
}

/// Split a comma-separated entry, trimming and dropping blanks.
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[inline]
pub fn normalize_country(s: &str) -> String {
    s.trim().to_uppercase()
}
