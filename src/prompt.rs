//! Interactive filter entry for terminal runs.

use crate::config::{FilterSetBuilder, DEFAULT_MAX_PAGES};
use crate::query::split_list;
use anyhow::{bail, Result};
use std::io::{BufRead, Write};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question`, read one line. `None` on end of input.
    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask for keywords, countries, industries and page count, in that order,
    /// and apply the answers to `base`.
    pub fn collect(mut self, base: FilterSetBuilder) -> Result<FilterSetBuilder> {
        writeln!(self.output, "TikTok Ad Library Scraper")?;
        writeln!(self.output, "{}", "-".repeat(30))?;

        let keywords = loop {
            match self.ask("Enter keywords (comma-separated): ")? {
                None => bail!("at least one keyword is required"),
                Some(s) => {
                    let kws = split_list(&s);
                    if !kws.is_empty() {
                        break kws;
                    }
                    writeln!(self.output, "Please enter at least one keyword.")?;
                }
            }
        };

        let countries = self
            .ask("Enter country codes (comma-separated) or press Enter for all: ")?
            .unwrap_or_default();
        let industries = self
            .ask("Enter industries (comma-separated) or press Enter for all: ")?
            .unwrap_or_default();

        let max_pages = loop {
            let q = format!("Enter maximum number of pages to fetch (default {DEFAULT_MAX_PAGES}): ");
            match self.ask(&q)? {
                None => break DEFAULT_MAX_PAGES,
                Some(s) if s.is_empty() => break DEFAULT_MAX_PAGES,
                Some(s) => match s.parse::<u32>() {
                    Ok(n) if n >= 1 => break n,
                    _ => writeln!(self.output, "Please enter a whole number of at least 1.")?,
                },
            }
        };

        Ok(base
            .keywords(keywords)
            .countries_csv(&countries)
            .industries_csv(&industries)
            .max_pages(max_pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterSet;
    use std::io::Cursor;

    fn run(input: &str) -> (Result<FilterSetBuilder>, String) {
        let mut out = Vec::new();
        let res = Prompter::new(Cursor::new(input.as_bytes()), &mut out).collect(FilterSet::builder());
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn collects_all_answers() {
        let (res, _) = run("shoes, bags\nus,gb\nApparel\n3\n");
        let f = res.unwrap().build().unwrap();
        assert_eq!(f.keywords().unwrap(), ["shoes", "bags"]);
        assert_eq!(f.countries().unwrap(), ["US", "GB"]);
        assert_eq!(f.industries().unwrap(), ["Apparel"]);
        assert_eq!(f.max_pages(), 3);
    }

    #[test]
    fn blank_optionals_and_default_pages() {
        let (res, _) = run("shoes\n\n\n\n");
        let f = res.unwrap().build().unwrap();
        assert!(f.countries().is_none());
        assert!(f.industries().is_none());
        assert_eq!(f.max_pages(), 5);
    }

    #[test]
    fn reprompts_for_keywords_and_bad_page_count() {
        let (res, out) = run(" , \nshoes\n\n\nabc\n0\n7\n");
        let f = res.unwrap().build().unwrap();
        assert_eq!(f.keywords().unwrap(), ["shoes"]);
        assert_eq!(f.max_pages(), 7);
        assert_eq!(out.matches("Please enter at least one keyword.").count(), 1);
        assert_eq!(out.matches("Please enter a whole number").count(), 2);
    }

    #[test]
    fn missing_keywords_at_eof_is_an_error() {
        let (res, _) = run("");
        assert!(res.is_err());
    }
}
