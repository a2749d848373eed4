//! Progress reporting for the page loop: an `indicatif` spinner when enabled,
//! plain stdout lines otherwise.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}  pages: {pos}/{len}  elapsed: {elapsed_precise}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
}

/// Reports "Collected N ads..." after every successful page.
pub struct PageProgress {
    pb: Option<ProgressBar>,
}

impl PageProgress {
    pub fn new(max_pages: u32, enabled: bool) -> Self {
        let pb = enabled.then(|| {
            let pb = ProgressBar::new(u64::from(max_pages));
            pb.set_style(spinner_style());
            pb.set_message("Fetching ads");
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        Self { pb }
    }

    /// Silent reporter, for library callers that do their own output.
    pub fn hidden() -> Self {
        Self { pb: Some(ProgressBar::hidden()) }
    }

    pub fn page_done(&self, total_records: usize) {
        let line = format!("Collected {total_records} ads...");
        match &self.pb {
            Some(pb) => {
                pb.inc(1);
                pb.set_message(line);
            }
            None => println!("{line}"),
        }
    }

    pub fn finish(&self, total_records: usize) {
        if let Some(pb) = &self.pb {
            pb.finish_with_message(format!("Collected {total_records} ads"));
        }
    }
}
