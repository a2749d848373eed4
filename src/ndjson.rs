use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Minimal NDJSON writer with buffering: one serialized value per line.
pub struct NdjsonWriter {
    path: PathBuf,
    w: BufWriter<File>,
}

impl NdjsonWriter {
    pub fn create(path: &Path, buf_bytes: usize) -> io::Result<Self> {
        let f = File::create(path)?;
        Ok(Self { path: path.to_path_buf(), w: BufWriter::with_capacity(buf_bytes.max(8 * 1024), f) })
    }

    pub fn write_value<T: Serialize>(&mut self, v: &T) -> serde_json::Result<()> {
        serde_json::to_writer(&mut self.w, v)?;
        self.w.write_all(b"\n").map_err(serde_json::Error::io)
    }

    /// Flush and hand back the path written.
    pub fn finish(mut self) -> io::Result<PathBuf> {
        self.w.flush()?;
        Ok(self.path)
    }
}
