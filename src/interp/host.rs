//! Side effects the interpreter needs from its embedder
//!
//! `print` output and `load` file reads go through [`Host`], so the same
//! evaluator runs against the real terminal and filesystem or against an
//! in-memory capture.

use std::collections::HashMap;
use std::io::{self, Write};

/// Capabilities used by `print` and `load`
pub trait Host {
    /// Emit one line of `print` output
    fn print(&mut self, text: &str) -> io::Result<()>;

    /// Read the full program text behind `path`
    fn load(&mut self, path: &str) -> io::Result<String>;
}

/// Prints to stdout and loads from the filesystem
#[derive(Debug, Default)]
pub struct StdHost;

impl Host for StdHost {
    fn print(&mut self, text: &str) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{}", text)
    }

    fn load(&mut self, path: &str) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Records printed lines and serves files from memory
#[derive(Debug, Default)]
pub struct CaptureHost {
    output: Vec<String>,
    files: HashMap<String, String>,
}

impl CaptureHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `source` loadable under `path`
    pub fn with_file(mut self, path: impl Into<String>, source: impl Into<String>) -> Self {
        self.files.insert(path.into(), source.into());
        self
    }

    /// Get captured output
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Clear output buffer
    pub fn clear_output(&mut self) {
        self.output.clear();
    }
}

impl Host for CaptureHost {
    fn print(&mut self, text: &str) -> io::Result<()> {
        self.output.push(text.to_string());
        Ok(())
    }

    fn load(&mut self, path: &str) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
    }
}
