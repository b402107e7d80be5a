//! In-memory environment and filesystem.
//!
//! Useful for testing and for embedding the resolver where credentials come
//! from code rather than the host.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::env::Environment;
use super::fs::FileSystem;

/// In-memory environment variables
#[derive(Debug, Clone, Default)]
pub struct MemoryEnvironment {
    vars: HashMap<String, String>,
}

impl MemoryEnvironment {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable (builder pattern)
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl Environment for MemoryEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

#[derive(Debug, Clone)]
enum Entry {
    Text(String),
    Unreadable(io::ErrorKind),
}

/// In-memory filesystem that records every read it serves.
///
/// Clones share the same read log, so a test can hand one clone to the
/// resolver and inspect [`reads`](Self::reads) on the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: HashMap<PathBuf, Entry>,
    reads: Arc<Mutex<Vec<PathBuf>>>,
}

impl MemoryFileSystem {
    /// Create an empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file (builder pattern)
    pub fn file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), Entry::Text(content.into()));
        self
    }

    /// Add a path that exists but fails to read with `kind`
    pub fn unreadable(mut self, path: impl Into<PathBuf>, kind: io::ErrorKind) -> Self {
        self.files.insert(path.into(), Entry::Unreadable(kind));
        self
    }

    /// Paths read so far, in order
    pub fn reads(&self) -> Vec<PathBuf> {
        self.reads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Whether `path` has been read
    pub fn was_read(&self, path: impl AsRef<Path>) -> bool {
        self.reads().iter().any(|p| p == path.as_ref())
    }
}

#[async_trait]
impl FileSystem for MemoryFileSystem {
    async fn read_to_string(&self, path: &Path) -> io::Result<Option<String>> {
        self.reads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(path.to_path_buf());

        match self.files.get(path) {
            Some(Entry::Text(content)) => Ok(Some(content.clone())),
            Some(Entry::Unreadable(kind)) => Err(io::Error::new(*kind, "simulated read failure")),
            None => Ok(None),
        }
    }
}
