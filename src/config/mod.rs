//! Configuration sources: environment, filesystem and structured config files.
//!
//! Everything the crate reads from outside the process goes through the
//! [`Environment`] and [`FileSystem`] traits, so resolution can be driven by
//! in-memory fakes in tests.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fondu_vault_mcp::config::{ConfigFileLoader, LocalFileSystem};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loader = ConfigFileLoader::new(Arc::new(LocalFileSystem));
//! let doc = loader.load(".fondu/config.yaml".as_ref()).await?;
//! if let Some(token) = doc.get_str("fondu.auth_token") {
//!     println!("token configured ({} chars)", token.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod env;
pub mod fs;
pub mod loader;
pub mod memory;
pub mod settings;

pub use env::{Environment, SystemEnvironment};
pub use fs::{FileSystem, LocalFileSystem};
pub use loader::{ConfigDocument, ConfigFileLoader};
pub use memory::{MemoryEnvironment, MemoryFileSystem};
pub use settings::{DEFAULT_BASE_URL, Settings};

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading configuration files
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File exists but its content is not a valid document
    #[error("Failed to parse {}: {message}", path.display())]
    Parse {
        /// The offending file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// File exists but could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// The offending file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Path of the file that caused the error.
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Parse { path, .. } | ConfigError::Io { path, .. } => path,
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
