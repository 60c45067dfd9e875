//! JSON run configuration.

use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::LayoutOptions;

/// Settings for a batch run over a PDF.
///
/// ```json
/// {
///     "pdf_path": "~/books/biology.pdf",
///     "markdown_workspace": "~/notes",
///     "page_start": 40,
///     "page_end": 52
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// PDF to read
    pub pdf_path: PathBuf,

    /// Root directory for generated notes
    pub markdown_workspace: PathBuf,

    /// First page to process (1-indexed, inclusive)
    pub page_start: u32,

    /// Page to stop at (1-indexed, exclusive)
    pub page_end: u32,

    /// Layout tuning
    #[serde(default)]
    pub layout: LayoutOptions,
}

impl Config {
    /// Load a configuration file, expanding `~` in paths.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&data)
    }

    /// Parse a configuration from JSON, expanding `~` in paths.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Config = serde_json::from_str(json)?;
        config.pdf_path = expand_home(&config.pdf_path);
        config.markdown_workspace = expand_home(&config.markdown_workspace);
        config.validate()?;
        Ok(config)
    }

    /// Check the page range.
    pub fn validate(&self) -> Result<()> {
        if self.page_start == 0 {
            return Err(Error::Config("page_start is 1-indexed and must be at least 1".to_string()));
        }
        if self.page_end < self.page_start {
            return Err(Error::Config(format!(
                "page_end ({}) is before page_start ({})",
                self.page_end, self.page_start
            )));
        }
        Ok(())
    }

    /// 1-indexed page numbers to process.
    pub fn pages(&self) -> Range<u32> {
        self.page_start..self.page_end
    }
}

/// Replace a leading `~` with the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(rest),
        None => path.to_path_buf(),
    }
}
