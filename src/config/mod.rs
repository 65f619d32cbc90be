//! Configuration module for the ledger
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence
//! - The resolved source/output pair handed to the ledger store

pub mod paths;
pub mod settings;

use std::path::{Path, PathBuf};

pub use paths::LedgerPaths;
pub use settings::Settings;

/// Where a ledger is read from and written to
///
/// Unless an output path is given the ledger is updated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    pub source_path: PathBuf,
    pub output_path: PathBuf,
}

impl LedgerConfig {
    /// Read and write the same file
    pub fn in_place(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            source_path: path.clone(),
            output_path: path,
        }
    }

    /// Read one file, write another
    pub fn new(source_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            output_path: output_path.into(),
        }
    }

    /// Resolve paths: explicit values win over settings, settings over defaults
    pub fn resolve(
        paths: &LedgerPaths,
        settings: &Settings,
        source: Option<&Path>,
        output: Option<&Path>,
    ) -> Self {
        let source_path = source
            .map(Path::to_path_buf)
            .or_else(|| settings.source_path.clone())
            .unwrap_or_else(|| paths.default_ledger_file());

        let output_path = output
            .map(Path::to_path_buf)
            .or_else(|| settings.output_path.clone())
            .unwrap_or_else(|| source_path.clone());

        Self {
            source_path,
            output_path,
        }
    }

    /// Check whether saves go back to the loaded file
    pub fn is_in_place(&self) -> bool {
        self.source_path == self.output_path
    }
}
