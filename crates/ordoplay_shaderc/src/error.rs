// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors surfaced by the compiler front end.

use ordoplay_shadergraph::ShaderGraphError;
use std::path::PathBuf;
use thiserror::Error;

/// Error raised by a `ordoplay_shaderc` command
#[derive(Debug, Error)]
pub enum ShadercError {
    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A settings file could not be parsed
    #[error("Invalid settings file {}: {message}", path.display())]
    Settings {
        /// Settings file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A settings file was written by a newer version
    #[error("Settings version {found} is newer than supported version {supported}")]
    SettingsVersion {
        /// Version in the file
        found: u32,
        /// Newest supported version
        supported: u32,
    },

    /// The graph file extension is neither RON nor JSON
    #[error("Unsupported graph file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Graph construction, resolution or code generation failed
    #[error(transparent)]
    Graph(#[from] ShaderGraphError),

    /// RON serialization failed
    #[error(transparent)]
    Ron(#[from] ron::Error),

    /// JSON serialization failed
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The file watcher could not be set up
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),
}

impl ShadercError {
    /// Wrap an I/O error with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for front-end commands
pub type Result<T> = std::result::Result<T, ShadercError>;
