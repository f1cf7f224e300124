// SPDX-License-Identifier: MIT OR Apache-2.0
//! Compiler settings.
//!
//! Settings live in an optional RON file passed with `--config`; anything
//! not in the file keeps its default, and command-line flags win over both.

use crate::error::{Result, ShadercError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Current settings format version
pub const SETTINGS_FORMAT_VERSION: u32 = 1;

/// Default settings file name
pub const SETTINGS_FILE_NAME: &str = "shaderc.ron";

/// Compiler front-end settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadercSettings {
    /// Format version
    pub version: u32,
    /// Directory compiled shaders are written to
    pub output_dir: PathBuf,
    /// Extension of the vertex shader file
    pub vertex_extension: String,
    /// Extension of the fragment shader file
    pub fragment_extension: String,
    /// Write a uniform binding manifest next to the shaders
    pub write_bindings: bool,
    /// Quiet period before a changed graph is recompiled
    pub watch_debounce_ms: u64,
    /// Time step between simulated frames
    pub frame_interval_ms: u64,
}

impl Default for ShadercSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_FORMAT_VERSION,
            output_dir: PathBuf::from("."),
            vertex_extension: "vert".to_string(),
            fragment_extension: "frag".to_string(),
            write_bindings: true,
            watch_debounce_ms: 250,
            frame_interval_ms: 16,
        }
    }
}

/// Files produced for one graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Vertex shader
    pub vertex: PathBuf,
    /// Fragment shader
    pub fragment: PathBuf,
    /// Uniform binding manifest
    pub bindings: PathBuf,
}

impl ShadercSettings {
    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ShadercError::io(path, e))?;
        let settings: ShadercSettings = ron::from_str(&content).map_err(|e| ShadercError::Settings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if settings.version > SETTINGS_FORMAT_VERSION {
            return Err(ShadercError::SettingsVersion {
                found: settings.version,
                supported: SETTINGS_FORMAT_VERSION,
            });
        }

        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let config = ron::ser::PrettyConfig::default().struct_names(true);
        let content = ron::ser::to_string_pretty(self, config)?;
        std::fs::write(path, content).map_err(|e| ShadercError::io(path, e))
    }

    /// Debounce interval for the watcher
    pub fn watch_debounce(&self) -> Duration {
        Duration::from_millis(self.watch_debounce_ms)
    }

    /// Time step for simulated frames
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Output files for a graph file, named after its stem
    pub fn output_paths(&self, graph_path: &Path) -> OutputPaths {
        let stem = graph_path
            .file_stem()
            .map_or_else(|| "graph".into(), |s| s.to_string_lossy());
        OutputPaths {
            vertex: self.output_dir.join(format!("{stem}.{}", self.vertex_extension)),
            fragment: self.output_dir.join(format!("{stem}.{}", self.fragment_extension)),
            bindings: self.output_dir.join(format!("{stem}.bindings.ron")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ordoplay_shaderc_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_default_settings() {
        let settings = ShadercSettings::default();
        assert_eq!(settings.version, SETTINGS_FORMAT_VERSION);
        assert!(settings.write_bindings);
        assert_eq!(settings.watch_debounce(), Duration::from_millis(250));
    }

    #[test]
    fn test_serialization() {
        let mut settings = ShadercSettings::default();
        settings.output_dir = PathBuf::from("build/shaders");
        let path = scratch_file("roundtrip.ron");
        settings.save(&path).unwrap();
        let loaded = ShadercSettings::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: ShadercSettings = ron::from_str("(fragment_extension: \"fs\")").unwrap();
        assert_eq!(settings.fragment_extension, "fs");
        assert_eq!(settings.vertex_extension, "vert");
    }

    #[test]
    fn test_newer_version_rejected() {
        let path = scratch_file("future.ron");
        std::fs::write(&path, "(version: 99)").unwrap();
        let result = ShadercSettings::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            result,
            Err(ShadercError::SettingsVersion { found: 99, supported: SETTINGS_FORMAT_VERSION })
        ));
    }

    #[test]
    fn test_output_paths_follow_stem() {
        let settings = ShadercSettings {
            output_dir: PathBuf::from("out"),
            ..ShadercSettings::default()
        };
        let paths = settings.output_paths(Path::new("graphs/pulse.ron"));
        assert_eq!(paths.vertex, Path::new("out/pulse.vert"));
        assert_eq!(paths.fragment, Path::new("out/pulse.frag"));
        assert_eq!(paths.bindings, Path::new("out/pulse.bindings.ron"));
    }
}
