// SPDX-License-Identifier: MIT OR Apache-2.0
//! Recompiling a graph file when it changes on disk.
//!
//! The watcher observes the graph's parent directory rather than the file
//! itself, since most editors save by replacing the file.

use crate::compile::compile_file;
use crate::error::Result;
use crate::settings::ShadercSettings;
use notify_debouncer_full::{
    new_debouncer,
    notify::{Event, EventKind, RecommendedWatcher, RecursiveMode},
    DebounceEventResult, Debouncer, RecommendedCache,
};
use std::ffi::OsString;
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

/// Events reported by a [`GraphWatcher`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// The graph file was written
    Changed,
    /// The watcher reported an error
    Error(String),
}

/// Whether an event touches the watched file
fn touches(event: &Event, file_name: &OsString) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event
            .paths
            .iter()
            .any(|path| path.file_name() == Some(file_name.as_os_str()))
}

/// Debounced watcher for a single graph file
pub struct GraphWatcher {
    _watcher: Debouncer<RecommendedWatcher, RecommendedCache>,
    event_rx: Receiver<WatchEvent>,
}

impl GraphWatcher {
    /// Start watching a graph file
    pub fn new(graph_path: &Path, debounce: Duration) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();
        let file_name = graph_path.file_name().map(OsString::from).unwrap_or_default();

        let mut watcher = new_debouncer(debounce, None, move |result: DebounceEventResult| match result {
            Ok(events) => {
                if events.iter().any(|event| touches(event, &file_name)) {
                    let _ = event_tx.send(WatchEvent::Changed);
                }
            }
            Err(errors) => {
                for error in errors {
                    let _ = event_tx.send(WatchEvent::Error(error.to_string()));
                }
            }
        })?;

        let dir = graph_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        tracing::info!("Watching {} for changes", graph_path.display());

        Ok(Self {
            _watcher: watcher,
            event_rx,
        })
    }

    /// Block until the next event; `None` once the watcher has shut down
    pub fn recv(&self) -> Option<WatchEvent> {
        self.event_rx.recv().ok()
    }
}

fn recompile(graph_path: &Path, settings: &ShadercSettings) {
    if let Err(err) = compile_file(graph_path, settings) {
        tracing::error!("Failed to compile {}, keeping previous output: {}", graph_path.display(), err);
    }
}

/// Compile once, then recompile on every change until interrupted
pub fn run(graph_path: &Path, settings: &ShadercSettings) -> Result<()> {
    recompile(graph_path, settings);
    let watcher = GraphWatcher::new(graph_path, settings.watch_debounce())?;
    while let Some(event) = watcher.recv() {
        match event {
            WatchEvent::Changed => recompile(graph_path, settings),
            WatchEvent::Error(message) => tracing::warn!("File watcher error: {}", message),
        }
    }
    tracing::warn!("File watcher channel disconnected");
    Ok(())
}
