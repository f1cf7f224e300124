// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command-line interface.

use crate::settings::{ShadercSettings, SETTINGS_FILE_NAME};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "ordoplay_shaderc")]
#[command(version)]
#[command(about = "OrdoPlay shader graph compiler", long_about = None)]
pub struct Cli {
    /// Settings file (RON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compile a graph file into vertex and fragment shaders
    Compile {
        /// Graph file (.ron or .json)
        graph: PathBuf,
        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Skip the uniform binding manifest
        #[arg(long)]
        no_bindings: bool,
    },

    /// Recompile a graph file whenever it changes
    Watch {
        /// Graph file (.ron or .json)
        graph: PathBuf,
        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a few frames and print the uniform uploads
    Simulate {
        /// Graph file (.ron or .json)
        graph: PathBuf,
        /// Number of frames
        #[arg(short, long, default_value = "3")]
        frames: u32,
    },

    /// List the available node types
    Nodes,

    /// Write a settings file with default values
    InitConfig {
        /// Output file
        #[arg(default_value = SETTINGS_FILE_NAME)]
        path: PathBuf,
    },
}

impl Cli {
    /// Apply per-command overrides on top of loaded settings
    pub fn apply_overrides(&self, settings: &mut ShadercSettings) {
        match &self.command {
            Commands::Compile {
                output, no_bindings, ..
            } => {
                if let Some(output) = output {
                    settings.output_dir.clone_from(output);
                }
                if *no_bindings {
                    settings.write_bindings = false;
                }
            }
            Commands::Watch { output: Some(output), .. } => settings.output_dir.clone_from(output),
            _ => {}
        }
    }
}
