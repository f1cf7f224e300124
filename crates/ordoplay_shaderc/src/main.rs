// SPDX-License-Identifier: MIT OR Apache-2.0
//! `OrdoPlay` shader graph compiler.
//!
//! Command-line front end for `ordoplay_shadergraph`:
//! - Compile RON or JSON graph descriptions into GLSL ES shader pairs
//! - Watch a graph file and recompile on save
//! - Simulate frames and print the uniform uploads a renderer would make

mod cli;
mod compile;
mod error;
mod settings;
mod watch;

use clap::Parser;
use cli::{Cli, Commands};
use error::Result;
use ordoplay_shadergraph::{FrameContext, NodeTypeId, ShaderGraphMaterial};
use settings::ShadercSettings;
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn load_settings(cli: &Cli) -> Result<ShadercSettings> {
    let mut settings = match &cli.config {
        Some(path) => ShadercSettings::load(path)?,
        None => ShadercSettings::default(),
    };
    cli.apply_overrides(&mut settings);
    Ok(settings)
}

fn simulate(graph_path: &Path, frames: u32, settings: &ShadercSettings) -> Result<()> {
    let mut material = ShaderGraphMaterial::new(compile::load_graph(graph_path)?);
    if material.is_fallback() {
        tracing::warn!("{} uses the fallback program", graph_path.display());
    }
    for frame in 0..frames {
        let context = FrameContext::new(settings.frame_interval() * frame, [0.0, 0.0, 5.0]);
        let uploads = material.pre_draw(&context)?;
        let line = serde_json::json!({
            "frame": frame,
            "time": context.seconds(),
            "uniforms": uploads,
        });
        println!("{}", serde_json::to_string(&line)?);
    }
    Ok(())
}

fn list_nodes() {
    for kind in NodeTypeId::ALL {
        println!("{:<22} {:<9} {}", kind.as_str(), format!("{:?}", kind.category()), kind.name());
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Compile { graph, .. } => {
            let output = compile::compile_file(graph, &load_settings(cli)?)?;
            println!("{}", output.vertex.display());
            println!("{}", output.fragment.display());
            if let Some(bindings) = output.bindings {
                println!("{}", bindings.display());
            }
        }
        Commands::Watch { graph, .. } => watch::run(graph, &load_settings(cli)?)?,
        Commands::Simulate { graph, frames } => simulate(graph, *frames, &load_settings(cli)?)?,
        Commands::Nodes => list_nodes(),
        Commands::InitConfig { path } => {
            ShadercSettings::default().save(path)?;
            tracing::info!("Wrote default settings to {}", path.display());
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ordoplay_shaderc=info,ordoplay_shadergraph=info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Starting ordoplay_shaderc v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
