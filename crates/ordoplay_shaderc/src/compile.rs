// SPDX-License-Identifier: MIT OR Apache-2.0
//! Loading graph descriptions and writing compiled programs.

use crate::error::{Result, ShadercError};
use crate::settings::{OutputPaths, ShadercSettings};
use ordoplay_shadergraph::{Graph, GraphDescriptor, ProgramSource, ShaderGraphError, UniformBinding, UniformBindingRecord};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Graph description file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    /// Rusty Object Notation
    Ron,
    /// JSON
    Json,
}

impl GraphFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("ron") => Ok(Self::Ron),
            Some("json") => Ok(Self::Json),
            _ => Err(ShadercError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Read and parse a graph description
pub fn load_descriptor(path: &Path) -> Result<GraphDescriptor> {
    let format = GraphFormat::from_path(path)?;
    let text = std::fs::read_to_string(path).map_err(|e| ShadercError::io(path, e))?;
    let descriptor = match format {
        GraphFormat::Ron => GraphDescriptor::from_ron(&text),
        GraphFormat::Json => GraphDescriptor::from_json(&text),
    }
    .map_err(ShaderGraphError::from)?;
    Ok(descriptor)
}

/// Read, parse and build a graph
pub fn load_graph(path: &Path) -> Result<Graph> {
    Ok(load_descriptor(path)?.build()?)
}

/// Uniforms the renderer binds for a compiled program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingManifest {
    /// Graph name
    pub graph: String,
    /// Whether the program reads the UV attribute
    pub uses_uv: bool,
    /// Uniforms in upload order
    pub uniforms: Vec<UniformBindingRecord>,
}

impl BindingManifest {
    /// Manifest for a graph and the program compiled from it
    pub fn new(graph: &Graph, program: &ProgramSource) -> Result<Self> {
        Ok(Self {
            graph: graph.name.clone(),
            uses_uv: program.uses_uv,
            uniforms: graph
                .uniform_bindings()?
                .iter()
                .map(UniformBinding::to_record)
                .collect(),
        })
    }
}

/// Files written by one compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutput {
    /// Vertex shader
    pub vertex: PathBuf,
    /// Fragment shader
    pub fragment: PathBuf,
    /// Binding manifest, when enabled
    pub bindings: Option<PathBuf>,
}

fn write(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| ShadercError::io(path, e))
}

/// Compile a graph file into shader files.
///
/// Nothing is written unless the whole compilation succeeds, so a broken
/// edit leaves the previous outputs in place.
pub fn compile_file(graph_path: &Path, settings: &ShadercSettings) -> Result<CompileOutput> {
    let graph = load_graph(graph_path)?;
    let program = ProgramSource::compile(&graph)?;
    let manifest = if settings.write_bindings {
        let manifest = BindingManifest::new(&graph, &program)?;
        Some(ron::ser::to_string_pretty(&manifest, ron::ser::PrettyConfig::default())?)
    } else {
        None
    };

    let OutputPaths {
        vertex,
        fragment,
        bindings,
    } = settings.output_paths(graph_path);
    std::fs::create_dir_all(&settings.output_dir).map_err(|e| ShadercError::io(&settings.output_dir, e))?;
    write(&vertex, &program.vertex)?;
    write(&fragment, &program.fragment)?;
    let bindings = match manifest {
        Some(manifest) => {
            write(&bindings, &manifest)?;
            Some(bindings)
        }
        None => None,
    };

    tracing::info!(
        "Compiled {} -> {}, {}",
        graph_path.display(),
        vertex.display(),
        fragment.display()
    );
    Ok(CompileOutput {
        vertex,
        fragment,
        bindings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINT: &str = r#"{
        "name": "tint",
        "nodes": [
            {"id": "time", "type_id": "input_time"},
            {"id": "out", "type_id": "output_color"}
        ],
        "wires": [
            {"source_node": "time", "source_socket": 0, "sink_node": "out", "sink_socket": 0}
        ]
    }"#;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ordoplay_shaderc_{}_{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(GraphFormat::from_path(Path::new("a.ron")).unwrap(), GraphFormat::Ron);
        assert_eq!(GraphFormat::from_path(Path::new("a.JSON")).unwrap(), GraphFormat::Json);
        assert!(matches!(
            GraphFormat::from_path(Path::new("a.toml")),
            Err(ShadercError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_compile_writes_outputs() {
        let dir = scratch_dir("compile");
        let graph_path = dir.join("tint.json");
        std::fs::write(&graph_path, TINT).unwrap();
        let settings = ShadercSettings {
            output_dir: dir.join("out"),
            ..ShadercSettings::default()
        };

        let output = compile_file(&graph_path, &settings).unwrap();
        let fragment = std::fs::read_to_string(&output.fragment).unwrap();
        assert!(fragment.contains("uniform float utime_0_float;"));
        let manifest: BindingManifest =
            ron::from_str(&std::fs::read_to_string(output.bindings.as_ref().unwrap()).unwrap()).unwrap();
        assert_eq!(manifest.uniforms.len(), 1);
        assert_eq!(manifest.uniforms[0].name, "utime_0_float");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_failed_compile_keeps_previous_output() {
        let dir = scratch_dir("keep");
        let graph_path = dir.join("tint.json");
        std::fs::write(&graph_path, TINT).unwrap();
        let settings = ShadercSettings {
            output_dir: dir.clone(),
            write_bindings: false,
            ..ShadercSettings::default()
        };
        let output = compile_file(&graph_path, &settings).unwrap();
        assert_eq!(output.bindings, None);
        let before = std::fs::read_to_string(&output.fragment).unwrap();

        // Two outputs cannot resolve
        std::fs::write(
            &graph_path,
            r#"{"nodes": [{"id": "a", "type_id": "output_color"}, {"id": "b", "type_id": "output_color"}]}"#,
        )
        .unwrap();
        assert!(matches!(compile_file(&graph_path, &settings), Err(ShadercError::Graph(_))));
        assert_eq!(std::fs::read_to_string(&output.fragment).unwrap(), before);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_output_node_is_an_error() {
        let dir = scratch_dir("no_output");
        let graph_path = dir.join("empty.ron");
        std::fs::write(&graph_path, "(name: \"empty\", nodes: [(type_id: input_time)])").unwrap();
        assert!(compile_file(&graph_path, &ShadercSettings::default()).is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
