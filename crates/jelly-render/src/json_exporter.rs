//! JSON frame exporter.
//!
//! Buffers every submitted frame and writes the whole animation as one JSON
//! document on `finalize()`. Vectors are flattened to `[x0, y0, z0, x1, ...]`.

use std::path::PathBuf;

use serde::Serialize;

use jelly_math::Vec3;
use jelly_types::{JellyError, JellyResult};

use crate::renderer::{RenderFrame, RenderTopology, Renderer};

#[derive(Serialize)]
struct FrameData {
    timestep: u32,
    positions: Vec<f32>,
    normals: Vec<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    lattice: Vec<f32>,
}

#[derive(Serialize)]
struct AnimationData<'a> {
    vertex_count: usize,
    triangle_count: usize,
    indices: &'a [u32],
    lines: &'a [u32],
    frames: &'a [FrameData],
}

fn flatten(vectors: &[Vec3]) -> Vec<f32> {
    vectors.iter().flat_map(|v| v.to_array()).collect()
}

/// Writes all frames of a run to a JSON file.
///
/// ```text
/// let mut exporter = JsonFrameExporter::new("frames.json");
/// exporter.init(&topology)?;
/// // submit_frame() once per step
/// exporter.finalize()?;
/// ```
pub struct JsonFrameExporter {
    output_path: PathBuf,
    topology: RenderTopology,
    frames: Vec<FrameData>,
}

impl JsonFrameExporter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            topology: RenderTopology::default(),
            frames: Vec::new(),
        }
    }

    /// Serializes the buffered animation without writing it.
    pub fn to_json(&self) -> JellyResult<String> {
        let data = AnimationData {
            vertex_count: self.topology.vertex_count,
            triangle_count: self.topology.triangles.len() / 3,
            indices: &self.topology.triangles,
            lines: &self.topology.lines,
            frames: &self.frames,
        };
        serde_json::to_string(&data)
            .map_err(|e| JellyError::Serialization(format!("JSON serialization failed: {e}")))
    }
}

impl Renderer for JsonFrameExporter {
    fn init(&mut self, topology: &RenderTopology) -> JellyResult<()> {
        self.topology = topology.clone();
        self.frames.clear();
        Ok(())
    }

    fn submit_frame(&mut self, frame: &RenderFrame) -> JellyResult<()> {
        frame.check(&self.topology)?;
        self.frames.push(FrameData {
            timestep: frame.timestep,
            positions: flatten(&frame.positions),
            normals: flatten(&frame.normals),
            lattice: flatten(&frame.lattice),
        });
        Ok(())
    }

    fn finalize(&mut self) -> JellyResult<()> {
        let json = self.to_json()?;
        std::fs::write(&self.output_path, json)?;
        tracing::info!(
            path = %self.output_path.display(),
            frames = self.frames.len(),
            "animation exported"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "json_exporter"
    }

    fn frame_count(&self) -> u32 {
        self.frames.len() as u32
    }
}
