//! Renderer trait and the headless implementation.

use jelly_math::Vec3;
use jelly_surface::SurfaceMesh;
use jelly_types::{JellyError, JellyResult};

/// Index buffers that stay fixed for a whole run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderTopology {
    /// Vertices per surface frame.
    pub vertex_count: usize,
    /// Triangle list over the surface vertices.
    pub triangles: Vec<u32>,
    /// Line list over the 64 lattice points (spring wireframe). May be empty.
    pub lines: Vec<u32>,
}

impl RenderTopology {
    pub fn from_mesh(mesh: &SurfaceMesh) -> Self {
        Self {
            vertex_count: mesh.vertex_count(),
            triangles: mesh.indices.clone(),
            lines: Vec::new(),
        }
    }

    pub fn with_lines(mut self, lines: Vec<u32>) -> Self {
        self.lines = lines;
        self
    }
}

/// Geometry for one presented frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub timestep: u32,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    /// Raw lattice positions for the wireframe overlay.
    pub lattice: Vec<Vec3>,
}

impl RenderFrame {
    pub fn from_surface(timestep: u32, surface: &SurfaceMesh) -> Self {
        Self {
            timestep,
            positions: surface.positions.clone(),
            normals: surface.normals.clone(),
            lattice: Vec::new(),
        }
    }

    pub fn with_lattice(mut self, lattice: &[Vec3]) -> Self {
        self.lattice = lattice.to_vec();
        self
    }

    /// Checks the frame against the topology given to `init`.
    pub fn check(&self, topology: &RenderTopology) -> JellyResult<()> {
        if self.positions.len() != topology.vertex_count || self.normals.len() != topology.vertex_count {
            return Err(JellyError::InvalidSurface(format!(
                "Frame {} has {} positions and {} normals, topology expects {}",
                self.timestep,
                self.positions.len(),
                self.normals.len(),
                topology.vertex_count
            )));
        }
        Ok(())
    }
}

/// Consumer of rendered frames.
///
/// # Implementations
/// - [`HeadlessRenderer`] counts frames (benchmarks, CI)
/// - [`JsonFrameExporter`](crate::JsonFrameExporter) writes an animation file
pub trait Renderer: Send {
    fn init(&mut self, topology: &RenderTopology) -> JellyResult<()>;

    fn submit_frame(&mut self, frame: &RenderFrame) -> JellyResult<()>;

    /// Flushes buffered output.
    fn finalize(&mut self) -> JellyResult<()>;

    fn name(&self) -> &str;

    /// Frames submitted so far.
    fn frame_count(&self) -> u32;
}

/// Discards every frame after checking it.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    topology: RenderTopology,
    frames: u32,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for HeadlessRenderer {
    fn init(&mut self, topology: &RenderTopology) -> JellyResult<()> {
        self.topology = topology.clone();
        Ok(())
    }

    fn submit_frame(&mut self, frame: &RenderFrame) -> JellyResult<()> {
        frame.check(&self.topology)?;
        self.frames += 1;
        Ok(())
    }

    fn finalize(&mut self) -> JellyResult<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "headless"
    }

    fn frame_count(&self) -> u32 {
        self.frames
    }
}
