//! # jelly-render
//!
//! The boundary to whatever draws the soft body.
//!
//! Provides a [`Renderer`] trait with a [`HeadlessRenderer`] that only counts
//! frames, and a [`JsonFrameExporter`] that writes the whole animation to a
//! JSON file for offline viewing.

pub mod json_exporter;
pub mod renderer;

pub use json_exporter::JsonFrameExporter;
pub use renderer::{HeadlessRenderer, RenderFrame, RenderTopology, Renderer};
