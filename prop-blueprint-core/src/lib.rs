//! # Prop Blueprint Core
//!
//! Turns a handful of named engineering parameters and a free-text
//! structural description of a display prop (stepped tier stand, sloped
//! rest, tray) into an annotated orthographic blueprint.
//!
//! ```text
//! PropAnalysis ─▶ ParameterStore ─┐
//! description ─▶ classify ────────┴▶ resolve ▶ build ▶ annotate ▶ fit ▶ draw
//! ```
//!
//! Everything up to `draw` is pure; [`BlueprintSession`] owns the drawing
//! surface and clears it before every rebuild.

pub mod annotate;
pub mod builders;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod models;
pub mod pipeline;
pub mod provider;
pub mod render;
pub mod resolve;
pub mod session;
pub mod store;
pub mod template;
pub mod viewport;

pub use annotate::{Annotations, annotate};
pub use config::BlueprintConfig;
pub use error::{BlueprintError, ConfigError, ProviderError, Result};
pub use geometry::{Bounds, Label, Point, Primitive, PrimitiveGroup, Shape, StrokeStyle};
pub use models::{BasicInfo, BlueprintParameter, PropAnalysis, StructuralLogic, VisualCues};
pub use pipeline::{Blueprint, synthesize};
pub use provider::{AnalysisProvider, ImageInput, StaticProvider, mime_for_extension};
pub use render::{DrawingSurface, SvgSurface};
pub use resolve::{NameNormalizer, Resolver, SemanticKey, resolve};
pub use session::{BlueprintSession, RenderState};
pub use store::ParameterStore;
pub use template::{TemplateId, TemplateParams, classify};
pub use viewport::{ViewportSize, fit_scale};

/// Render an analysis record straight to an SVG document.
pub fn render_svg(analysis: &PropAnalysis, config: &BlueprintConfig) -> Result<String> {
    let store = ParameterStore::from_parameters(analysis.parameters().to_vec());
    let bp = synthesize(
        &store,
        Some(&analysis.optimized_prompt),
        config.viewport,
        config,
    )?;
    let mut surface = SvgSurface::new(config.viewport);
    bp.draw(&mut surface);
    Ok(surface.to_svg())
}
