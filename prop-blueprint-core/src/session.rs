//! Render orchestration.
//!
//! A [`BlueprintSession`] owns the parameter store, the structural
//! description and the drawing surface. Every change runs the full pipeline
//! synchronously after clearing the surface; nothing drawn survives a
//! rebuild.
//!
//! ```text
//! Empty ──ingest──▶ Built ──change──▶ Rebuilt ◀─┐
//!   │                 │                 └─change─┘
//!   └──────── dispose ┴──────────────▶ Disposed
//! ```

use tracing::{debug, info, warn};

use crate::config::BlueprintConfig;
use crate::constants::PLACEHOLDER_TEXT;
use crate::error::{BlueprintError, Result};
use crate::models::{BlueprintParameter, PropAnalysis};
use crate::pipeline::{Blueprint, synthesize};
use crate::render::DrawingSurface;
use crate::resolve::{NameNormalizer, lowercase_name};
use crate::store::ParameterStore;
use crate::viewport::ViewportSize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderState {
    Empty,
    Built,
    Rebuilt,
    Disposed,
}

pub struct BlueprintSession<S: DrawingSurface> {
    surface: Option<S>,
    state: RenderState,
    config: BlueprintConfig,
    viewport: ViewportSize,
    normalizer: Box<dyn NameNormalizer>,
    store: ParameterStore,
    description: Option<String>,
    current: Option<Blueprint>,
    rebuilds: u64,
}

impl<S: DrawingSurface> BlueprintSession<S> {
    /// Acquire `surface` and show the placeholder.
    pub fn new(surface: S, config: BlueprintConfig) -> Self {
        let mut session = BlueprintSession {
            surface: Some(surface),
            state: RenderState::Empty,
            viewport: config.viewport,
            config,
            normalizer: Box::new(lowercase_name),
            store: ParameterStore::new(),
            description: None,
            current: None,
            rebuilds: 0,
        };
        session.redraw_empty();
        session
    }

    /// Replace the name-normalization policy used at ingest.
    pub fn with_normalizer(mut self, normalizer: impl NameNormalizer + 'static) -> Self {
        self.normalizer = Box::new(normalizer);
        self
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn parameters(&self) -> &[BlueprintParameter] {
        self.store.as_slice()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    /// The last successfully synthesized drawing.
    pub fn blueprint(&self) -> Option<&Blueprint> {
        self.current.as_ref()
    }

    /// Number of pipeline runs since the session was created.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Seed parameters and description from a provider result.
    pub fn ingest(&mut self, analysis: &PropAnalysis) -> Result<&Blueprint> {
        self.ensure_live()?;
        info!(
            parameters = analysis.parameters().len(),
            "ingesting analysis result"
        );
        self.store = ParameterStore::from_parameters_with(
            analysis.parameters().to_vec(),
            self.normalizer.as_ref(),
        );
        self.description = Some(analysis.optimized_prompt.clone());
        self.rebuild()
    }

    /// Replace the whole parameter list.
    pub fn set_parameters(&mut self, params: Vec<BlueprintParameter>) -> Result<&Blueprint> {
        self.ensure_live()?;
        self.store = ParameterStore::from_parameters_with(params, self.normalizer.as_ref());
        self.rebuild()
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<&Blueprint> {
        self.ensure_live()?;
        self.description = Some(description.into());
        self.rebuild()
    }

    /// Editor entry point: replace one parameter's value in place.
    pub fn update_parameter(&mut self, index: usize, value: f64) -> Result<&Blueprint> {
        self.ensure_live()?;
        self.store.update(index, value)?;
        self.rebuild()
    }

    /// Viewport changed. Before any input arrives this only redraws the
    /// placeholder at the new size.
    pub fn resize(&mut self, size: ViewportSize) -> Result<Option<&Blueprint>> {
        self.ensure_live()?;
        self.viewport = size;
        if self.state == RenderState::Empty {
            self.redraw_empty();
            return Ok(None);
        }
        self.rebuild().map(Some)
    }

    /// Tear down the surface and hand it back. Later calls fail with
    /// [`BlueprintError::Disposed`].
    pub fn dispose(&mut self) -> Option<S> {
        if self.state != RenderState::Disposed {
            debug!(rebuilds = self.rebuilds, "disposing render session");
        }
        self.state = RenderState::Disposed;
        self.current = None;
        self.surface.take()
    }

    fn ensure_live(&self) -> Result<()> {
        if self.state == RenderState::Disposed {
            return Err(BlueprintError::Disposed);
        }
        Ok(())
    }

    fn redraw_empty(&mut self) {
        if let Some(s) = self.surface.as_mut() {
            s.clear(self.viewport);
            s.draw_placeholder(PLACEHOLDER_TEXT);
        }
    }

    fn rebuild(&mut self) -> Result<&Blueprint> {
        let Some(surface) = self.surface.as_mut() else {
            return Err(BlueprintError::Disposed);
        };
        surface.clear(self.viewport);
        self.current = None;
        self.rebuilds += 1;
        self.state = match self.state {
            RenderState::Empty => RenderState::Built,
            _ => RenderState::Rebuilt,
        };

        let bp = match synthesize(
            &self.store,
            self.description.as_deref(),
            self.viewport,
            &self.config,
        ) {
            Ok(bp) => bp,
            Err(e) => {
                warn!(error = %e, "blueprint rebuild failed; surface left blank");
                return Err(e);
            }
        };
        bp.draw(surface);
        debug!(template = %bp.template, scale = bp.scale, "blueprint drawn");
        let bp: &Blueprint = self.current.insert(bp);
        Ok(bp)
    }
}
