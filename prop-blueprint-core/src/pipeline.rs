//! classify → resolve → build → annotate → fit, as one pure function.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::annotate::{Annotations, annotate};
use crate::config::BlueprintConfig;
use crate::error::{BlueprintError, Result};
use crate::geometry::{Bounds, PrimitiveGroup};
use crate::render::DrawingSurface;
use crate::store::ParameterStore;
use crate::template::{TemplateId, TemplateParams, classify};
use crate::viewport::{ViewportSize, fit_scale};

/// A fully synthesized, viewport-fitted drawing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub template: TemplateId,
    pub params: TemplateParams,
    /// Prop bounds before fitting; the label text reports these.
    pub bounds: Bounds,
    pub scale: f64,
    pub viewport: ViewportSize,
    pub prop: PrimitiveGroup,
    pub annotations: Annotations,
}

impl Blueprint {
    /// Paint prop geometry, then guides, then labels.
    pub fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        for p in &self.prop.items {
            surface.draw_primitive(p);
        }
        for g in self.annotations.guides() {
            surface.draw_primitive(g);
        }
        for l in self.annotations.labels() {
            surface.draw_label(l);
        }
    }
}

/// Run the whole pipeline for one (parameters, description, viewport) input.
///
/// Deterministic: identical inputs give bit-identical output. Fails only
/// when the resolved dimensions produce geometry with no positive height.
pub fn synthesize(
    store: &ParameterStore,
    description: Option<&str>,
    viewport: ViewportSize,
    cfg: &BlueprintConfig,
) -> Result<Blueprint> {
    let template = classify(description);
    let params = template.resolve(&store.resolver());
    debug!(?params, "resolved template parameters");

    let origin = viewport.center();
    let mut prop = params.build(origin);
    let bounds = prop
        .bounds()
        .ok_or(BlueprintError::DegenerateGeometry { height: 0.0 })?;

    // Annotations come from the bare prop bounds, before anything is added.
    let mut annotations = annotate(&bounds, cfg.annotation_margin, cfg.label_offset);

    let scale = fit_scale(&bounds, viewport, cfg.fill_fraction, cfg.max_scale)?;
    prop.scale_about(origin, scale);
    annotations.scale_about(origin, scale);

    Ok(Blueprint {
        template,
        params,
        bounds,
        scale,
        viewport,
        prop,
        annotations,
    })
}
