//! Structural templates: classification from free text and parameter
//! resolution per template.
//!
//! Rules live in [`TEMPLATES`] in priority order; the first entry whose
//! keywords appear in the lowercased description wins and [`TemplateId::BoxTray`]
//! catches everything else. A new template is one table row plus one builder.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builders;
use crate::constants::MAX_TIERS;
use crate::geometry::{Point, PrimitiveGroup};
use crate::resolve::{Resolver, SemanticKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    SteppedTiers,
    SlopedStand,
    BoxTray,
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TemplateId::SteppedTiers => "stepped_tiers",
            TemplateId::SlopedStand => "sloped_stand",
            TemplateId::BoxTray => "box_tray",
        };
        f.write_str(s)
    }
}

pub struct TemplateEntry {
    pub id: TemplateId,
    pub keywords: &'static [&'static str],
    pub resolve: fn(&Resolver<'_>) -> TemplateParams,
}

pub static TEMPLATES: &[TemplateEntry] = &[
    TemplateEntry {
        id: TemplateId::SteppedTiers,
        keywords: &["step", "tier"],
        resolve: resolve_stepped_tiers,
    },
    TemplateEntry {
        id: TemplateId::SlopedStand,
        keywords: &["slope", "angle", "stand"],
        resolve: resolve_sloped_stand,
    },
];

pub static FALLBACK: TemplateEntry = TemplateEntry {
    id: TemplateId::BoxTray,
    keywords: &[],
    resolve: resolve_box_tray,
};

fn entry(id: TemplateId) -> &'static TemplateEntry {
    TEMPLATES.iter().find(|e| e.id == id).unwrap_or(&FALLBACK)
}

/// Pick the template for a structural description. Total over all input,
/// `None` and `""` included.
pub fn classify<'a>(description: impl Into<Option<&'a str>>) -> TemplateId {
    let desc = description.into().unwrap_or_default().to_lowercase();
    let id = TEMPLATES
        .iter()
        .find(|e| e.keywords.iter().any(|k| desc.contains(k)))
        .map_or(FALLBACK.id, |e| e.id);
    debug!(template = %id, "classified description");
    id
}

impl TemplateId {
    pub fn resolve(self, r: &Resolver<'_>) -> TemplateParams {
        (entry(self).resolve)(r)
    }
}

/// Concrete dimensions for one template, in millimeters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum TemplateParams {
    SteppedTiers { width: f64, height: f64, tiers: u32 },
    SlopedStand { base: f64, height: f64, angle: f64 },
    BoxTray { width: f64, height: f64, depth: f64 },
}

impl TemplateParams {
    pub fn template(&self) -> TemplateId {
        match self {
            TemplateParams::SteppedTiers { .. } => TemplateId::SteppedTiers,
            TemplateParams::SlopedStand { .. } => TemplateId::SlopedStand,
            TemplateParams::BoxTray { .. } => TemplateId::BoxTray,
        }
    }

    /// Generate the prop silhouette around `origin`.
    pub fn build(&self, origin: Point) -> PrimitiveGroup {
        match *self {
            TemplateParams::SteppedTiers {
                width,
                height,
                tiers,
            } => builders::stepped_tiers(origin, width, height, tiers),
            TemplateParams::SlopedStand {
                base,
                height,
                angle,
            } => builders::sloped_stand(origin, base, height, angle),
            TemplateParams::BoxTray {
                width,
                height,
                depth,
            } => builders::box_tray(origin, width, height, depth),
        }
    }
}

fn resolve_stepped_tiers(r: &Resolver<'_>) -> TemplateParams {
    const DEFAULT_TIERS: f64 = 3.0;
    // Round half up, then a zero count falls back like an unset one.
    let rounded = (r.get(SemanticKey::Tiers, DEFAULT_TIERS) + 0.5).floor();
    let tiers = if rounded == 0.0 { DEFAULT_TIERS } else { rounded };
    TemplateParams::SteppedTiers {
        width: r.get(SemanticKey::Width, 150.0),
        height: r.get(SemanticKey::Height, 40.0),
        tiers: tiers.clamp(1.0, MAX_TIERS as f64) as u32,
    }
}

fn resolve_sloped_stand(r: &Resolver<'_>) -> TemplateParams {
    TemplateParams::SlopedStand {
        base: r.get(SemanticKey::Base, 120.0),
        height: r.get(SemanticKey::Height, 100.0),
        angle: r.get(SemanticKey::Angle, 30.0),
    }
}

fn resolve_box_tray(r: &Resolver<'_>) -> TemplateParams {
    TemplateParams::BoxTray {
        width: r.get(SemanticKey::Width, 180.0),
        height: r.get(SemanticKey::Height, 120.0),
        depth: r.get(SemanticKey::Depth, 20.0),
    }
}
