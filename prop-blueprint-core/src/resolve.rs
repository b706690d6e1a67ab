//! Fuzzy lookup of template dimensions among authored parameters.
//!
//! Parameter names are free text ("Base Width", "Total_Height"), so the
//! engine asks for a small closed set of [`SemanticKey`]s and matches them by
//! case-insensitive substring, first match in store order wins. The match is
//! computed once per ingest into a [`KeyIndex`]; the values are read at build
//! time so slider edits are seen without re-scanning names.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::BlueprintParameter;

/// Turns an authored parameter name into the form needles are matched against.
pub trait NameNormalizer {
    fn normalize(&self, name: &str) -> String;
}

impl<F> NameNormalizer for F
where
    F: Fn(&str) -> String,
{
    fn normalize(&self, name: &str) -> String {
        self(name)
    }
}

/// Default policy: lowercase, nothing else.
pub fn lowercase_name(name: &str) -> String {
    name.to_lowercase()
}

/// Normalize a requested key: underscores become spaces, then lowercase.
pub fn normalize_key(key: &str) -> String {
    key.replace('_', " ").to_lowercase()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticKey {
    Width,
    Height,
    Tiers,
    Base,
    Angle,
    Depth,
}

impl SemanticKey {
    pub const ALL: [SemanticKey; 6] = [
        SemanticKey::Width,
        SemanticKey::Height,
        SemanticKey::Tiers,
        SemanticKey::Base,
        SemanticKey::Angle,
        SemanticKey::Depth,
    ];

    /// Substring looked for in normalized parameter names.
    pub fn needle(self) -> &'static str {
        match self {
            SemanticKey::Width => "width",
            SemanticKey::Height => "height",
            SemanticKey::Tiers => "tier",
            SemanticKey::Base => "base",
            SemanticKey::Angle => "angle",
            SemanticKey::Depth => "depth",
        }
    }

    /// Whether an authored zero is replaced by the fallback.
    // FIXME: a legitimate zero depth (flat tray) is discarded here; revisit
    // once editors can express "no wall" explicitly.
    pub fn collapses_zero(self) -> bool {
        matches!(self, SemanticKey::Tiers | SemanticKey::Depth)
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Store positions matching each semantic key, in store order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyIndex {
    slots: [Vec<usize>; 6],
}

impl KeyIndex {
    pub fn build(params: &[BlueprintParameter], normalizer: &dyn NameNormalizer) -> Self {
        let mut idx = KeyIndex::default();
        for (i, p) in params.iter().enumerate() {
            let name = normalizer.normalize(&p.name);
            for key in SemanticKey::ALL {
                if name.contains(key.needle()) {
                    idx.slots[key.slot()].push(i);
                }
            }
        }
        idx
    }

    pub fn candidates(&self, key: SemanticKey) -> &[usize] {
        &self.slots[key.slot()]
    }
}

/// Read-only view used by the geometry builders.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    params: &'a [BlueprintParameter],
    index: &'a KeyIndex,
}

impl<'a> Resolver<'a> {
    pub fn new(params: &'a [BlueprintParameter], index: &'a KeyIndex) -> Self {
        Resolver { params, index }
    }

    /// Value of the first finite candidate for `key`, or `fallback`.
    /// Zero-collapsing keys also fall back on an authored zero.
    pub fn get(&self, key: SemanticKey, fallback: f64) -> f64 {
        let hit = self
            .index
            .candidates(key)
            .iter()
            .filter_map(|&i| self.params.get(i))
            .find(|p| p.value.is_finite());
        match hit {
            None => {
                debug!(key = key.needle(), fallback, "no matching parameter, using default");
                fallback
            }
            Some(p) if p.value == 0.0 && key.collapses_zero() => {
                warn!(
                    key = key.needle(),
                    parameter = %p.name,
                    fallback,
                    "zero value treated as unset"
                );
                fallback
            }
            Some(p) => p.value,
        }
    }
}

/// Single lookup straight against a parameter slice.
///
/// Same policy as [`Resolver::get`]: `key` is normalized, names are
/// lowercased, first finite match wins, and keys containing the needle of a
/// zero-collapsing [`SemanticKey`] ("tier_count", "wall_depth") fall back on
/// zero.
pub fn resolve(params: &[BlueprintParameter], key: &str, fallback: f64) -> f64 {
    let needle = normalize_key(key);
    let hit = params
        .iter()
        .find(|p| p.value.is_finite() && p.name.to_lowercase().contains(&needle));
    match hit {
        None => fallback,
        Some(p) => {
            let collapses = SemanticKey::ALL
                .iter()
                .any(|k| k.collapses_zero() && needle.contains(k.needle()));
            if p.value == 0.0 && collapses {
                fallback
            } else {
                p.value
            }
        }
    }
}
