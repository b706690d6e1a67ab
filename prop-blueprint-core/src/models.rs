use serde::{Deserialize, Serialize};

/// A named engineering parameter as authored by the analysis provider.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlueprintParameter {
    pub name: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub unit: String,
    #[serde(default)]
    pub description: String,
}

impl BlueprintParameter {
    pub fn new(name: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            value,
            min,
            max,
            unit: "mm".to_string(),
            description: String::new(),
        }
    }

    /// Clamp `v` into this parameter's `[min, max]`. Inverted bounds are
    /// swapped first. Editors call this; the engine never does.
    pub fn clamp(&self, v: f64) -> f64 {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        if v.is_nan() { lo } else { v.clamp(lo, hi) }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicInfo {
    pub material: String,
    pub color: String,
    pub style_tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuralLogic {
    pub parameters: Vec<BlueprintParameter>,
    pub components: Vec<String>,
    pub layering: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualCues {
    pub lighting: String,
    pub focal_point: String,
    pub props: Vec<String>,
}

/// Structured record returned by the image-analysis provider.
///
/// Only `structural_logic.parameters` and `optimized_prompt` feed the
/// engine; the rest is carried for display.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropAnalysis {
    pub basic_info: BasicInfo,
    pub structural_logic: StructuralLogic,
    pub visual_cues: VisualCues,
    pub optimized_prompt: String,
}

impl PropAnalysis {
    pub fn from_json(txt: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(txt)
    }

    pub fn parameters(&self) -> &[BlueprintParameter] {
        &self.structural_logic.parameters
    }
}
