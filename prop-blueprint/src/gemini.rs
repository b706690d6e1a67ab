//! Gemini-backed image analysis.
//!
//! Sends the drawing inline with an instruction prompt and a response
//! schema, then decodes the JSON text the model returns.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use prop_blueprint_core::{AnalysisProvider, ImageInput, PropAnalysis, ProviderError};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const PROMPT: &str = "You are a senior jewelry display specialist and prop engineer. \
Analyze the uploaded 2D prop drawing (display case, tray, riser, backdrop, ...).\n\
1. Identify the geometric type of the prop (L-shaped riser, stepped tray, sloped ring stand, curved backdrop).\n\
2. Extract the core engineering parameters that define its function and look \
(total height, base width, slope angle, tier spacing).\n\
3. Describe it as a programmable 2D vector structure.\n\
The JSON must follow the schema strictly:\n\
- structural_logic.parameters: 3 to 5 core control parameters (e.g. Base_Width, Slope_Angle, Total_Height).\n\
- optimized_prompt: a clear description of the prop's 2D outline, for example \
\"A three-tier stepped jewelry display tray with total height H and step depth D\".";

/// Blocking client for the Gemini `generateContent` endpoint.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, model, DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        GeminiProvider {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

pub fn request_body(image: &ImageInput) -> Value {
    json!({
        "contents": [{
            "parts": [
                {
                    "inlineData": {
                        "mimeType": image.mime_type,
                        "data": STANDARD.encode(&image.bytes),
                    }
                },
                { "text": PROMPT }
            ]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(),
        }
    })
}

fn string_array() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "basic_info": {
                "type": "OBJECT",
                "properties": {
                    "material": { "type": "STRING", "description": "Prop material, e.g. velvet, marble, acrylic" },
                    "color": { "type": "STRING" },
                    "style_tags": string_array()
                },
                "required": ["material", "color", "style_tags"]
            },
            "structural_logic": {
                "type": "OBJECT",
                "properties": {
                    "parameters": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "name": { "type": "STRING" },
                                "value": { "type": "NUMBER" },
                                "min": { "type": "NUMBER" },
                                "max": { "type": "NUMBER" },
                                "unit": { "type": "STRING" },
                                "description": { "type": "STRING" }
                            },
                            "required": ["name", "value", "min", "max", "unit"]
                        }
                    },
                    "components": string_array(),
                    "layering": { "type": "STRING" }
                },
                "required": ["parameters", "components", "layering"]
            },
            "visual_cues": {
                "type": "OBJECT",
                "properties": {
                    "lighting": { "type": "STRING", "description": "Suggested in-case lighting" },
                    "focal_point": { "type": "STRING" },
                    "props": string_array()
                },
                "required": ["lighting", "focal_point", "props"]
            },
            "optimized_prompt": { "type": "STRING" }
        },
        "required": ["basic_info", "structural_logic", "visual_cues", "optimized_prompt"]
    })
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

/// Pull the analysis record out of a raw `generateContent` response body.
pub fn decode_response(body: &str) -> Result<PropAnalysis, ProviderError> {
    let resp: GenerateResponse = serde_json::from_str(body)?;
    let text = resp
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .find_map(|p| p.text)
        .filter(|t| !t.trim().is_empty())
        .ok_or(ProviderError::EmptyResponse)?;
    Ok(PropAnalysis::from_json(&text)?)
}

impl AnalysisProvider for GeminiProvider {
    fn analyze(&self, image: &ImageInput) -> Result<PropAnalysis, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::MissingCredentials);
        }
        debug!(model = %self.model, bytes = image.bytes.len(), "requesting analysis");
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(image))
            .send()
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ProviderError::Request(e.to_string()))?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "analysis request rejected");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }
        decode_response(&body)
    }
}
