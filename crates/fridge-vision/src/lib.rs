//! Ingredient detection through an external vision model.
//!
//! The model is a black box that returns name/confidence pairs; everything
//! here is plumbing around that contract. Failures surface as
//! `Error::VisionProvider` with the underlying message: recoverable per
//! request, no retry, no cached fallback.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

use std::path::Path;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;

use fridge_core::error::{Error, Result};
use fridge_core::traits::IngredientDetector;
use fridge_core::types::DetectedIngredient;

/// Detection prompt sent alongside the image. Spanish on purpose: the
/// corpus and discard list are Spanish, and the model must answer with
/// matching vocabulary.
const DETECTION_PROMPT: &str = "\
Mira esta imagen de una nevera y lista TODOS los ingredientes y productos visibles.
Devuelve ÚNICAMENTE un array JSON, sin ningún otro texto. Formato:
[
    {\"name\": \"nombre del ingrediente\", \"confidence\": 0.95},
    ...
]
Reglas:
- Usa nombres simples en ESPAÑOL (ej: \"zanahoria\" no \"zanahoria fresca orgánica\")
- Incluye todo lo visible: frutas, verduras, bebidas, condimentos, lácteos, sobras
- Confidence: 0.9 si se ve claramente, 0.7 si se ve parcialmente, 0.5 si hay incertidumbre
- NO incluyas nombres de marcas, pon el ingrediente real (ej: \"zumo de naranja\" no \"Tropicana\")
";

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.0-flash-001";

// One slow detection must not stall the process; the client bounds every
// request end to end.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

pub struct GeminiDetector {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl GeminiDetector {
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    pub fn with_model(api_key: &str, model: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::VisionProvider(format!("cannot build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE, self.model, self.api_key
        )
    }
}

impl IngredientDetector for GeminiDetector {
    fn detect(&self, image_path: &Path) -> Result<Vec<DetectedIngredient>> {
        let bytes = std::fs::read(image_path).map_err(|e| {
            Error::VisionProvider(format!("cannot read {}: {}", image_path.display(), e))
        })?;

        let payload = serde_json::json!({
            "contents": [{
                "parts": [
                    {"text": DETECTION_PROMPT},
                    {"inline_data": {
                        "mime_type": mime_type(image_path),
                        "data": BASE64.encode(&bytes),
                    }}
                ]
            }],
            "generationConfig": {"temperature": 0.1}
        });

        let response = self
            .client
            .post(self.endpoint())
            .json(&payload)
            .send()
            .map_err(|e| Error::VisionProvider(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::VisionProvider(format!("HTTP {status}: {body}")));
        }

        let parsed: GeminiResponse = response
            .json()
            .map_err(|e| Error::VisionProvider(format!("malformed response: {e}")))?;
        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| Error::VisionProvider("response carried no candidates".to_string()))?;

        parse_detections(&text)
    }
}

/// Parse the model's JSON array of detections, tolerating the ```json
/// fences models like to wrap around the payload.
pub fn parse_detections(text: &str) -> Result<Vec<DetectedIngredient>> {
    let cleaned = text.replace("```json", "").replace("```", "");
    serde_json::from_str(cleaned.trim())
        .map_err(|e| Error::VisionProvider(format!("malformed detection payload: {e}")))
}

fn mime_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

/// Deterministic stand-in for tests and offline demos.
pub struct FakeDetector {
    detections: Vec<DetectedIngredient>,
}

impl FakeDetector {
    pub fn new(detections: Vec<DetectedIngredient>) -> Self {
        Self { detections }
    }
}

impl IngredientDetector for FakeDetector {
    fn detect(&self, _image_path: &Path) -> Result<Vec<DetectedIngredient>> {
        Ok(self.detections.clone())
    }
}

/// Pick a detector from the environment: the fake when
/// `APP_USE_FAKE_DETECTIONS` is set, otherwise Gemini keyed by
/// `GEMINI_API_KEY`.
pub fn detector_from_env() -> Result<Box<dyn IngredientDetector>> {
    let use_fake = std::env::var("APP_USE_FAKE_DETECTIONS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if use_fake {
        println!("🧪 Using FakeDetector");
        return Ok(Box::new(FakeDetector::new(vec![
            DetectedIngredient { name: "huevo".to_string(), confidence: 0.9 },
            DetectedIngredient { name: "patata".to_string(), confidence: 0.85 },
            DetectedIngredient { name: "tomate".to_string(), confidence: 0.8 },
        ])));
    }
    let api_key = std::env::var("GEMINI_API_KEY")
        .map_err(|_| Error::VisionProvider("GEMINI_API_KEY is not set".to_string()))?;
    Ok(Box::new(GeminiDetector::new(&api_key)?))
}
