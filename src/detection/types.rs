use serde::{Deserialize, Serialize};

/// Request body for the detection workflow endpoint:
/// `{"api_key": ..., "inputs": {"image": {"type": ..., "value": ...}}}`.
#[derive(Debug, Serialize)]
pub struct DetectRequest {
    pub api_key: String,
    pub inputs: DetectInputs,
}

#[derive(Debug, Serialize)]
pub struct DetectInputs {
    pub image: ImageInput,
}

/// Image payload, either inline base64 or a remote URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ImageInput {
    Base64(String),
    Url(String),
}

impl ImageInput {
    /// Split a user-supplied source into the wire variant: a
    /// `data:image/...` URL becomes inline base64 with the data-URL prefix
    /// stripped, anything else is passed through as a remote URL.
    pub fn from_source(source: &str) -> Self {
        if source.starts_with("data:image") {
            let payload = source
                .split_once(',')
                .map(|(_, payload)| payload)
                .unwrap_or(source);
            ImageInput::Base64(payload.to_string())
        } else {
            ImageInput::Url(source.to_string())
        }
    }

    /// Inline base64 payload, if this is the base64 variant.
    pub fn base64(&self) -> Option<&str> {
        match self {
            ImageInput::Base64(payload) => Some(payload),
            ImageInput::Url(_) => None,
        }
    }
}

/// One detected region. Every field defaults so partial provider output
/// still decodes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Prediction {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub confidence: f64,
    pub class_id: i64,
    #[serde(rename = "class")]
    pub class_name: String,
    pub detection_id: String,
    pub parent_id: String,
}

/// Pixel dimensions of the analyzed image.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Flattened detection result: object count, the annotated image, and the
/// prediction boxes, regardless of which response variant the provider
/// produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detections {
    pub count_objects: u64,
    /// Base64 of the annotated image, falling back to the submitted image.
    pub image_base64: String,
    pub image: ImageSize,
    pub predictions: Vec<Prediction>,
}
