use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::state::wardrobe::ImageBlob;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Shown when the service fails without a usable message of its own.
pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";

/// Client for the Gemini image generation API.
///
/// Two operations are consumed by the job runner: compositing garments
/// onto a model photo, and adding accessories to a previously generated
/// photo. Both send the images as inline base64 parts and expect an
/// image part back.
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            model,
        }
    }

    /// Composite one or two garment images onto the model photo.
    pub async fn generate_outfit(
        &self,
        model: &ImageBlob,
        item_a: &ImageBlob,
        item_b: Option<&ImageBlob>,
    ) -> Result<ImageBlob, GenerateError> {
        let mut parts = vec![image_part(model), image_part(item_a)];
        let prompt = match item_b {
            Some(item_b) => {
                parts.push(image_part(item_b));
                concat!(
                    "The first image is a photo of a person. Dress that person in the ",
                    "two clothing items shown in the following images, keeping the ",
                    "person's pose, face and background unchanged. Return only the ",
                    "resulting photo."
                )
            }
            None => concat!(
                "The first image is a photo of a person. Dress that person in the ",
                "garment shown in the second image, keeping the person's pose, face ",
                "and background unchanged. Return only the resulting photo."
            ),
        };
        parts.push(text_part(prompt));

        self.invoke(parts).await
    }

    /// Add every accessory image to a base photo (usually a prior result).
    pub async fn add_accessories(
        &self,
        base: &ImageBlob,
        accessories: &[ImageBlob],
    ) -> Result<ImageBlob, GenerateError> {
        let mut parts = vec![image_part(base)];
        parts.extend(accessories.iter().map(image_part));
        parts.push(text_part(concat!(
            "The first image is a photo of a person. Style that person with all of ",
            "the accessories shown in the following images (worn naturally where ",
            "each belongs), keeping everything else unchanged. Return only the ",
            "resulting photo."
        )));

        self.invoke(parts).await
    }

    async fn invoke(&self, parts: Vec<Part>) -> Result<ImageBlob, GenerateError> {
        let url = format!(
            "{}/models/{}:generateContent",
            GEMINI_API_BASE, self.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
            },
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = match response.json::<ApiErrorResponse>().await {
                Ok(body) => body.error.message,
                Err(_) => UNKNOWN_ERROR.to_string(),
            };
            tracing::warn!(%status, %message, "generation request rejected");
            return Err(GenerateError::Api(message));
        }

        let body: GenerateContentResponse = response.json().await?;
        first_inline_image(body).ok_or(GenerateError::NoImage)
    }
}

fn image_part(blob: &ImageBlob) -> Part {
    Part {
        inline_data: Some(InlineData {
            mime_type: blob.mime_type.clone(),
            data: base64::engine::general_purpose::STANDARD.encode(&blob.bytes),
        }),
        ..Part::default()
    }
}

fn text_part(text: &str) -> Part {
    Part {
        text: Some(text.to_string()),
        ..Part::default()
    }
}

/// Pull the first inline image part out of a response, decoded to bytes.
fn first_inline_image(response: GenerateContentResponse) -> Option<ImageBlob> {
    response
        .candidates
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .find_map(|part| part.inline_data)
        .and_then(|inline| {
            base64::engine::general_purpose::STANDARD
                .decode(inline.data.as_bytes())
                .ok()
                .map(|bytes| ImageBlob::new(bytes, inline.mime_type))
        })
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("The generation service could not be reached: {0}")]
    Http(#[from] reqwest::Error),

    /// Message reported by the service, displayed as-is on the job card.
    #[error("{0}")]
    Api(String),

    #[error("The service response did not include an image")]
    NoImage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case_wire_names() {
        let blob = ImageBlob::new(vec![1, 2, 3], "image/png");
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![image_part(&blob), text_part("hello")],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        let part = &value["contents"][0]["parts"][0];
        assert_eq!(part["inlineData"]["mimeType"], "image/png");
        assert_eq!(part["inlineData"]["data"], "AQID");
        assert_eq!(value["generationConfig"]["responseModalities"][0], "IMAGE");
        // Image parts must not carry an empty text field
        assert!(part.get("text").is_none());
    }

    #[test]
    fn test_first_inline_image_skips_text_parts() {
        let json = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here is your outfit:" },
                        { "inlineData": { "mimeType": "image/png", "data": "AQID" } }
                    ]
                }
            }]
        });
        let response: GenerateContentResponse = serde_json::from_value(json).unwrap();

        let image = first_inline_image(response).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.bytes, vec![1, 2, 3]);
    }

    #[test]
    fn test_response_without_image_yields_none() {
        let json = serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "no can do" }] } }]
        });
        let response: GenerateContentResponse = serde_json::from_value(json).unwrap();
        assert!(first_inline_image(response).is_none());

        let empty: GenerateContentResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(first_inline_image(empty).is_none());
    }
}
