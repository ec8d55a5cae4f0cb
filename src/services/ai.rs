//! AI query service: prompt construction and the Gemini generateContent call.
//!
//! The prompt pins the assistant to the art/handicraft domain; the user's
//! question is interpolated into it verbatim. Images always go out with a
//! fixed JPEG MIME type, whatever their source was.

use crate::config::Config;
use crate::error::ProviderError;
use base64::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const IMAGE_MIME: &str = "image/jpeg";

/// An image supplied by a caller, in any of the three shapes the routes
/// produce. All of them normalize to one byte buffer.
#[derive(Debug, Clone)]
pub enum ImageInput {
    /// Path to a previously saved upload.
    Path(PathBuf),
    /// Inline `data:image/...;base64,...` URI from a JSON payload.
    DataUri(String),
    /// Already-decoded raw bytes.
    Bytes(Vec<u8>),
}

impl ImageInput {
    pub fn into_bytes(self) -> Result<Vec<u8>, ProviderError> {
        match self {
            ImageInput::Path(path) => std::fs::read(&path)
                .map_err(|e| ProviderError::BadImage(format!("{}: {}", path.display(), e))),
            ImageInput::DataUri(uri) => {
                // Everything after the first comma is the payload.
                let encoded = uri.split_once(',').map(|(_, data)| data).unwrap_or(&uri);
                BASE64_STANDARD
                    .decode(encoded.trim())
                    .map_err(|e| ProviderError::BadImage(format!("invalid base64 image: {e}")))
            }
            ImageInput::Bytes(bytes) => Ok(bytes),
        }
    }
}

pub struct AiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl AiClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.provider_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
        })
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Ask the provider. Returns the generated text verbatim; every failure
    /// mode comes back as a typed [`ProviderError`].
    pub async fn query(
        &self,
        question: &str,
        image: Option<ImageInput>,
    ) -> Result<String, ProviderError> {
        let image_bytes = match image {
            Some(input) => Some(input.into_bytes()?),
            None => None,
        };
        let has_image = image_bytes.is_some();
        let request = GenerateContentRequest::new(&build_prompt(question), image_bytes);

        tracing::info!(has_image, "querying provider model {}", self.model);

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: extract_api_error(&body),
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        body.into_text().ok_or(ProviderError::EmptyResponse)
    }
}

/// The fixed instructional template around the user's question.
fn build_prompt(question: &str) -> String {
    format!(
        "User will enter an image and will ask a question related to that art image \
         they shared. Suggest according to the question asked related to the image, \
         focusing on: naming it, describing it, marketing it, pricing it according to \
         the trend, and platform guidance for Meesho, Amazon Karigar and Etsy (suggest \
         some YouTube tutorials for creating a seller account on those platforms and \
         guide accordingly).\n\
         If no image is shared then answer questions in general which are related to \
         art, handicrafts, handmade products, handlooms, pottery, etc.\n\
         And don't answer anything else outside of that.\n\
         Question: {question}\n\
         Answer in a friendly and natural way:"
    )
}

/// Best-effort extraction of `error.message` from a provider error body.
fn extract_api_error(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

// generateContent wire types. Field names are the REST API's snake_case.

#[derive(Debug, PartialEq, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, PartialEq, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    Inline { inline_data: Blob },
}

#[derive(Debug, PartialEq, Serialize)]
struct Blob {
    mime_type: String,
    data: String,
}

impl GenerateContentRequest {
    fn new(prompt: &str, image: Option<Vec<u8>>) -> Self {
        let mut parts = vec![Part::Text {
            text: prompt.to_string(),
        }];
        if let Some(bytes) = image {
            parts.push(Part::Inline {
                inline_data: Blob {
                    mime_type: IMAGE_MIME.to_string(),
                    data: BASE64_STANDARD.encode(bytes),
                },
            });
        }
        Self {
            contents: vec![Content { parts }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Debug, Deserialize)]
struct TextPart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// First candidate's text parts, concatenated, untouched otherwise.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_prompt_interpolates_question_and_names_platforms() {
        let prompt = build_prompt("How should I price this vase?");
        assert!(prompt.contains("Question: How should I price this vase?"));
        for platform in ["Meesho", "Amazon Karigar", "Etsy"] {
            assert!(prompt.contains(platform), "missing {platform}");
        }
        assert!(prompt.contains("handicrafts"));
    }

    #[test]
    fn test_text_only_request_has_single_part() {
        let request = GenerateContentRequest::new(&build_prompt("hello"), None);
        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].parts.len(), 1);

        let json = serde_json::to_value(&request).unwrap();
        assert!(json["contents"][0]["parts"][0]["text"].is_string());
    }

    #[test]
    fn test_image_request_carries_jpeg_inline_data() {
        let request = GenerateContentRequest::new("p", Some(vec![0xFF, 0xD8, 0xFF]));
        let json = serde_json::to_value(&request).unwrap();
        let parts = json["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/jpeg");
        assert_eq!(
            parts[1]["inline_data"]["data"],
            BASE64_STANDARD.encode([0xFF, 0xD8, 0xFF])
        );
    }

    #[test]
    fn test_all_image_sources_normalize_to_same_bytes() {
        let bytes = b"not really a jpeg".to_vec();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();
        file.flush().unwrap();

        let from_path = ImageInput::Path(file.path().to_path_buf())
            .into_bytes()
            .unwrap();
        let from_uri = ImageInput::DataUri(format!(
            "data:image/jpeg;base64,{}",
            BASE64_STANDARD.encode(&bytes)
        ))
        .into_bytes()
        .unwrap();
        let from_raw = ImageInput::Bytes(bytes.clone()).into_bytes().unwrap();

        assert_eq!(from_path, bytes);
        assert_eq!(from_uri, bytes);
        assert_eq!(from_raw, bytes);

        // ...and therefore to identical request shapes.
        assert_eq!(
            GenerateContentRequest::new("p", Some(from_path)),
            GenerateContentRequest::new("p", Some(from_uri)),
        );
    }

    #[test]
    fn test_malformed_data_uri_is_bad_image() {
        let err = ImageInput::DataUri("data:image/jpeg;base64,@@not-base64@@".to_string())
            .into_bytes()
            .unwrap_err();
        assert!(matches!(err, ProviderError::BadImage(_)));
    }

    #[test]
    fn test_missing_file_is_bad_image() {
        let err = ImageInput::Path(PathBuf::from("/no/such/upload.jpg"))
            .into_bytes()
            .unwrap_err();
        assert!(matches!(err, ProviderError::BadImage(_)));
    }

    #[test]
    fn test_response_text_extraction() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"A fine "},{"text":"pot."}]}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_text().unwrap(), "A fine pot.");

        let empty: GenerateContentResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(empty.into_text().is_none());
    }

    #[test]
    fn test_api_error_message_extraction() {
        let body = r#"{"error":{"code":429,"message":"quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(extract_api_error(body), "quota exceeded");
        assert_eq!(extract_api_error("plain failure"), "plain failure");
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_typed_error() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            gemini_api_key: "test-key".to_string(),
            gemini_model: "gemini-2.5-flash".to_string(),
            provider_timeout_secs: 1,
            upload_dir: "uploads".into(),
            products_path: "products.csv".into(),
        };
        // Nothing listens on this port; the call must fail with a typed
        // error, never a success-shaped string.
        let client = AiClient::new(&config)
            .unwrap()
            .with_base_url("http://127.0.0.1:9");
        let err = client.query("hello", None).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Http(_) | ProviderError::Timeout
        ));
    }
}
