use serde::{Deserialize, Serialize};

/// Name of the edge function that turns a prompt into an image.
pub const GENERATE_DESIGN_FUNCTION: &str = "generate-fashion-design";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateDesignRequest {
    pub prompt: String,
}

/// Body returned by the design service.
///
/// The service answers with either `{ "imageUrl": .. }` or `{ "error": .. }`;
/// both fields are optional so a body carrying neither still decodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateDesignResponse {
    #[serde(
        rename = "imageUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateDesignResponse {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            image_url: Some(url.into()),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            image_url: None,
            error: Some(message.into()),
        }
    }

    /// Service-reported failure message, ignoring empty strings.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|message| !message.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_camel_case_image_url() {
        let body: GenerateDesignResponse =
            serde_json::from_str(r#"{"imageUrl":"https://cdn/x.png"}"#).expect("decode");
        assert_eq!(body.image_url.as_deref(), Some("https://cdn/x.png"));
        assert_eq!(body.error_message(), None);
    }

    #[test]
    fn empty_error_is_not_a_failure_message() {
        let body: GenerateDesignResponse = serde_json::from_str(r#"{"error":""}"#).expect("decode");
        assert_eq!(body.error_message(), None);
    }

    #[test]
    fn request_serializes_prompt_only() {
        let json = serde_json::to_string(&GenerateDesignRequest {
            prompt: "red coat".to_string(),
        })
        .expect("encode");
        assert_eq!(json, r#"{"prompt":"red coat"}"#);
    }
}
