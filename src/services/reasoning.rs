use std::sync::Arc;

use serde_json::Value;

use crate::services::prompt::PromptPayload;
use crate::services::providers::{BackendError, CompletionBackend};

/// Front door to the optional reasoning backend
///
/// Holds at most one backend adapter, built once at startup and shared across
/// requests. A gateway without a backend is the zero-configuration default.
#[derive(Clone, Default)]
pub struct ReasoningGateway {
    backend: Option<Arc<dyn CompletionBackend>>,
}

impl ReasoningGateway {
    pub fn new(backend: Option<Arc<dyn CompletionBackend>>) -> Self {
        Self { backend }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    pub fn backend_name(&self) -> Option<&'static str> {
        self.backend.as_ref().map(|b| b.name())
    }

    /// Blocking completion; `None` when no backend is configured
    pub fn complete(&self, prompt: &PromptPayload) -> Option<Result<String, BackendError>> {
        self.backend.as_ref().map(|b| b.complete(prompt.as_str()))
    }

    /// Non-blocking completion; `None` when no backend is configured
    pub async fn complete_async(
        &self,
        prompt: &PromptPayload,
    ) -> Option<Result<String, BackendError>> {
        match &self.backend {
            Some(backend) => Some(backend.complete_async(prompt.as_str()).await),
            None => None,
        }
    }

    /// Extracts the JSON object from a backend reply
    ///
    /// Conversational text before the first `{` is discarded. Anything that is not
    /// then a syntactically valid JSON document yields `None`. The object is not
    /// checked against the response schema.
    pub fn parse_response(text: &str) -> Option<Value> {
        let text = text.trim();
        let start = text.find('{')?;

        match serde_json::from_str(&text[start..]) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(error = %e, "Backend reply is not valid JSON");
                None
            }
        }
    }
}

impl std::fmt::Debug for ReasoningGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReasoningGateway")
            .field("backend", &self.backend_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::MockCompletionBackend;
    use serde_json::json;

    #[test]
    fn test_parse_plain_object() {
        let parsed = ReasoningGateway::parse_response(
            r#"{"summary":"ok","outfits":[{"title":"A","summary":"s","items":["x"]}]}"#,
        )
        .unwrap();
        assert_eq!(parsed["summary"], "ok");
        assert_eq!(parsed["outfits"][0]["items"][0], "x");
    }

    #[test]
    fn test_parse_discards_prefix() {
        let parsed =
            ReasoningGateway::parse_response(r#"garbage{"summary":"s","outfits":[]}"#).unwrap();
        assert_eq!(parsed, json!({ "summary": "s", "outfits": [] }));
    }

    #[test]
    fn test_parse_conversational_wrapper() {
        let text = "Sure! Here are your outfits:\n\n{\"summary\":\"ok\",\"outfits\":[]}\n";
        assert!(ReasoningGateway::parse_response(text).is_some());
    }

    #[test]
    fn test_parse_rejects_text_without_brace() {
        for text in ["", "   \n", "no json here", "[1, 2, 3]", "42", "\"summary\""] {
            assert_eq!(ReasoningGateway::parse_response(text), None, "{:?}", text);
        }
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        for text in [
            "{",
            "{\"summary\": }",
            "{\"summary\":\"ok\"} trailing words",
            "prefix {not json}",
        ] {
            assert_eq!(ReasoningGateway::parse_response(text), None, "{:?}", text);
        }
    }

    #[test]
    fn test_parse_does_not_validate_schema() {
        let parsed = ReasoningGateway::parse_response(r#"{"unexpected": true}"#).unwrap();
        assert_eq!(parsed, json!({ "unexpected": true }));
    }

    #[test]
    fn test_unconfigured_gateway() {
        let gateway = ReasoningGateway::default();
        let prompt = PromptPayload::from_text("p");

        assert!(!gateway.is_configured());
        assert_eq!(gateway.backend_name(), None);
        assert!(gateway.complete(&prompt).is_none());
        assert!(tokio_test::block_on(gateway.complete_async(&prompt)).is_none());
    }

    #[test]
    fn test_configured_gateway_forwards_prompt() {
        let mut backend = MockCompletionBackend::new();
        backend
            .expect_complete()
            .withf(|prompt| prompt.to_string() == "the prompt")
            .times(1)
            .returning(|_| Ok("{}".to_string()));
        backend.expect_name().return_const("mock");

        let gateway = ReasoningGateway::new(Some(Arc::new(backend)));
        let reply = gateway
            .complete(&PromptPayload::from_text("the prompt"))
            .unwrap()
            .unwrap();

        assert_eq!(reply, "{}");
        assert_eq!(gateway.backend_name(), Some("mock"));
        assert_eq!(format!("{:?}", gateway), "ReasoningGateway { backend: Some(\"mock\") }");
    }
}
