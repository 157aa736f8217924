//! Model family table: how each vendor's invoke envelope is built and where its
//! reply text lives. Resolved once from the configured model id.

use serde_json::{json, Value};

const TEMPERATURE: f64 = 0.7;
const TOP_P: f64 = 0.9;
const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Cross-region inference profiles prefix the vendor, e.g. `us.anthropic.claude-…`.
const REGION_PREFIXES: &[&str] = &["us", "eu", "apac", "global"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    /// Chat-message envelope, reply at `content[0].text`.
    Anthropic,
    /// `inputText` + `textGenerationConfig`, reply at `results[0].outputText`.
    Titan,
    /// `prompt` + `max_gen_len`, reply at `generation`.
    Llama,
    /// Unrecognised vendor. Uses the Titan-style single-field envelope.
    Generic,
}

const FAMILY_TABLE: &[(&str, ModelFamily)] = &[
    ("anthropic", ModelFamily::Anthropic),
    ("amazon", ModelFamily::Titan),
    ("meta", ModelFamily::Llama),
];

impl ModelFamily {
    pub fn resolve(model_id: &str) -> Self {
        let id = model_id.trim().to_ascii_lowercase();
        let mut segments = id.split('.');
        let mut vendor = segments.next().unwrap_or_default();
        if REGION_PREFIXES.contains(&vendor) {
            vendor = segments.next().unwrap_or_default();
        }

        FAMILY_TABLE
            .iter()
            .find(|(name, _)| *name == vendor)
            .map(|(_, family)| *family)
            .unwrap_or(ModelFamily::Generic)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModelFamily::Anthropic => "anthropic",
            ModelFamily::Titan => "titan",
            ModelFamily::Llama => "llama",
            ModelFamily::Generic => "generic",
        }
    }

    pub fn build_request(self, prompt: &str, max_tokens: u32) -> Value {
        match self {
            ModelFamily::Anthropic => json!({
                "anthropic_version": ANTHROPIC_VERSION,
                "max_tokens": max_tokens,
                "messages": [{"role": "user", "content": prompt}],
                "temperature": TEMPERATURE,
                "top_p": TOP_P,
            }),
            ModelFamily::Llama => json!({
                "prompt": prompt,
                "max_gen_len": max_tokens,
                "temperature": TEMPERATURE,
                "top_p": TOP_P,
            }),
            ModelFamily::Titan | ModelFamily::Generic => json!({
                "inputText": prompt,
                "textGenerationConfig": {
                    "maxTokenCount": max_tokens,
                    "temperature": TEMPERATURE,
                    "topP": TOP_P,
                },
            }),
        }
    }

    fn own_text(self, response: &Value) -> Option<&str> {
        match self {
            ModelFamily::Anthropic => chat_content(response),
            ModelFamily::Titan => generation_results(response),
            ModelFamily::Llama => raw_text(response),
            ModelFamily::Generic => None,
        }
    }

    /// Reply text from a response envelope. Tries this family's own shape,
    /// then chat content, generation results and a raw text field in that
    /// order. An unknown shape comes back as the stringified envelope.
    pub fn extract_text(self, response: &Value) -> String {
        self.own_text(response)
            .or_else(|| chat_content(response))
            .or_else(|| generation_results(response))
            .or_else(|| raw_text(response))
            .map(str::to_string)
            .unwrap_or_else(|| response.to_string())
    }
}

fn chat_content(response: &Value) -> Option<&str> {
    response.pointer("/content/0/text")?.as_str()
}

fn generation_results(response: &Value) -> Option<&str> {
    response.pointer("/results/0/outputText")?.as_str()
}

fn raw_text(response: &Value) -> Option<&str> {
    ["generation", "completion", "outputText"]
        .iter()
        .find_map(|field| response.get(*field).and_then(Value::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_families() {
        assert_eq!(
            ModelFamily::resolve("anthropic.claude-3-5-haiku-20241022-v1:0"),
            ModelFamily::Anthropic
        );
        assert_eq!(
            ModelFamily::resolve("amazon.titan-text-express-v1"),
            ModelFamily::Titan
        );
        assert_eq!(
            ModelFamily::resolve("meta.llama3-8b-instruct-v1:0"),
            ModelFamily::Llama
        );
    }

    #[test]
    fn test_resolve_strips_region_prefix() {
        assert_eq!(
            ModelFamily::resolve("us.anthropic.claude-3-5-haiku-20241022-v1:0"),
            ModelFamily::Anthropic
        );
        assert_eq!(
            ModelFamily::resolve("eu.meta.llama3-2-1b-instruct-v1:0"),
            ModelFamily::Llama
        );
    }

    #[test]
    fn test_resolve_unknown_is_generic() {
        assert_eq!(
            ModelFamily::resolve("mistral.mistral-7b-instruct-v0:2"),
            ModelFamily::Generic
        );
        assert_eq!(ModelFamily::resolve(""), ModelFamily::Generic);
    }

    #[test]
    fn test_anthropic_envelope() {
        let body = ModelFamily::Anthropic.build_request("hello", 2000);
        assert_eq!(body["anthropic_version"], "bedrock-2023-05-31");
        assert_eq!(body["max_tokens"], 2000);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hello");
    }

    #[test]
    fn test_generic_envelope_matches_titan() {
        let titan = ModelFamily::Titan.build_request("hello", 50);
        let generic = ModelFamily::Generic.build_request("hello", 50);
        assert_eq!(titan, generic);
        assert_eq!(titan["inputText"], "hello");
        assert_eq!(titan["textGenerationConfig"]["maxTokenCount"], 50);
    }

    #[test]
    fn test_llama_envelope() {
        let body = ModelFamily::Llama.build_request("hello", 300);
        assert_eq!(body["prompt"], "hello");
        assert_eq!(body["max_gen_len"], 300);
    }

    #[test]
    fn test_extract_text_each_shape() {
        let chat = json!({"content": [{"type": "text", "text": "from chat"}]});
        let results = json!({"results": [{"outputText": "from results"}]});
        let raw = json!({"generation": "from raw"});

        assert_eq!(ModelFamily::Anthropic.extract_text(&chat), "from chat");
        assert_eq!(ModelFamily::Titan.extract_text(&results), "from results");
        assert_eq!(ModelFamily::Llama.extract_text(&raw), "from raw");
    }

    #[test]
    fn test_extract_text_falls_through_priority_order() {
        // A Llama-configured model answering in chat shape still yields text.
        let chat = json!({"content": [{"text": "chat wins"}], "generation": "raw loses"});
        assert_eq!(ModelFamily::Generic.extract_text(&chat), "chat wins");

        let completion = json!({"completion": "legacy"});
        assert_eq!(ModelFamily::Anthropic.extract_text(&completion), "legacy");
    }

    #[test]
    fn test_extract_text_unknown_shape_is_stringified() {
        let odd = json!({"answer": 42});
        assert_eq!(ModelFamily::Anthropic.extract_text(&odd), r#"{"answer":42}"#);
    }
}
