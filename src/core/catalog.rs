//! Region and model catalogs.
//!
//! These tables are configuration data, not structural constants: AWS adds
//! Bedrock regions and key models over time, and updating them must not
//! require touching the ledger or orchestration logic.

use serde_json::{Value, json};

// =============================================================================
// Regions
// =============================================================================

/// A Bedrock-capable region and its human-readable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionInfo {
    pub code: &'static str,
    pub display_name: &'static str,
}

/// Known Bedrock regions.
pub const BEDROCK_REGIONS: &[RegionInfo] = &[
    RegionInfo { code: "us-east-1", display_name: "US East (N. Virginia)" },
    RegionInfo { code: "us-east-2", display_name: "US East (Ohio)" },
    RegionInfo { code: "us-west-2", display_name: "US West (Oregon)" },
    RegionInfo { code: "ap-northeast-1", display_name: "Asia Pacific (Tokyo)" },
    RegionInfo { code: "ap-south-1", display_name: "Asia Pacific (Mumbai)" },
    RegionInfo { code: "ap-southeast-1", display_name: "Asia Pacific (Singapore)" },
    RegionInfo { code: "ap-southeast-2", display_name: "Asia Pacific (Sydney)" },
    RegionInfo { code: "ca-central-1", display_name: "Canada (Central)" },
    RegionInfo { code: "eu-central-1", display_name: "Europe (Frankfurt)" },
    RegionInfo { code: "eu-west-1", display_name: "Europe (Ireland)" },
    RegionInfo { code: "eu-west-2", display_name: "Europe (London)" },
    RegionInfo { code: "eu-west-3", display_name: "Europe (Paris)" },
];

/// Regions probed when none are requested.
pub const DEFAULT_REGIONS: &[&str] = &["us-east-1", "us-west-2"];

/// Whether a region code appears in the known Bedrock catalog.
///
/// Unknown codes are accepted with a warning, never rejected; the catalog
/// lags behind AWS launches.
#[must_use]
pub fn is_known_region(code: &str) -> bool {
    BEDROCK_REGIONS.iter().any(|r| r.code == code)
}

/// Display name for a region, falling back to the code itself.
#[must_use]
pub fn region_display_name(code: &str) -> &str {
    BEDROCK_REGIONS
        .iter()
        .find(|r| r.code == code)
        .map_or(code, |r| r.display_name)
}

/// Geographic group label for the interactive selector.
#[must_use]
pub fn region_group(code: &str) -> &'static str {
    if code.starts_with("us-") {
        "US Regions"
    } else if code.starts_with("eu-") {
        "Europe Regions"
    } else if code.starts_with("ap-") {
        "Asia Pacific Regions"
    } else {
        "Other Regions"
    }
}

// =============================================================================
// Key models
// =============================================================================

/// A curated key model and the use case it unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyModel {
    pub id: &'static str,
    pub purpose: &'static str,
}

/// Models considered essential for common Bedrock use cases.
pub const KEY_MODELS: &[KeyModel] = &[
    KeyModel {
        id: "amazon.titan-embed-text-v1",
        purpose: "Text embeddings (V1)",
    },
    KeyModel {
        id: "amazon.titan-embed-text-v2:0",
        purpose: "Text embeddings (V2)",
    },
    KeyModel {
        id: "anthropic.claude-3-sonnet-20240229-v1:0",
        purpose: "Text generation (Mid-tier)",
    },
    KeyModel {
        id: "anthropic.claude-3-haiku-20240307-v1:0",
        purpose: "Text generation (Fastest)",
    },
];

/// Purpose string for a key model id, if it is in the catalog.
#[must_use]
pub fn key_model_purpose(id: &str) -> Option<&'static str> {
    KEY_MODELS.iter().find(|m| m.id == id).map(|m| m.purpose)
}

// =============================================================================
// Model families and invocation bodies
// =============================================================================

/// Request-body family, matched by substring on the model identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    /// Embedding models ("embed" in the id).
    Embedding,
    /// Anthropic messages-style chat models.
    AnthropicChat,
    /// Completion-style fallback (Titan text and similar).
    Completion,
}

impl ModelFamily {
    /// Classify a model id by substring.
    #[must_use]
    pub fn from_model_id(model_id: &str) -> Self {
        let lower = model_id.to_lowercase();
        if lower.contains("embed") {
            Self::Embedding
        } else if lower.contains("anthropic") || lower.contains("claude") {
            Self::AnthropicChat
        } else {
            Self::Completion
        }
    }

    /// Minimal request body for a cheap invocation test.
    #[must_use]
    pub fn minimal_request_body(self) -> Value {
        match self {
            Self::Embedding => json!({ "inputText": "Hello" }),
            Self::AnthropicChat => json!({
                "anthropic_version": "bedrock-2023-05-31",
                "max_tokens": 10,
                "messages": [
                    { "role": "user", "content": "Hello" }
                ]
            }),
            Self::Completion => json!({
                "inputText": "Hello",
                "textGenerationConfig": { "maxTokenCount": 10 }
            }),
        }
    }
}

// =============================================================================
// SageMaker JumpStart alternatives
// =============================================================================

/// Curated JumpStart alternatives for missing key models.
pub const SAGEMAKER_ALTERNATIVES: &[(&str, &[&str])] = &[
    (
        "amazon.titan-embed-text-v1",
        &["huggingface-sentencesimilarity-all-MiniLM-L6-v2"],
    ),
    (
        "amazon.titan-embed-text-v2:0",
        &["huggingface-sentencesimilarity-bge-base-en-v1-5"],
    ),
    (
        "anthropic.claude-3-sonnet-20240229-v1:0",
        &[
            "huggingface-llm-mistral-7b-instruct",
            "meta-textgeneration-llama-2-13b-f",
        ],
    ),
    (
        "anthropic.claude-3-haiku-20240307-v1:0",
        &["meta-textgeneration-llama-2-7b-f"],
    ),
];

/// JumpStart alternatives for a missing key model, if any are curated.
#[must_use]
pub fn sagemaker_alternatives(model_id: &str) -> &'static [&'static str] {
    SAGEMAKER_ALTERNATIVES
        .iter()
        .find(|(id, _)| *id == model_id)
        .map_or(&[], |(_, alts)| alts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_regions_are_in_catalog() {
        for code in DEFAULT_REGIONS {
            assert!(is_known_region(code), "{code} should be a known region");
        }
    }

    #[test]
    fn unknown_region_falls_back_to_code() {
        assert!(!is_known_region("mars-north-1"));
        assert_eq!(region_display_name("mars-north-1"), "mars-north-1");
    }

    #[test]
    fn region_groups() {
        assert_eq!(region_group("us-east-1"), "US Regions");
        assert_eq!(region_group("eu-west-2"), "Europe Regions");
        assert_eq!(region_group("ap-south-1"), "Asia Pacific Regions");
        assert_eq!(region_group("ca-central-1"), "Other Regions");
    }

    #[test]
    fn key_models_span_vendors() {
        assert!(KEY_MODELS.iter().any(|m| m.id.starts_with("amazon.")));
        assert!(KEY_MODELS.iter().any(|m| m.id.starts_with("anthropic.")));
    }

    #[test]
    fn family_matching_by_substring() {
        assert_eq!(
            ModelFamily::from_model_id("amazon.titan-embed-text-v1"),
            ModelFamily::Embedding
        );
        assert_eq!(
            ModelFamily::from_model_id("anthropic.claude-3-haiku-20240307-v1:0"),
            ModelFamily::AnthropicChat
        );
        assert_eq!(
            ModelFamily::from_model_id("amazon.titan-text-express-v1"),
            ModelFamily::Completion
        );
    }

    #[test]
    fn chat_body_has_messages() {
        let body = ModelFamily::AnthropicChat.minimal_request_body();
        assert!(body.get("messages").is_some());
        assert!(body.get("anthropic_version").is_some());
    }

    #[test]
    fn embedding_body_has_input_text() {
        let body = ModelFamily::Embedding.minimal_request_body();
        assert_eq!(body["inputText"], "Hello");
    }

    #[test]
    fn every_key_model_has_an_alternative() {
        for model in KEY_MODELS {
            assert!(
                !sagemaker_alternatives(model.id).is_empty(),
                "{} has no curated alternative",
                model.id
            );
        }
        assert!(sagemaker_alternatives("unknown.model").is_empty());
    }
}
