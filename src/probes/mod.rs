//! Capability probes: the black-box interface to the remote services.
//!
//! Each probe wraps one named remote check and returns a typed outcome. The
//! remote error surface is string-based, so turning a failure into an outcome
//! is substring classification by contract: strings containing
//! "AccessDeniedException" or (case-insensitively) "not authorized" are
//! treated as denied; "could not connect to the endpoint" or
//! "ResourceNotFoundException" as structurally unavailable. This is
//! best-effort matching, isolated here so it can be swapped for structured
//! error matching without touching ledger logic.

pub mod aws;
pub mod profiles;

use crate::util::format::truncate_message;

/// Bound applied to unclassified failure messages before they are stored.
pub const FAULT_MESSAGE_LIMIT: usize = 50;

// =============================================================================
// Outcomes
// =============================================================================

/// Typed outcome of one probe invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome<T> {
    /// The call succeeded; payload shape depends on the probe kind.
    Ok(T),
    /// The call reached the service but was rejected for authorization
    /// reasons.
    Denied(String),
    /// The service/region combination structurally does not support the
    /// operation. An expected negative, not an error.
    Unavailable(String),
    /// Any other failure (network, throttling, malformed response). The
    /// message is truncated to [`FAULT_MESSAGE_LIMIT`] chars.
    Fault(String),
}

impl<T> ProbeOutcome<T> {
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

/// Classify a stringified remote error into a non-Ok probe outcome.
#[must_use]
pub fn classify_remote_error<T>(message: &str) -> ProbeOutcome<T> {
    let lower = message.to_lowercase();
    if message.contains("AccessDeniedException") || lower.contains("not authorized") {
        ProbeOutcome::Denied("Permission denied".to_string())
    } else if lower.contains("could not connect to the endpoint")
        || message.contains("ResourceNotFoundException")
        || lower.contains("dns error")
    {
        ProbeOutcome::Unavailable("Service not available".to_string())
    } else {
        ProbeOutcome::Fault(truncate_message(message, FAULT_MESSAGE_LIMIT))
    }
}

// =============================================================================
// Credential probe payloads
// =============================================================================

/// Where valid credentials were resolved from, plus advisory metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialInfo {
    /// Human-readable credential source ("Profile 'work'", "Environment
    /// variables", ...). Never the credentials themselves.
    pub source: String,
    /// Client library version, when the provider can report one.
    pub client_version: Option<String>,
    /// Masked account id ("1234...6789"), when resolvable.
    pub account: Option<String>,
    /// Masked identity type ("assumed-role/****"), when resolvable.
    pub identity: Option<String>,
}

/// Outcome of the credential probe. The three failure arms terminate the
/// profile's run; nothing else in the taxonomy does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialOutcome {
    Valid(CredentialInfo),
    ProfileNotFound {
        profile: String,
        known_profiles: Vec<String>,
    },
    Missing,
    Invalid(String),
}

// =============================================================================
// Model payloads
// =============================================================================

/// One foundation model as listed by the control plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSummary {
    pub model_id: String,
    pub provider_name: String,
}

/// Capability detail for one model (advanced mode).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelDetail {
    pub input_modalities: Vec<String>,
    pub output_modalities: Vec<String>,
    pub streaming_supported: Option<bool>,
    pub inference_types: Vec<String>,
}

// =============================================================================
// Probe trait
// =============================================================================

/// The capability-probe interface the orchestrator drives.
///
/// One implementation talks to AWS ([`aws::AwsProbe`]); tests script their
/// own. All calls are sequential; implementations need no interior
/// synchronization.
#[allow(async_fn_in_trait)]
pub trait BedrockProbe {
    /// Enumerate profiles from the local AWS configuration.
    async fn list_profiles(&self) -> Vec<String>;

    /// Verify that a credential source exists and resolves.
    async fn verify_credentials(&self, profile: Option<&str>) -> CredentialOutcome;

    /// Whether the Bedrock control plane answers in a region.
    async fn check_region(&self, profile: Option<&str>, region: &str) -> ProbeOutcome<()>;

    /// Whether a runtime handle can be established in a region.
    async fn runtime_access(&self, profile: Option<&str>, region: &str) -> ProbeOutcome<()>;

    /// List foundation models in a region.
    async fn list_models(
        &self,
        profile: Option<&str>,
        region: &str,
    ) -> ProbeOutcome<Vec<ModelSummary>>;

    /// Attempt a minimal real invocation of a model (cost-incurring).
    async fn invoke_model(
        &self,
        profile: Option<&str>,
        region: &str,
        model_id: &str,
        body: &serde_json::Value,
    ) -> ProbeOutcome<()>;

    /// Fetch per-model capability detail (advanced mode).
    async fn model_detail(
        &self,
        profile: Option<&str>,
        region: &str,
        model_id: &str,
    ) -> ProbeOutcome<ModelDetail>;
}
