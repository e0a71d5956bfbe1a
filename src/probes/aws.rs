//! AWS-backed probe implementation.
//!
//! Uses the SDK's default credential chain, which resolves in order:
//! environment variables, shared credentials/config files, IAM roles, and
//! container credentials. Every remote failure is stringified and routed
//! through [`classify_remote_error`](super::classify_remote_error); nothing
//! in this file raises past the probe boundary.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use aws_smithy_types::error::display::DisplayErrorContext;

use crate::probes::{
    BedrockProbe, CredentialInfo, CredentialOutcome, ModelDetail, ModelSummary, ProbeOutcome,
    classify_remote_error, profiles,
};
use crate::util::format::{mask_account_id, mask_identity};

/// Region used for credential resolution before any region is confirmed.
const BOOTSTRAP_REGION: &str = "us-east-1";

/// Probe implementation backed by the AWS SDK.
#[derive(Debug, Clone, Copy, Default)]
pub struct AwsProbe;

impl AwsProbe {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn sdk_config(&self, profile: Option<&str>, region: &str) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()));
        if let Some(name) = profile {
            loader = loader.profile_name(name);
        }
        loader.load().await
    }
}

impl BedrockProbe for AwsProbe {
    async fn list_profiles(&self) -> Vec<String> {
        profiles::list_profiles()
    }

    async fn verify_credentials(&self, profile: Option<&str>) -> CredentialOutcome {
        if let Some(name) = profile {
            let known_profiles = profiles::list_profiles();
            if !known_profiles.iter().any(|p| p == name) {
                return CredentialOutcome::ProfileNotFound {
                    profile: name.to_string(),
                    known_profiles,
                };
            }
        }

        let has_env_credentials = profile.is_none()
            && std::env::var("AWS_ACCESS_KEY_ID").is_ok()
            && std::env::var("AWS_SECRET_ACCESS_KEY").is_ok();

        if profile.is_none() && !has_env_credentials && !profiles::has_shared_config() {
            return CredentialOutcome::Missing;
        }

        let config = self.sdk_config(profile, BOOTSTRAP_REGION).await;
        let Some(provider) = config.credentials_provider() else {
            return CredentialOutcome::Missing;
        };
        if let Err(err) = provider.provide_credentials().await {
            return CredentialOutcome::Invalid(format!("{}", DisplayErrorContext(&err)));
        }

        let source = profile.map_or_else(
            || {
                if has_env_credentials {
                    "Environment variables".to_string()
                } else {
                    "Shared credentials file (default profile)".to_string()
                }
            },
            |name| format!("Profile '{name}'"),
        );

        // Identity lookup is best effort; a failure here never fails the
        // credential check.
        let (account, identity) = match aws_sdk_sts::Client::new(&config)
            .get_caller_identity()
            .send()
            .await
        {
            Ok(output) => (
                output.account().map(mask_account_id),
                output.user_id().map(mask_identity),
            ),
            Err(err) => {
                tracing::debug!("sts get-caller-identity failed: {}", DisplayErrorContext(&err));
                (None, None)
            }
        };

        CredentialOutcome::Valid(CredentialInfo {
            source,
            client_version: None,
            account,
            identity,
        })
    }

    async fn check_region(&self, profile: Option<&str>, region: &str) -> ProbeOutcome<()> {
        let config = self.sdk_config(profile, region).await;
        let client = aws_sdk_bedrock::Client::new(&config);
        match client.list_foundation_models().send().await {
            Ok(_) => ProbeOutcome::Ok(()),
            Err(err) => classify_remote_error(&format!("{}", DisplayErrorContext(&err))),
        }
    }

    async fn runtime_access(&self, profile: Option<&str>, region: &str) -> ProbeOutcome<()> {
        // The runtime plane has no listing operation that is free to call, so
        // reachability means the handle can be established over resolved
        // credentials, matching the control-plane region already confirmed.
        let config = self.sdk_config(profile, region).await;
        let _client = aws_sdk_bedrockruntime::Client::new(&config);
        ProbeOutcome::Ok(())
    }

    async fn list_models(
        &self,
        profile: Option<&str>,
        region: &str,
    ) -> ProbeOutcome<Vec<ModelSummary>> {
        let config = self.sdk_config(profile, region).await;
        let client = aws_sdk_bedrock::Client::new(&config);
        match client.list_foundation_models().send().await {
            Ok(output) => ProbeOutcome::Ok(
                output
                    .model_summaries()
                    .iter()
                    .map(|summary| ModelSummary {
                        model_id: summary.model_id().to_string(),
                        provider_name: summary
                            .provider_name()
                            .unwrap_or("Unknown")
                            .to_string(),
                    })
                    .collect(),
            ),
            Err(err) => classify_remote_error(&format!("{}", DisplayErrorContext(&err))),
        }
    }

    async fn invoke_model(
        &self,
        profile: Option<&str>,
        region: &str,
        model_id: &str,
        body: &serde_json::Value,
    ) -> ProbeOutcome<()> {
        let config = self.sdk_config(profile, region).await;
        let client = aws_sdk_bedrockruntime::Client::new(&config);
        let payload = match serde_json::to_vec(body) {
            Ok(bytes) => bytes,
            Err(err) => return ProbeOutcome::Fault(err.to_string()),
        };
        match client
            .invoke_model()
            .model_id(model_id)
            .content_type("application/json")
            .body(aws_sdk_bedrockruntime::primitives::Blob::new(payload))
            .send()
            .await
        {
            Ok(_) => ProbeOutcome::Ok(()),
            Err(err) => classify_remote_error(&format!("{}", DisplayErrorContext(&err))),
        }
    }

    async fn model_detail(
        &self,
        profile: Option<&str>,
        region: &str,
        model_id: &str,
    ) -> ProbeOutcome<ModelDetail> {
        let config = self.sdk_config(profile, region).await;
        let client = aws_sdk_bedrock::Client::new(&config);
        match client
            .get_foundation_model()
            .model_identifier(model_id)
            .send()
            .await
        {
            Ok(output) => {
                let detail = output.model_details().map_or_else(ModelDetail::default, |d| {
                    ModelDetail {
                        input_modalities: d
                            .input_modalities()
                            .iter()
                            .map(|m| m.as_str().to_string())
                            .collect(),
                        output_modalities: d
                            .output_modalities()
                            .iter()
                            .map(|m| m.as_str().to_string())
                            .collect(),
                        streaming_supported: d.response_streaming_supported(),
                        inference_types: d
                            .inference_types_supported()
                            .iter()
                            .map(|t| t.as_str().to_string())
                            .collect(),
                    }
                });
                ProbeOutcome::Ok(detail)
            }
            Err(err) => classify_remote_error(&format!("{}", DisplayErrorContext(&err))),
        }
    }
}
