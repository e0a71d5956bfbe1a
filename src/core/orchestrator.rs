//! The run orchestrator: drives probes for one profile across regions.
//!
//! Per-profile state machine, terminal on the first of:
//! 1. credential probe fails (only `aws_credentials` populated),
//! 2. region discovery finds nothing (`aws_credentials` + `bedrock_regions`
//!    populated, rest left at INFO),
//! 3. all mandatory and requested optional probes run to completion.
//!
//! Each profile gets a fresh [`Ledger`] owned by this module for the duration
//! of the run; nothing is shared across profiles.

use std::collections::HashMap;

use crate::core::catalog::{self, KEY_MODELS, ModelFamily};
use crate::core::ledger::{Category, CategoryResult, Ledger, ProfileRunSet};
use crate::core::status::Status;
use crate::core::version::{MIN_CLIENT_VERSION, version_less_than};
use crate::probes::{BedrockProbe, CredentialOutcome, ModelSummary, ProbeOutcome};

// =============================================================================
// Options
// =============================================================================

/// What a run should probe beyond the mandatory categories.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Regions to probe, in order. Never empty.
    pub regions: Vec<String>,
    /// Attempt a minimal real invocation per confirmed key model.
    pub test_invoke: bool,
    /// Fetch per-model capability detail.
    pub advanced: bool,
    /// Suggest SageMaker JumpStart alternatives for missing key models.
    pub sagemaker_alternatives: bool,
    /// Accepted but unimplemented; records a stub category.
    pub estimate_costs: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            regions: catalog::DEFAULT_REGIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
            test_invoke: false,
            advanced: false,
            sagemaker_alternatives: false,
            estimate_costs: false,
        }
    }
}

impl RunOptions {
    /// Replace the region list, falling back to the defaults when empty.
    #[must_use]
    pub fn with_regions(mut self, regions: Vec<String>) -> Self {
        if !regions.is_empty() {
            self.regions = regions;
        }
        self
    }
}

// =============================================================================
// Runner
// =============================================================================

/// Drives the probe sequence and owns each profile's ledger while it runs.
pub struct CheckRunner<'a, P> {
    probe: &'a P,
    options: RunOptions,
}

impl<'a, P: BedrockProbe> CheckRunner<'a, P> {
    pub const fn new(probe: &'a P, options: RunOptions) -> Self {
        Self { probe, options }
    }

    /// Run every profile in order, each against a fresh ledger.
    pub async fn run_profiles(&self, profiles: &[Option<String>]) -> ProfileRunSet {
        let mut run_set = ProfileRunSet::new();
        for profile in profiles {
            let name = profile.as_deref();
            tracing::info!(profile = name.unwrap_or("default"), "checking profile");
            let ledger = self.run_profile(name).await;
            run_set.insert(name, ledger);
        }
        run_set
    }

    /// Run all checks for one profile.
    pub async fn run_profile(&self, profile: Option<&str>) -> Ledger {
        let mut ledger = Ledger::new();

        if !self.check_credentials(&mut ledger, profile).await {
            return ledger;
        }

        let available_regions = self.check_regions(&mut ledger, profile).await;
        if available_regions.is_empty() {
            return ledger;
        }

        // Fixed per-region order: runtime, model listing, key models. The
        // key-model check only considers models listed in that same region.
        let mut first_region_for_model: HashMap<String, String> = HashMap::new();
        for region in &available_regions {
            self.check_runtime(&mut ledger, profile, region).await;
            let listed = self.check_models(&mut ledger, profile, region).await;
            for model in &listed {
                first_region_for_model
                    .entry(model.model_id.clone())
                    .or_insert_with(|| region.clone());
            }
            apply_key_models(ledger.category_mut(Category::KeyModels), &listed);
        }
        finalize_runtime(ledger.category_mut(Category::BedrockRuntime));

        if self.options.test_invoke {
            self.check_invocations(&mut ledger, profile, &first_region_for_model)
                .await;
        }
        if self.options.advanced {
            self.check_model_details(&mut ledger, profile, &first_region_for_model)
                .await;
        }
        if self.options.sagemaker_alternatives {
            check_sagemaker_alternatives(&mut ledger);
        }
        if self.options.estimate_costs {
            let costs = ledger.category_mut(Category::CostEstimates);
            costs.push_detail("Cost estimation is not implemented");
        }

        ledger
    }

    /// Credential check. Returns false when the run must short-circuit.
    async fn check_credentials(&self, ledger: &mut Ledger, profile: Option<&str>) -> bool {
        let result = ledger.category_mut(Category::AwsCredentials);
        match self.probe.verify_credentials(profile).await {
            CredentialOutcome::Valid(info) => {
                result.push_detail(format!("Valid AWS credentials found from: {}", info.source));
                if let Some(version) = &info.client_version {
                    result.push_detail(format!("Client library version: {version}"));
                    if version_less_than(version, MIN_CLIENT_VERSION) {
                        result.push_detail(format!(
                            "WARNING: client library version {version} may be too old for \
                             Bedrock; {MIN_CLIENT_VERSION} or newer is recommended"
                        ));
                        result.status = Status::Warning;
                    }
                }
                if let Some(account) = &info.account {
                    result.push_detail(format!("AWS Account: {account}"));
                }
                if let Some(identity) = &info.identity {
                    result.push_detail(format!("Identity Type: {identity}"));
                }
                result.set_status_if_unset(Status::Success);
                true
            }
            CredentialOutcome::ProfileNotFound {
                profile,
                known_profiles,
            } => {
                result.push_error(format!(
                    "Profile '{profile}' not found in AWS configuration"
                ));
                let known = if known_profiles.is_empty() {
                    "none".to_string()
                } else {
                    known_profiles.join(", ")
                };
                result.push_detail(format!("Available profiles: {known}"));
                result.status = Status::Error;
                false
            }
            CredentialOutcome::Missing => {
                result.push_error("No AWS credentials found");
                result.push_detail(
                    "Run 'aws configure', or set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY",
                );
                result.status = Status::Error;
                false
            }
            CredentialOutcome::Invalid(reason) => {
                result.push_error(format!("AWS credentials found but not valid: {reason}"));
                result.status = Status::Error;
                false
            }
        }
    }

    /// Region discovery. Returns the regions confirmed available.
    async fn check_regions(&self, ledger: &mut Ledger, profile: Option<&str>) -> Vec<String> {
        let mut denied = 0usize;
        let mut unavailable = 0usize;

        let result = ledger.category_mut(Category::BedrockRegions);
        for region in &self.options.regions {
            match self.probe.check_region(profile, region).await {
                ProbeOutcome::Ok(()) => {
                    result.confirm_available(region);
                    result.push_detail(format!(
                        "Region {region}: Available - Successfully connected"
                    ));
                }
                ProbeOutcome::Denied(reason) => {
                    denied += 1;
                    result.push_error(format!("Region {region}: {reason}"));
                }
                ProbeOutcome::Unavailable(_) => {
                    unavailable += 1;
                    result.push_detail(format!("Region {region}: Not available"));
                }
                ProbeOutcome::Fault(message) => {
                    result.push_error(format!("Region {region}: Error - {message}"));
                }
            }
        }

        result.status = if !result.available.is_empty() {
            Status::Success
        } else if denied > 0 {
            Status::Error
        } else if unavailable == self.options.regions.len() {
            Status::Warning
        } else {
            Status::Error
        };

        result.available.clone()
    }

    async fn check_runtime(&self, ledger: &mut Ledger, profile: Option<&str>, region: &str) {
        let result = ledger.category_mut(Category::BedrockRuntime);
        match self.probe.runtime_access(profile, region).await {
            ProbeOutcome::Ok(()) => {
                result.confirm_available(region);
                result.push_detail(format!("bedrock-runtime accessible in {region}"));
                result.set_status_unless_error(Status::Success);
            }
            ProbeOutcome::Unavailable(_) => {
                result.push_detail(format!("bedrock-runtime not available in {region}"));
            }
            ProbeOutcome::Denied(reason) | ProbeOutcome::Fault(reason) => {
                result.push_error(format!("bedrock-runtime in {region}: {reason}"));
                if result.available.is_empty() {
                    result.status = Status::Error;
                }
            }
        }
    }

    /// Model listing for one region. Returns that region's listing.
    async fn check_models(
        &self,
        ledger: &mut Ledger,
        profile: Option<&str>,
        region: &str,
    ) -> Vec<ModelSummary> {
        let result = ledger.category_mut(Category::BedrockModels);
        match self.probe.list_models(profile, region).await {
            ProbeOutcome::Ok(models) => {
                if models.is_empty() {
                    result.push_detail(format!(
                        "No models found in {region}. Bedrock may not be enabled for this account."
                    ));
                    result.set_status_if_unset(Status::Warning);
                } else {
                    for model in &models {
                        result.confirm_available(&model.model_id);
                    }
                    result.push_detail(format!("Found {} models in {region}", models.len()));
                    result.set_status_unless_error(Status::Success);
                }
                models
            }
            ProbeOutcome::Unavailable(_) => {
                result.push_detail(format!("Model listing not available in {region}"));
                Vec::new()
            }
            ProbeOutcome::Denied(reason) | ProbeOutcome::Fault(reason) => {
                result.push_error(format!("Listing models in {region}: {reason}"));
                if result.available.is_empty() {
                    result.status = Status::Error;
                }
                Vec::new()
            }
        }
    }

    async fn check_invocations(
        &self,
        ledger: &mut Ledger,
        profile: Option<&str>,
        first_region_for_model: &HashMap<String, String>,
    ) {
        let key_models = ledger.mandatory(Category::KeyModels).available.clone();
        let result = ledger.category_mut(Category::ModelInvocations);
        for model_id in key_models {
            let Some(region) = first_region_for_model.get(&model_id) else {
                continue;
            };
            let body = ModelFamily::from_model_id(&model_id).minimal_request_body();
            match self
                .probe
                .invoke_model(profile, region, &model_id, &body)
                .await
            {
                ProbeOutcome::Ok(()) => {
                    result.confirm_available(&model_id);
                    result.push_detail(format!("{model_id}: invocation succeeded in {region}"));
                    result.set_status_unless_error(Status::Success);
                }
                ProbeOutcome::Unavailable(_) => {
                    result.push_detail(format!("{model_id}: invocation not supported in {region}"));
                }
                ProbeOutcome::Denied(reason) | ProbeOutcome::Fault(reason) => {
                    result.push_error(format!("{model_id}: {reason}"));
                    if result.available.is_empty() {
                        result.status = Status::Error;
                    }
                }
            }
        }
    }

    async fn check_model_details(
        &self,
        ledger: &mut Ledger,
        profile: Option<&str>,
        first_region_for_model: &HashMap<String, String>,
    ) {
        let key_models = ledger.mandatory(Category::KeyModels).available.clone();
        let result = ledger.category_mut(Category::ModelDetails);
        for model_id in key_models {
            let Some(region) = first_region_for_model.get(&model_id) else {
                continue;
            };
            match self.probe.model_detail(profile, region, &model_id).await {
                ProbeOutcome::Ok(detail) => {
                    result.confirm_available(&model_id);
                    let streaming = match detail.streaming_supported {
                        Some(true) => "yes",
                        Some(false) => "no",
                        None => "unknown",
                    };
                    result.push_detail(format!(
                        "{model_id}: input [{}], output [{}], streaming: {streaming}, \
                         inference [{}]",
                        detail.input_modalities.join(", "),
                        detail.output_modalities.join(", "),
                        detail.inference_types.join(", "),
                    ));
                    result.set_status_unless_error(Status::Success);
                }
                ProbeOutcome::Unavailable(_) => {
                    result.push_detail(format!("{model_id}: no detail available"));
                }
                ProbeOutcome::Denied(reason) | ProbeOutcome::Fault(reason) => {
                    result.push_error(format!("{model_id}: {reason}"));
                    if result.available.is_empty() {
                        result.status = Status::Error;
                    }
                }
            }
        }
    }
}

// =============================================================================
// Per-category helpers
// =============================================================================

/// Fold one region's listing into the cumulative key-model sets.
///
/// Idempotent: re-applying the same listing changes nothing. A model found in
/// a later region is promoted out of `missing`.
fn apply_key_models(result: &mut CategoryResult, listed: &[ModelSummary]) {
    for key_model in KEY_MODELS {
        let found = listed.iter().any(|m| m.model_id == key_model.id);
        if found {
            if result.confirm_available(key_model.id) {
                result.push_detail(format!("{}: Available ({})", key_model.id, key_model.purpose));
            }
        } else if result.mark_missing(key_model.id) {
            result.push_detail(format!("{}: Not available", key_model.id));
        }
    }

    result.status = if result.available.is_empty() {
        Status::Error
    } else if result.missing.is_empty() {
        Status::Success
    } else {
        Status::Warning
    };
}

/// After all regions ran: zero successful regions means ERROR, regardless of
/// why each region failed.
fn finalize_runtime(result: &mut CategoryResult) {
    if result.available.is_empty() {
        result.status = Status::Error;
    }
}

/// Look up curated JumpStart alternatives for every missing key model.
fn check_sagemaker_alternatives(ledger: &mut Ledger) {
    let missing = ledger.mandatory(Category::KeyModels).missing.clone();
    let result = ledger.category_mut(Category::SagemakerAlternatives);
    if missing.is_empty() {
        result.push_detail("No key models are missing; nothing to suggest");
        result.status = Status::Success;
        return;
    }
    for model_id in &missing {
        let alternatives = catalog::sagemaker_alternatives(model_id);
        if alternatives.is_empty() {
            result.push_detail(format!("{model_id}: no curated JumpStart alternative"));
        } else {
            for alternative in alternatives {
                result.confirm_available(*alternative);
                result.push_detail(format!(
                    "{model_id}: consider SageMaker JumpStart model {alternative}"
                ));
            }
        }
    }
    result.status = if result.available.is_empty() {
        Status::Warning
    } else {
        Status::Success
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summaries(ids: &[&str]) -> Vec<ModelSummary> {
        ids.iter()
            .map(|id| ModelSummary {
                model_id: (*id).to_string(),
                provider_name: "Test".to_string(),
            })
            .collect()
    }

    #[test]
    fn key_models_all_found_is_success() {
        let mut result = CategoryResult::default();
        let ids: Vec<&str> = KEY_MODELS.iter().map(|m| m.id).collect();
        apply_key_models(&mut result, &summaries(&ids));
        assert_eq!(result.status, Status::Success);
        assert!(result.missing.is_empty());
        assert_eq!(result.available.len(), KEY_MODELS.len());
    }

    #[test]
    fn key_models_partial_is_warning() {
        let mut result = CategoryResult::default();
        apply_key_models(&mut result, &summaries(&[KEY_MODELS[0].id]));
        assert_eq!(result.status, Status::Warning);
        assert_eq!(result.available.len(), 1);
        assert_eq!(result.missing.len(), KEY_MODELS.len() - 1);
    }

    #[test]
    fn key_models_none_found_is_error() {
        let mut result = CategoryResult::default();
        apply_key_models(&mut result, &summaries(&["some.other-model-v1"]));
        assert_eq!(result.status, Status::Error);
        assert!(result.available.is_empty());
    }

    #[test]
    fn key_models_reapply_is_idempotent() {
        let mut result = CategoryResult::default();
        let listing = summaries(&[KEY_MODELS[0].id]);
        apply_key_models(&mut result, &listing);
        let after_first = result.clone();
        apply_key_models(&mut result, &listing);
        assert_eq!(result, after_first);
    }

    #[test]
    fn key_model_promoted_when_found_in_later_region() {
        let mut result = CategoryResult::default();
        apply_key_models(&mut result, &summaries(&[KEY_MODELS[0].id]));
        assert!(result.missing.contains(&KEY_MODELS[1].id.to_string()));
        apply_key_models(&mut result, &summaries(&[KEY_MODELS[1].id]));
        assert!(result.available.contains(&KEY_MODELS[1].id.to_string()));
        assert!(!result.missing.contains(&KEY_MODELS[1].id.to_string()));
    }

    #[test]
    fn runtime_with_no_successful_region_is_error() {
        let mut result = CategoryResult::default();
        result.push_detail("bedrock-runtime not available in us-east-1");
        finalize_runtime(&mut result);
        assert_eq!(result.status, Status::Error);
    }

    #[test]
    fn sagemaker_suggestions_for_missing_models() {
        let mut ledger = Ledger::new();
        ledger
            .category_mut(Category::KeyModels)
            .mark_missing(KEY_MODELS[0].id);
        check_sagemaker_alternatives(&mut ledger);
        let result = ledger.category(Category::SagemakerAlternatives).unwrap();
        assert_eq!(result.status, Status::Success);
        assert!(!result.available.is_empty());
    }

    #[test]
    fn sagemaker_with_nothing_missing_is_noop_success() {
        let mut ledger = Ledger::new();
        check_sagemaker_alternatives(&mut ledger);
        let result = ledger.category(Category::SagemakerAlternatives).unwrap();
        assert_eq!(result.status, Status::Success);
        assert!(result.available.is_empty());
    }

    #[test]
    fn default_options_use_catalog_defaults() {
        let options = RunOptions::default();
        assert_eq!(options.regions, catalog::DEFAULT_REGIONS);
        let options = options.with_regions(Vec::new());
        assert_eq!(options.regions, catalog::DEFAULT_REGIONS);
        let options = options.with_regions(vec!["eu-west-1".to_string()]);
        assert_eq!(options.regions, vec!["eu-west-1"]);
    }
}
