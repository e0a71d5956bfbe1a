//! The result ledger: per-category check results and status derivation.
//!
//! A fresh [`Ledger`] is created for each profile run and owned by the
//! orchestrator driving that run. Nothing here is global; the reporter only
//! sees a finished ledger.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::core::status::Status;

// =============================================================================
// Categories
// =============================================================================

/// Check categories, in dashboard order.
///
/// The first five are mandatory and always present in a ledger. The rest are
/// created lazily when the corresponding optional check runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    AwsCredentials,
    BedrockRegions,
    BedrockRuntime,
    BedrockModels,
    KeyModels,
    ModelInvocations,
    SagemakerAlternatives,
    ModelDetails,
    CostEstimates,
}

impl Category {
    /// The five categories every run populates (or short-circuits past).
    pub const MANDATORY: &'static [Self] = &[
        Self::AwsCredentials,
        Self::BedrockRegions,
        Self::BedrockRuntime,
        Self::BedrockModels,
        Self::KeyModels,
    ];

    /// Stable key used in serialized snapshots.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::AwsCredentials => "aws_credentials",
            Self::BedrockRegions => "bedrock_regions",
            Self::BedrockRuntime => "bedrock_runtime",
            Self::BedrockModels => "bedrock_models",
            Self::KeyModels => "key_models",
            Self::ModelInvocations => "model_invocations",
            Self::SagemakerAlternatives => "sagemaker_alternatives",
            Self::ModelDetails => "model_details",
            Self::CostEstimates => "cost_estimates",
        }
    }

    /// Display name for dashboards.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::AwsCredentials => "AWS Credentials",
            Self::BedrockRegions => "Bedrock Regions",
            Self::BedrockRuntime => "Bedrock Runtime",
            Self::BedrockModels => "Bedrock Models",
            Self::KeyModels => "Key Models",
            Self::ModelInvocations => "Model Invocations",
            Self::SagemakerAlternatives => "SageMaker Alternatives",
            Self::ModelDetails => "Model Details",
            Self::CostEstimates => "Cost Estimates",
        }
    }
}

// =============================================================================
// Category result
// =============================================================================

/// Accumulated findings for one category.
///
/// `details` and `errors` are append-only within a run. `available` and
/// `missing` are insertion-order-preserving, de-duplicated, and disjoint:
/// an identifier confirmed available is never added to `missing` afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryResult {
    pub status: Status,
    pub details: Vec<String>,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub available: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

impl CategoryResult {
    /// Append an informational detail line.
    pub fn push_detail(&mut self, detail: impl Into<String>) {
        self.details.push(detail.into());
    }

    /// Append an error line.
    pub fn push_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    /// Record an identifier as available.
    ///
    /// De-duplicates, and removes the identifier from `missing` so a later
    /// confirmation (e.g. the model turning up in another region) promotes
    /// it. Returns true when the set changed.
    pub fn confirm_available(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        self.missing.retain(|m| *m != id);
        if self.available.contains(&id) {
            false
        } else {
            self.available.push(id);
            true
        }
    }

    /// Record an identifier as missing, unless it was already confirmed
    /// available in this run. Returns true when the set changed.
    pub fn mark_missing(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.available.contains(&id) || self.missing.contains(&id) {
            false
        } else {
            self.missing.push(id);
            true
        }
    }

    /// Set the status only if no terminal status was recorded yet.
    pub fn set_status_if_unset(&mut self, status: Status) {
        if !self.status.is_set() {
            self.status = status;
        }
    }

    /// Upgrade to the given status unless an ERROR was already recorded.
    pub fn set_status_unless_error(&mut self, status: Status) {
        if self.status != Status::Error {
            self.status = status;
        }
    }
}

// =============================================================================
// Ledger
// =============================================================================

/// Per-profile aggregate of category results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    // Insertion-ordered; mandatory categories first, optional appended lazily.
    entries: Vec<(Category, CategoryResult)>,
}

impl Ledger {
    /// A fresh ledger with the five mandatory categories at INFO.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Category::MANDATORY
                .iter()
                .map(|&c| (c, CategoryResult::default()))
                .collect(),
        }
    }

    /// Read access to a category, if it exists in this ledger.
    #[must_use]
    pub fn category(&self, category: Category) -> Option<&CategoryResult> {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, r)| r)
    }

    /// Read access to a mandatory category.
    ///
    /// # Panics
    ///
    /// Panics if called with a non-mandatory category that has not run.
    #[must_use]
    pub fn mandatory(&self, category: Category) -> &CategoryResult {
        self.category(category)
            .unwrap_or_else(|| panic!("mandatory category {} absent", category.key()))
    }

    /// Mutable access; creates the category lazily for optional checks.
    pub fn category_mut(&mut self, category: Category) -> &mut CategoryResult {
        if let Some(pos) = self.entries.iter().position(|(c, _)| *c == category) {
            return &mut self.entries[pos].1;
        }
        self.entries.push((category, CategoryResult::default()));
        let last = self.entries.len() - 1;
        &mut self.entries[last].1
    }

    /// Iterate categories in dashboard order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryResult)> {
        self.entries.iter().map(|(c, r)| (*c, r))
    }

    /// Overall status across the mandatory categories.
    ///
    /// ERROR if any mandatory category is ERROR; else WARNING if any is
    /// WARNING; else SUCCESS if all five ran and report SUCCESS; else INFO
    /// (some check never ran, e.g. the run short-circuited).
    #[must_use]
    pub fn overall_status(&self) -> Status {
        let statuses: Vec<Status> = Category::MANDATORY
            .iter()
            .map(|&c| self.mandatory(c).status)
            .collect();

        if statuses.contains(&Status::Error) {
            Status::Error
        } else if statuses.contains(&Status::Warning) {
            Status::Warning
        } else if statuses.iter().all(|s| *s == Status::Success) {
            Status::Success
        } else {
            Status::Info
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for Ledger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, result) in &self.entries {
            map.serialize_entry(category.key(), result)?;
        }
        map.end()
    }
}

// =============================================================================
// Profile run set
// =============================================================================

/// Sentinel profile name used when no named profile is selected.
pub const DEFAULT_PROFILE: &str = "default";

/// Finished ledgers keyed by profile name, in run order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileRunSet {
    runs: Vec<(String, Ledger)>,
}

impl ProfileRunSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { runs: Vec::new() }
    }

    /// Store a finished ledger under the profile name (or the default
    /// sentinel). A re-run of the same profile replaces the earlier snapshot.
    pub fn insert(&mut self, profile: Option<&str>, ledger: Ledger) {
        let name = profile.unwrap_or(DEFAULT_PROFILE).to_string();
        if let Some(pos) = self.runs.iter().position(|(n, _)| *n == name) {
            self.runs[pos].1 = ledger;
        } else {
            self.runs.push((name, ledger));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Ledger> {
        self.runs.iter().find(|(n, _)| n == name).map(|(_, l)| l)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Ledger)> {
        self.runs.iter().map(|(n, l)| (n.as_str(), l))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// How many profiles ended the run with at least one key model available.
    #[must_use]
    pub fn profiles_with_access(&self) -> usize {
        self.runs
            .iter()
            .filter(|(_, ledger)| {
                ledger
                    .category(Category::KeyModels)
                    .is_some_and(|r| !r.available.is_empty())
            })
            .count()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ledger_has_mandatory_categories_at_info() {
        let ledger = Ledger::new();
        for &category in Category::MANDATORY {
            assert_eq!(ledger.mandatory(category).status, Status::Info);
        }
        assert_eq!(ledger.iter().count(), 5);
    }

    #[test]
    fn optional_categories_created_lazily() {
        let mut ledger = Ledger::new();
        assert!(ledger.category(Category::ModelInvocations).is_none());
        ledger
            .category_mut(Category::ModelInvocations)
            .push_detail("invoked");
        assert!(ledger.category(Category::ModelInvocations).is_some());
        assert_eq!(ledger.iter().count(), 6);
    }

    #[test]
    fn confirm_available_deduplicates() {
        let mut result = CategoryResult::default();
        assert!(result.confirm_available("us-east-1"));
        assert!(!result.confirm_available("us-east-1"));
        assert_eq!(result.available, vec!["us-east-1"]);
    }

    #[test]
    fn available_and_missing_stay_disjoint() {
        let mut result = CategoryResult::default();
        result.confirm_available("m1");
        assert!(!result.mark_missing("m1"));
        assert!(result.missing.is_empty());
    }

    #[test]
    fn later_confirmation_promotes_from_missing() {
        let mut result = CategoryResult::default();
        result.mark_missing("m2");
        assert_eq!(result.missing, vec!["m2"]);
        result.confirm_available("m2");
        assert!(result.missing.is_empty());
        assert_eq!(result.available, vec!["m2"]);
    }

    #[test]
    fn set_status_unless_error_is_monotone_after_error() {
        let mut result = CategoryResult::default();
        result.status = Status::Error;
        result.set_status_unless_error(Status::Success);
        assert_eq!(result.status, Status::Error);

        let mut result = CategoryResult::default();
        result.set_status_unless_error(Status::Success);
        assert_eq!(result.status, Status::Success);
    }

    #[test]
    fn overall_status_error_dominates() {
        let mut ledger = Ledger::new();
        for &category in Category::MANDATORY {
            ledger.category_mut(category).status = Status::Success;
        }
        ledger.category_mut(Category::BedrockRegions).status = Status::Error;
        assert_eq!(ledger.overall_status(), Status::Error);
    }

    #[test]
    fn overall_status_warning_beats_success() {
        let mut ledger = Ledger::new();
        for &category in Category::MANDATORY {
            ledger.category_mut(category).status = Status::Success;
        }
        ledger.category_mut(Category::BedrockRuntime).status = Status::Warning;
        assert_eq!(ledger.overall_status(), Status::Warning);
    }

    #[test]
    fn overall_status_all_success() {
        let mut ledger = Ledger::new();
        for &category in Category::MANDATORY {
            ledger.category_mut(category).status = Status::Success;
        }
        assert_eq!(ledger.overall_status(), Status::Success);
    }

    #[test]
    fn overall_status_info_when_short_circuited() {
        let mut ledger = Ledger::new();
        ledger.category_mut(Category::AwsCredentials).status = Status::Success;
        // Remaining mandatory categories never ran and no error was recorded.
        assert_eq!(ledger.overall_status(), Status::Info);
    }

    #[test]
    fn ledger_serializes_with_stable_keys() {
        let ledger = Ledger::new();
        let json = serde_json::to_string(&ledger).unwrap();
        for &category in Category::MANDATORY {
            assert!(json.contains(category.key()), "missing {}", category.key());
        }
    }

    #[test]
    fn run_set_preserves_insertion_order() {
        let mut set = ProfileRunSet::new();
        set.insert(Some("work"), Ledger::new());
        set.insert(None, Ledger::new());
        let names: Vec<&str> = set.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["work", DEFAULT_PROFILE]);
    }

    #[test]
    fn run_set_counts_profiles_with_access() {
        let mut with_access = Ledger::new();
        with_access
            .category_mut(Category::KeyModels)
            .confirm_available("amazon.titan-embed-text-v1");

        let mut set = ProfileRunSet::new();
        set.insert(Some("a"), with_access);
        set.insert(Some("b"), Ledger::new());
        assert_eq!(set.profiles_with_access(), 1);
    }
}
