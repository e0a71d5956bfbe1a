//! Cross-profile comparison view.
//!
//! Four grids: per-category status, region availability, key-model
//! availability, and summary counts. Built from finished ledger snapshots
//! only; tolerates profiles whose runs short-circuited.

use std::collections::BTreeSet;

use crate::core::ledger::{Category, ProfileRunSet};
use crate::render::{paint_status, section_header};
use crate::util::format::short_model_name;

const NAME_WIDTH: usize = 20;
const STATUS_WIDTH: usize = 14;

/// Render the comparison for a set of profile runs.
#[must_use]
pub fn render(run_set: &ProfileRunSet, no_color: bool) -> String {
    let mut output = String::new();

    output.push_str(&section_header("Profile Comparison", no_color));
    output.push('\n');
    output.push_str(&render_status_grid(run_set, no_color));
    output.push('\n');
    output.push_str(&render_region_grid(run_set, no_color));
    output.push('\n');
    output.push_str(&render_model_grid(run_set, no_color));
    output.push('\n');
    output.push_str(&render_summary(run_set, no_color));

    output
}

fn render_status_grid(run_set: &ProfileRunSet, no_color: bool) -> String {
    let columns = [
        Category::AwsCredentials,
        Category::BedrockRegions,
        Category::BedrockModels,
        Category::KeyModels,
    ];

    let mut output = section_header("Status by Category", no_color);
    output.push('\n');
    output.push_str(&format!("{:<NAME_WIDTH$}", "Profile"));
    for category in columns {
        output.push_str(&format!(" {:<STATUS_WIDTH$}", category.display_name()));
    }
    output.push('\n');

    for (name, ledger) in run_set.iter() {
        output.push_str(&format!("{name:<NAME_WIDTH$}"));
        for category in columns {
            let status = ledger.mandatory(category).status;
            output.push_str(&format!(" {}", paint_status(status, STATUS_WIDTH, no_color)));
        }
        output.push('\n');
    }
    output
}

fn render_region_grid(run_set: &ProfileRunSet, no_color: bool) -> String {
    let all_regions: BTreeSet<&str> = run_set
        .iter()
        .flat_map(|(_, ledger)| {
            ledger
                .mandatory(Category::BedrockRegions)
                .available
                .iter()
                .map(String::as_str)
        })
        .collect();

    let mut output = section_header("Region Availability", no_color);
    output.push('\n');
    if all_regions.is_empty() {
        output.push_str("No region was available for any profile.\n");
        return output;
    }

    output.push_str(&format!("{:<NAME_WIDTH$}", "Profile"));
    for region in &all_regions {
        output.push_str(&format!(" {region:<16}"));
    }
    output.push('\n');

    for (name, ledger) in run_set.iter() {
        let available = &ledger.mandatory(Category::BedrockRegions).available;
        output.push_str(&format!("{name:<NAME_WIDTH$}"));
        for region in &all_regions {
            let mark = if available.iter().any(|r| r == region) {
                "\u{2713}"
            } else {
                "\u{2717}"
            };
            output.push_str(&format!(" {mark:<16}"));
        }
        output.push('\n');
    }
    output
}

fn render_model_grid(run_set: &ProfileRunSet, no_color: bool) -> String {
    let all_models: BTreeSet<&str> = run_set
        .iter()
        .flat_map(|(_, ledger)| {
            let key_models = ledger.mandatory(Category::KeyModels);
            key_models
                .available
                .iter()
                .chain(key_models.missing.iter())
                .map(String::as_str)
        })
        .collect();

    let mut output = section_header("Key Model Availability", no_color);
    output.push('\n');
    if all_models.is_empty() {
        output.push_str("No key model was checked for any profile.\n");
        return output;
    }

    output.push_str(&format!("{:<NAME_WIDTH$}", "Profile"));
    for model in &all_models {
        output.push_str(&format!(" {:<28}", short_model_name(model)));
    }
    output.push('\n');

    for (name, ledger) in run_set.iter() {
        let key_models = ledger.mandatory(Category::KeyModels);
        output.push_str(&format!("{name:<NAME_WIDTH$}"));
        for model in &all_models {
            let mark = if key_models.available.iter().any(|m| m == model) {
                "\u{2713}"
            } else if key_models.missing.iter().any(|m| m == model) {
                "\u{2717}"
            } else {
                "-"
            };
            output.push_str(&format!(" {mark:<28}"));
        }
        output.push('\n');
    }
    output
}

fn render_summary(run_set: &ProfileRunSet, no_color: bool) -> String {
    let mut output = section_header("Summary", no_color);
    output.push('\n');
    output.push_str(&format!(
        "{:<NAME_WIDTH$} {:<18} {:<18} {}\n",
        "Profile", "Available Regions", "Available Models", "Key Models"
    ));

    for (name, ledger) in run_set.iter() {
        let regions = ledger.mandatory(Category::BedrockRegions).available.len();
        let models = ledger.mandatory(Category::BedrockModels).available.len();
        let key_models = ledger.mandatory(Category::KeyModels);
        let key_available = key_models.available.len();
        let key_total = key_available + key_models.missing.len();
        output.push_str(&format!(
            "{name:<NAME_WIDTH$} {regions:<18} {models:<18} {key_available}/{key_total}\n"
        ));
    }

    output.push_str(&format!(
        "\n{}/{} profiles have Bedrock access.\n",
        run_set.profiles_with_access(),
        run_set.len()
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ledger::Ledger;
    use crate::core::status::Status;

    fn run_set_with_two_profiles() -> ProfileRunSet {
        let mut good = Ledger::new();
        for &category in Category::MANDATORY {
            good.category_mut(category).status = Status::Success;
        }
        good.category_mut(Category::BedrockRegions)
            .confirm_available("us-east-1");
        good.category_mut(Category::BedrockModels)
            .confirm_available("amazon.titan-embed-text-v1");
        good.category_mut(Category::KeyModels)
            .confirm_available("amazon.titan-embed-text-v1");
        good.category_mut(Category::KeyModels)
            .mark_missing("anthropic.claude-3-haiku-20240307-v1:0");

        let mut bad = Ledger::new();
        bad.category_mut(Category::AwsCredentials).status = Status::Error;

        let mut set = ProfileRunSet::new();
        set.insert(Some("good"), good);
        set.insert(Some("bad"), bad);
        set
    }

    #[test]
    fn comparison_tolerates_short_circuited_profiles() {
        let output = render(&run_set_with_two_profiles(), true);
        assert!(output.contains("good"));
        assert!(output.contains("bad"));
        assert!(output.contains("us-east-1"));
    }

    #[test]
    fn model_grid_marks_available_missing_and_unchecked() {
        let output = render(&run_set_with_two_profiles(), true);
        assert!(output.contains('\u{2713}'));
        assert!(output.contains('\u{2717}'));
        assert!(output.contains("titan-embed-text-v1"));
    }

    #[test]
    fn summary_counts_profiles_with_access() {
        let output = render(&run_set_with_two_profiles(), true);
        assert!(output.contains("1/2 profiles have Bedrock access."));
    }
}
