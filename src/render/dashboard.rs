//! Single-profile summary dashboard.

use chrono::Local;
use colored::Colorize;

use crate::core::ledger::{Category, CategoryResult, Ledger};
use crate::core::status::Status;
use crate::render::{paint_status, section_header};

const STATUS_WIDTH: usize = 14;
const COMPONENT_WIDTH: usize = 24;

/// Render the full dashboard for one finished ledger.
#[must_use]
pub fn render(ledger: &Ledger, no_color: bool) -> String {
    let mut output = String::new();

    output.push_str(&section_header(
        "AWS Bedrock Access Verification Summary",
        no_color,
    ));
    output.push('\n');
    output.push_str(&format!(
        "{:<COMPONENT_WIDTH$} {:<STATUS_WIDTH$} Details\n",
        "Component", "Status"
    ));

    for (category, result) in ledger.iter() {
        output.push_str(&format!(
            "{:<COMPONENT_WIDTH$} {} {}\n",
            category.display_name(),
            paint_status(result.status, STATUS_WIDTH, no_color),
            summary_line(category, result),
        ));
    }

    let overall = ledger.overall_status();
    output.push('\n');
    output.push_str(&overall_line(overall, no_color));
    output.push('\n');
    output.push_str(&format!(
        "Check completed at: {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    if overall != Status::Success {
        output.push_str(&render_troubleshooting(ledger, no_color));
    }
    output.push_str(&render_next_steps(overall, no_color));

    output
}

/// One-line summary per category: counts where they tell the story, first
/// detail or error otherwise.
fn summary_line(category: Category, result: &CategoryResult) -> String {
    match category {
        Category::BedrockRegions => {
            if result.available.is_empty() {
                first_line(result)
            } else {
                format!(
                    "{} available regions: {}",
                    result.available.len(),
                    result.available.join(", ")
                )
            }
        }
        Category::BedrockModels => {
            if result.available.is_empty() {
                first_line(result)
            } else {
                format!("{} models available", result.available.len())
            }
        }
        Category::KeyModels => {
            let available = result.available.len();
            let total = available + result.missing.len();
            if total == 0 {
                first_line(result)
            } else if available == 0 {
                format!("{available}/{total} key models available (no key models available)")
            } else if available < total {
                format!("{available}/{total} key models available (partial access)")
            } else {
                format!("{available}/{total} key models available")
            }
        }
        _ => first_line(result),
    }
}

fn first_line(result: &CategoryResult) -> String {
    result
        .details
        .first()
        .or_else(|| result.errors.first())
        .cloned()
        .unwrap_or_default()
}

fn overall_line(overall: Status, no_color: bool) -> String {
    let message = match overall {
        Status::Success => "Your Bedrock setup looks good!",
        Status::Warning => "Your Bedrock setup has some issues but may work for some use cases",
        Status::Error => "There are critical issues with your Bedrock setup",
        Status::Info => "Some checks were inconclusive",
    };
    let line = format!("Overall Status: {}\n{message}", overall.label());
    if no_color {
        return line;
    }
    match overall {
        Status::Success => line.green(),
        Status::Warning => line.yellow(),
        Status::Error => line.red(),
        Status::Info => line.blue(),
    }
    .to_string()
}

/// Actionable hints keyed off which categories need attention. Every error
/// recorded in the ledger is also listed verbatim under its category.
fn render_troubleshooting(ledger: &Ledger, no_color: bool) -> String {
    let mut output = String::new();
    output.push('\n');
    output.push_str(&section_header("Troubleshooting", no_color));
    output.push('\n');

    let hints: &[(Category, &[&str])] = &[
        (
            Category::AwsCredentials,
            &[
                "Run 'aws configure' to set up credentials",
                "Verify your credentials have Bedrock permissions",
            ],
        ),
        (
            Category::BedrockRegions,
            &[
                "Make sure Bedrock is enabled in your AWS account",
                "Check that your IAM permissions include bedrock:ListFoundationModels",
                "Verify you are checking regions where Bedrock is available",
            ],
        ),
        (
            Category::BedrockRuntime,
            &[
                "Verify your IAM permissions include bedrock-runtime actions",
                "Check that the Bedrock endpoint is reachable from your network",
            ],
        ),
        (
            Category::KeyModels,
            &[
                "Request model access in the AWS console: \
                 https://console.aws.amazon.com/bedrock/home#/modelaccess",
                "Some models require accepting vendor terms before access is granted",
            ],
        ),
    ];

    for (category, lines) in hints {
        let Some(result) = ledger.category(*category) else {
            continue;
        };
        if !result.status.needs_attention() {
            continue;
        }
        output.push_str(&format!("{}:\n", category.display_name()));
        for error in &result.errors {
            output.push_str(&format!("  ! {error}\n"));
        }
        for line in *lines {
            output.push_str(&format!("  - {line}\n"));
        }
    }

    output
}

fn render_next_steps(overall: Status, no_color: bool) -> String {
    let mut output = String::new();
    output.push('\n');
    output.push_str(&section_header("Next Steps", no_color));
    output.push('\n');
    if overall == Status::Success {
        output.push_str("  Your setup looks good! You can start using Bedrock services.\n");
        output.push_str(
            "  Usage examples: https://docs.aws.amazon.com/bedrock/latest/userguide/\n",
        );
    } else {
        output.push_str("  1. Address the issues highlighted above\n");
        output.push_str("  2. Run bedcheck again to verify your changes\n");
        output.push_str("  3. See the Bedrock documentation for IAM policies and setup\n");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_empty_ledger_without_panicking() {
        let ledger = Ledger::new();
        let output = render(&ledger, true);
        assert!(output.contains("AWS Credentials"));
        assert!(output.contains("Key Models"));
        assert!(output.contains(Status::Info.label()));
    }

    #[test]
    fn region_summary_lists_available_regions() {
        let mut ledger = Ledger::new();
        let regions = ledger.category_mut(Category::BedrockRegions);
        regions.confirm_available("us-east-1");
        regions.confirm_available("us-west-2");
        regions.status = Status::Success;

        let output = render(&ledger, true);
        assert!(output.contains("2 available regions: us-east-1, us-west-2"));
    }

    #[test]
    fn key_model_summary_shows_partial_access() {
        let mut ledger = Ledger::new();
        let key_models = ledger.category_mut(Category::KeyModels);
        key_models.confirm_available("m1");
        key_models.mark_missing("m2");
        key_models.status = Status::Warning;

        let output = render(&ledger, true);
        assert!(output.contains("1/2 key models available (partial access)"));
    }

    #[test]
    fn troubleshooting_shown_for_errors() {
        let mut ledger = Ledger::new();
        let creds = ledger.category_mut(Category::AwsCredentials);
        creds.push_error("No AWS credentials found");
        creds.status = Status::Error;

        let output = render(&ledger, true);
        assert!(output.contains("Troubleshooting"));
        assert!(output.contains("! No AWS credentials found"));
        assert!(output.contains("aws configure"));
    }

    #[test]
    fn success_run_has_no_troubleshooting() {
        let mut ledger = Ledger::new();
        for &category in Category::MANDATORY {
            ledger.category_mut(category).status = Status::Success;
        }
        let output = render(&ledger, true);
        assert!(!output.contains("Troubleshooting"));
        assert!(output.contains("looks good"));
    }
}
