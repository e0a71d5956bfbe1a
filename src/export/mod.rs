//! Ledger snapshot export to timestamped files.

use std::path::{Path, PathBuf};

use chrono::Local;
use clap::ValueEnum;

use crate::core::ledger::{Category, CategoryResult, Ledger};
use crate::error::Result;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Html,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Html => "html",
        }
    }
}

/// Build the export file name: `bedrock_check_<YYYYMMDD_HHMMSS>.<ext>`,
/// prefixed with `<profile>_` when multiple profiles produced files.
#[must_use]
pub fn export_file_name(format: ExportFormat, prefix: Option<&str>) -> String {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let prefix = prefix.map(|p| format!("{p}_")).unwrap_or_default();
    format!("{prefix}bedrock_check_{timestamp}.{}", format.extension())
}

/// Serialize a ledger snapshot and write it under `dir`. Returns the path of
/// the written file.
pub fn write_ledger(
    ledger: &Ledger,
    format: ExportFormat,
    dir: &Path,
    prefix: Option<&str>,
) -> Result<PathBuf> {
    let path = dir.join(export_file_name(format, prefix));
    let content = match format {
        ExportFormat::Json => serde_json::to_string_pretty(ledger)?,
        ExportFormat::Csv => to_csv(ledger),
        ExportFormat::Html => to_html(ledger),
    };
    std::fs::write(&path, content)?;
    Ok(path)
}

/// One row per category: component, status, summary.
fn to_csv(ledger: &Ledger) -> String {
    let mut output = String::from("Component,Status,Details\n");
    for (category, result) in ledger.iter() {
        // Commas inside a field would break the row; swap them for
        // semicolons like the detail strings already use.
        let details = row_summary(category, result).replace(',', ";");
        output.push_str(&format!(
            "{},{},{}\n",
            category.display_name(),
            result.status.label(),
            details
        ));
    }
    output
}

fn to_html(ledger: &Ledger) -> String {
    let mut rows = String::new();
    for (category, result) in ledger.iter() {
        rows.push_str(&format!(
            "    <tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(category.display_name()),
            escape_html(result.status.label()),
            escape_html(&row_summary(category, result)),
        ));
    }
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Bedrock Access Check</title></head>\n<body>\n\
         <h1>AWS Bedrock Access Check</h1>\n\
         <p>Overall status: {}</p>\n\
         <table border=\"1\">\n\
         \u{20}   <tr><th>Component</th><th>Status</th><th>Details</th></tr>\n{rows}</table>\n\
         </body>\n</html>\n",
        escape_html(ledger.overall_status().label())
    )
}

fn row_summary(category: Category, result: &CategoryResult) -> String {
    match category {
        Category::BedrockRegions => result.available.join("; "),
        Category::BedrockModels => format!("{} models available", result.available.len()),
        Category::KeyModels => {
            let available = result.available.len();
            format!(
                "{available}/{} key models available",
                available + result.missing.len()
            )
        }
        _ => result
            .details
            .first()
            .or_else(|| result.errors.first())
            .cloned()
            .unwrap_or_default(),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
