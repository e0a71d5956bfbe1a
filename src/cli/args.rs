//! CLI argument definitions using clap.

use clap::Parser;

use crate::export::ExportFormat;

/// bedcheck - Verify AWS Bedrock access for one or more profiles.
#[derive(Parser, Debug)]
#[command(name = "bedcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// AWS profile to check (repeatable)
    #[arg(short = 'p', long = "profile", value_name = "NAME")]
    pub profiles: Vec<String>,

    /// Check every profile found in the local AWS configuration
    #[arg(short = 'P', long)]
    pub all_profiles: bool,

    /// Pick profiles and regions interactively
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Region to check (repeatable; defaults to us-east-1 and us-west-2)
    #[arg(short = 'r', long = "region", value_name = "REGION")]
    pub regions: Vec<String>,

    /// Check every known Bedrock region
    #[arg(short = 'a', long)]
    pub all_regions: bool,

    /// Attempt a minimal real invocation per available key model (may incur
    /// small AWS charges)
    #[arg(short = 't', long)]
    pub test_invoke: bool,

    /// Fetch per-model capability detail (modalities, streaming)
    #[arg(short = 'v', long)]
    pub advanced: bool,

    /// Suggest SageMaker JumpStart alternatives for missing key models
    #[arg(short = 's', long)]
    pub sagemaker_alternatives: bool,

    /// Include a cost-estimate section (not yet implemented)
    #[arg(short = 'e', long)]
    pub estimate_costs: bool,

    /// Render a cross-profile comparison after the per-profile dashboards
    #[arg(short = 'c', long)]
    pub compare: bool,

    /// Export results to a timestamped file in the current directory
    #[arg(short = 'o', long, value_enum, value_name = "FORMAT")]
    pub output: Option<ExportFormat>,

    // === Global flags ===
    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log level
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit JSONL logs to stderr
    #[arg(long)]
    pub json_output: bool,

    /// Verbose logging (sets log level to debug)
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    /// Validate argument combinations.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::BedcheckError;

        if self.all_profiles && !self.profiles.is_empty() {
            return Err(BedcheckError::Config(
                "--all-profiles conflicts with --profile".to_string(),
            ));
        }
        if self.all_profiles && self.interactive {
            return Err(BedcheckError::Config(
                "--all-profiles conflicts with --interactive".to_string(),
            ));
        }
        if self.all_regions && !self.regions.is_empty() {
            return Err(BedcheckError::Config(
                "--all-regions conflicts with --region".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn repeatable_profile_flag() {
        let cli = Cli::parse_from(["bedcheck", "-p", "work", "-p", "staging"]);
        assert_eq!(cli.profiles, vec!["work", "staging"]);
    }

    #[test]
    fn all_profiles_conflicts_with_profile() {
        let cli = Cli::parse_from(["bedcheck", "-P", "-p", "work"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn all_regions_conflicts_with_region() {
        let cli = Cli::parse_from(["bedcheck", "-a", "-r", "eu-west-1"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn output_format_parses() {
        let cli = Cli::parse_from(["bedcheck", "-o", "csv"]);
        assert_eq!(cli.output, Some(ExportFormat::Csv));
    }
}
