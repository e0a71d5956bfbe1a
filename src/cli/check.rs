//! The check command: resolve profiles and regions, run the probes, render
//! and export.

use crate::cli::args::Cli;
use crate::cli::prompt;
use crate::core::catalog::{self, BEDROCK_REGIONS};
use crate::core::ledger::ProfileRunSet;
use crate::core::orchestrator::{CheckRunner, RunOptions};
use crate::error::{BedcheckError, Result};
use crate::export;
use crate::probes::BedrockProbe;
use crate::probes::aws::AwsProbe;
use crate::render::{compare, dashboard};

/// Execute a full check run.
pub async fn execute(cli: &Cli, no_color: bool) -> Result<()> {
    let probe = AwsProbe::new();

    let profiles = resolve_profiles(cli, &probe).await?;
    let regions = resolve_regions(cli)?;

    if cli.test_invoke {
        println!(
            "Note: --test-invoke performs real model invocations and may incur small AWS charges.\n"
        );
    }

    let options = RunOptions {
        test_invoke: cli.test_invoke,
        advanced: cli.advanced,
        sagemaker_alternatives: cli.sagemaker_alternatives,
        estimate_costs: cli.estimate_costs,
        ..RunOptions::default()
    }
    .with_regions(regions);

    let runner = CheckRunner::new(&probe, options);
    let run_set = runner.run_profiles(&profiles).await;

    render(&run_set, cli, no_color);
    export_results(&run_set, cli)?;

    Ok(())
}

/// Resolve which profiles to check, in order of precedence: --all-profiles,
/// explicit --profile flags, --interactive, then the ambient default chain.
async fn resolve_profiles<P: BedrockProbe>(cli: &Cli, probe: &P) -> Result<Vec<Option<String>>> {
    if cli.all_profiles {
        let known = probe.list_profiles().await;
        if known.is_empty() {
            return Err(BedcheckError::Config(
                "no profiles found in AWS configuration".to_string(),
            ));
        }
        return Ok(known.into_iter().map(Some).collect());
    }
    if !cli.profiles.is_empty() {
        // Unknown names are not rejected here; the credential probe reports
        // them per profile so one bad name cannot abort a multi-profile run.
        return Ok(cli.profiles.iter().cloned().map(Some).collect());
    }
    if cli.interactive {
        let known = probe.list_profiles().await;
        return prompt::select_profiles(&known);
    }
    Ok(vec![None])
}

/// Resolve which regions to probe. Empty means "use the defaults".
fn resolve_regions(cli: &Cli) -> Result<Vec<String>> {
    if cli.all_regions {
        return Ok(BEDROCK_REGIONS.iter().map(|r| r.code.to_string()).collect());
    }
    if !cli.regions.is_empty() {
        for region in &cli.regions {
            if !catalog::is_known_region(region) {
                tracing::warn!(region, "region is not in the known Bedrock catalog");
                println!("Warning: '{region}' is not a known Bedrock region; checking anyway.");
            }
        }
        return Ok(cli.regions.clone());
    }
    if cli.interactive {
        return prompt::select_regions();
    }
    Ok(Vec::new())
}

fn render(run_set: &ProfileRunSet, cli: &Cli, no_color: bool) {
    for (name, ledger) in run_set.iter() {
        if run_set.len() > 1 {
            println!("\n=== Profile: {name} ===");
        }
        print!("{}", dashboard::render(ledger, no_color));
    }
    if cli.compare && run_set.len() > 1 {
        println!();
        print!("{}", compare::render(run_set, no_color));
    }
}

/// Write one export file per profile. Multi-profile runs prefix each file
/// with the profile name so they do not clobber each other.
fn export_results(run_set: &ProfileRunSet, cli: &Cli) -> Result<()> {
    let Some(format) = cli.output else {
        return Ok(());
    };
    let multi = run_set.len() > 1;
    let dir = std::env::current_dir()?;
    for (name, ledger) in run_set.iter() {
        let prefix = multi.then_some(name);
        let path = export::write_ledger(ledger, format, &dir, prefix)?;
        println!("Results exported to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("bedcheck").chain(args.iter().copied()))
    }

    #[test]
    fn all_regions_expands_catalog() {
        let regions = resolve_regions(&cli(&["-a"])).unwrap();
        assert_eq!(regions.len(), BEDROCK_REGIONS.len());
        assert!(regions.contains(&"eu-west-1".to_string()));
    }

    #[test]
    fn explicit_regions_pass_through() {
        let regions = resolve_regions(&cli(&["-r", "eu-central-1"])).unwrap();
        assert_eq!(regions, vec!["eu-central-1"]);
    }

    #[test]
    fn no_region_flags_defer_to_defaults() {
        let regions = resolve_regions(&cli(&[])).unwrap();
        assert!(regions.is_empty());
        let options = RunOptions::default().with_regions(regions);
        assert_eq!(options.regions, catalog::DEFAULT_REGIONS);
    }
}
