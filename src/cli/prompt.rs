//! Interactive profile and region selection.
//!
//! Selection parsing is separated from the stdin plumbing so the parsing
//! rules are testable. Input is a comma-separated list of 1-based indices;
//! blank input means "take the defaults".

use std::io::{BufRead, Write};

use crate::core::catalog::{self, BEDROCK_REGIONS};
use crate::error::{BedcheckError, Result};

/// Prompt for profiles to check. Blank input selects the default profile.
pub fn select_profiles(known_profiles: &[String]) -> Result<Vec<Option<String>>> {
    if known_profiles.is_empty() {
        return Err(BedcheckError::Config(
            "no profiles found in AWS configuration".to_string(),
        ));
    }

    println!("Available AWS profiles:");
    for (index, name) in known_profiles.iter().enumerate() {
        println!("  {}. {name}", index + 1);
    }
    let input = read_line("Profiles to check (e.g. 1,3; blank for default): ")?;

    let indices = parse_selection(&input, known_profiles.len())
        .map_err(|bad| BedcheckError::Config(format!("invalid profile selection '{bad}'")))?;
    if indices.is_empty() {
        return Ok(vec![None]);
    }
    Ok(indices
        .into_iter()
        .map(|i| Some(known_profiles[i].clone()))
        .collect())
}

/// Prompt for regions to probe. Blank input selects the defaults.
pub fn select_regions() -> Result<Vec<String>> {
    println!("Known Bedrock regions:");
    let mut group = "";
    for (index, region) in BEDROCK_REGIONS.iter().enumerate() {
        let region_group = catalog::region_group(region.code);
        if region_group != group {
            group = region_group;
            println!("{group}:");
        }
        println!("  {}. {} ({})", index + 1, region.code, region.display_name);
    }
    let input = read_line("Regions to check (e.g. 1,3; blank for defaults): ")?;

    let indices = parse_selection(&input, BEDROCK_REGIONS.len())
        .map_err(|bad| BedcheckError::Config(format!("invalid region selection '{bad}'")))?;
    Ok(indices
        .into_iter()
        .map(|i| BEDROCK_REGIONS[i].code.to_string())
        .collect())
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

/// Parse a comma-separated list of 1-based indices into 0-based ones.
///
/// Blank input yields the empty selection. Out-of-range or non-numeric
/// entries are reported back verbatim.
fn parse_selection(input: &str, max: usize) -> std::result::Result<Vec<usize>, String> {
    let mut indices = Vec::new();
    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let number: usize = part.parse().map_err(|_| part.to_string())?;
        if number == 0 || number > max {
            return Err(part.to_string());
        }
        let index = number - 1;
        if !indices.contains(&index) {
            indices.push(index);
        }
    }
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_selection_is_empty() {
        assert_eq!(parse_selection("", 5), Ok(vec![]));
        assert_eq!(parse_selection("  \n", 5), Ok(vec![]));
    }

    #[test]
    fn comma_separated_indices() {
        assert_eq!(parse_selection("1,3", 5), Ok(vec![0, 2]));
        assert_eq!(parse_selection(" 2 , 2 , 4 ", 5), Ok(vec![1, 3]));
    }

    #[test]
    fn out_of_range_and_garbage_rejected() {
        assert_eq!(parse_selection("6", 5), Err("6".to_string()));
        assert_eq!(parse_selection("0", 5), Err("0".to_string()));
        assert_eq!(parse_selection("1,zap", 5), Err("zap".to_string()));
    }
}
