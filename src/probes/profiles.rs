//! Local AWS profile discovery.
//!
//! Profiles live in `~/.aws/credentials` (plain `[name]` sections) and
//! `~/.aws/config` (`[profile name]` sections, except `[default]`). Only the
//! section headers matter here; credential values are never read.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use directories::UserDirs;

/// Paths of the two shared AWS configuration files, if a home directory
/// exists.
#[must_use]
pub fn shared_config_paths() -> Option<(PathBuf, PathBuf)> {
    let user_dirs = UserDirs::new()?;
    let aws_dir = user_dirs.home_dir().join(".aws");
    Some((aws_dir.join("credentials"), aws_dir.join("config")))
}

/// Whether either shared configuration file exists.
#[must_use]
pub fn has_shared_config() -> bool {
    shared_config_paths()
        .is_some_and(|(credentials, config)| credentials.exists() || config.exists())
}

/// Enumerate profile names from the shared configuration files.
///
/// Missing or unreadable files contribute nothing; the result is sorted and
/// de-duplicated across both files.
#[must_use]
pub fn list_profiles() -> Vec<String> {
    let Some((credentials, config)) = shared_config_paths() else {
        return Vec::new();
    };
    profiles_from_files(&credentials, &config)
}

/// Profile enumeration over explicit file paths (testable without a home
/// directory).
#[must_use]
pub fn profiles_from_files(credentials: &Path, config: &Path) -> Vec<String> {
    let mut names = BTreeSet::new();

    if let Ok(content) = std::fs::read_to_string(credentials) {
        names.extend(parse_section_names(&content, false));
    }
    if let Ok(content) = std::fs::read_to_string(config) {
        names.extend(parse_section_names(&content, true));
    }

    names.into_iter().collect()
}

/// Extract profile names from section headers.
///
/// In config-file form, named profiles appear as `[profile name]` while the
/// default profile is a bare `[default]`; in credentials-file form every
/// section is a bare `[name]`.
fn parse_section_names(content: &str, config_form: bool) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let inner = line.strip_prefix('[')?.strip_suffix(']')?.trim();
            if inner.is_empty() {
                return None;
            }
            if config_form {
                if let Some(name) = inner.strip_prefix("profile ") {
                    Some(name.trim().to_string())
                } else if inner == "default" {
                    Some(inner.to_string())
                } else {
                    // sso-session and services sections are not profiles.
                    None
                }
            } else {
                Some(inner.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn credentials_sections_are_profiles() {
        let names = parse_section_names("[default]\nkey=1\n[work]\nkey=2\n", false);
        assert_eq!(names, vec!["default", "work"]);
    }

    #[test]
    fn config_sections_need_profile_prefix() {
        let content = "[default]\n[profile staging]\n[sso-session corp]\n";
        let names = parse_section_names(content, true);
        assert_eq!(names, vec!["default", "staging"]);
    }

    #[test]
    fn profiles_merge_across_files() {
        let credentials = write_temp("[work]\naws_access_key_id=AKIA\n");
        let config = write_temp("[profile work]\nregion=us-east-1\n[profile staging]\n");

        let names = profiles_from_files(credentials.path(), config.path());
        assert_eq!(names, vec!["staging", "work"]);
    }

    #[test]
    fn missing_files_yield_empty() {
        let names = profiles_from_files(Path::new("/nonexistent/a"), Path::new("/nonexistent/b"));
        assert!(names.is_empty());
    }
}
