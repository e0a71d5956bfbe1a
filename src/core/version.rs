//! Dot-separated version comparison for the client-library advisory.

/// Minimum recommended AWS client library version for Bedrock support.
pub const MIN_CLIENT_VERSION: &str = "1.28.0";

/// Component-wise numeric comparison of dot-separated version strings.
///
/// With equal leading components the shorter version counts as less, so
/// "1.28" < "1.28.0". Non-numeric components make the comparison
/// inconclusive and the versions are assumed compatible (returns false).
#[must_use]
pub fn version_less_than(v1: &str, v2: &str) -> bool {
    let parse = |v: &str| -> Option<Vec<u64>> {
        v.split('.').map(|part| part.trim().parse().ok()).collect()
    };
    let (Some(a), Some(b)) = (parse(v1), parse(v2)) else {
        return false;
    };

    for (x, y) in a.iter().zip(b.iter()) {
        if x < y {
            return true;
        }
        if x > y {
            return false;
        }
    }
    a.len() < b.len()
}
