//! String formatting utilities.

/// Truncate a message to at most `limit` characters, appending an ellipsis
/// when anything was cut. Operates on characters, not bytes, so multi-byte
/// error text never splits mid-codepoint.
#[must_use]
pub fn truncate_message(message: &str, limit: usize) -> String {
    if message.chars().count() <= limit {
        return message.to_string();
    }
    let cut: String = message.chars().take(limit.saturating_sub(3)).collect();
    format!("{cut}...")
}

/// Mask an AWS account id, keeping the first and last four digits.
#[must_use]
pub fn mask_account_id(account_id: &str) -> String {
    if account_id.len() <= 8 {
        return "****".to_string();
    }
    format!("{}...{}", &account_id[..4], &account_id[account_id.len() - 4..])
}

/// Mask an identity ARN/user id, keeping only the type prefix.
#[must_use]
pub fn mask_identity(user_id: &str) -> String {
    user_id
        .split_once('/')
        .map_or_else(|| "****".to_string(), |(kind, _)| format!("{kind}/****"))
}

/// Shorten a model id for grid column headers:
/// "anthropic.claude-3-haiku-20240307-v1:0" becomes
/// "claude-3-haiku-20240307-v1".
#[must_use]
pub fn short_model_name(model_id: &str) -> &str {
    let base = model_id.split(':').next().unwrap_or(model_id);
    base.rsplit('.').next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_messages() {
        assert_eq!(truncate_message("short", 50), "short");
    }

    #[test]
    fn truncate_bounds_long_messages() {
        let long = "a".repeat(100);
        let truncated = truncate_message(&long, 50);
        assert_eq!(truncated.chars().count(), 50);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn account_masking() {
        assert_eq!(mask_account_id("123456789012"), "1234...9012");
        assert_eq!(mask_account_id("1234"), "****");
    }

    #[test]
    fn identity_masking() {
        assert_eq!(mask_identity("AIDACKCEVSQ6C2EXAMPLE"), "****");
        assert_eq!(mask_identity("assumed-role/dev-session"), "assumed-role/****");
    }

    #[test]
    fn model_name_shortening() {
        assert_eq!(
            short_model_name("anthropic.claude-3-haiku-20240307-v1:0"),
            "claude-3-haiku-20240307-v1"
        );
        assert_eq!(short_model_name("amazon.titan-embed-text-v1"), "titan-embed-text-v1");
    }
}
