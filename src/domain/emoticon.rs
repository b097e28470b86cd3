//! Emoticon acceptance policy for feedback submissions.

use serde::Serialize;

use crate::error::GatewayError;

/// Reactions offered by the student client.
pub const DEFAULT_EMOTICONS: [&str; 4] = ["😊", "😢", "😮", "😕"];

/// Upper bound on an emoticon token in bytes, applied under every policy.
pub const MAX_EMOTICON_BYTES: usize = 32;

/// Decides which emoticon tokens the gate accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "emoticons", rename_all = "snake_case")]
pub enum EmoticonPolicy {
    /// Any non-empty token up to [`MAX_EMOTICON_BYTES`].
    Permissive,
    /// Only the listed tokens, matched exactly.
    AllowList(Vec<String>),
}

impl Default for EmoticonPolicy {
    fn default() -> Self {
        Self::AllowList(DEFAULT_EMOTICONS.iter().map(ToString::to_string).collect())
    }
}

impl EmoticonPolicy {
    /// Parses a policy from a config value.
    ///
    /// `"*"` selects [`EmoticonPolicy::Permissive`]; a comma-separated list
    /// selects an allow-list. A blank value yields the default allow-list.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw == "*" {
            return Self::Permissive;
        }
        let list: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();
        if list.is_empty() {
            Self::default()
        } else {
            Self::AllowList(list)
        }
    }

    /// Checks a submitted token against the policy.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the token is empty, too
    /// long, or not on the allow-list.
    pub fn check(&self, emoticon: &str) -> Result<(), GatewayError> {
        if emoticon.is_empty() {
            return Err(GatewayError::Validation(
                "emoticon must not be empty".to_string(),
            ));
        }
        if emoticon.len() > MAX_EMOTICON_BYTES {
            return Err(GatewayError::Validation(format!(
                "emoticon exceeds {MAX_EMOTICON_BYTES} bytes"
            )));
        }
        match self {
            Self::Permissive => Ok(()),
            Self::AllowList(allowed) if allowed.iter().any(|e| e == emoticon) => Ok(()),
            Self::AllowList(_) => Err(GatewayError::Validation(format!(
                "unsupported emoticon: {emoticon}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_accepts_client_reactions() {
        let policy = EmoticonPolicy::default();
        for e in DEFAULT_EMOTICONS {
            assert!(policy.check(e).is_ok());
        }
        assert!(policy.check("👍").is_err());
    }

    #[test]
    fn permissive_accepts_any_short_token() {
        let policy = EmoticonPolicy::parse("*");
        assert_eq!(policy, EmoticonPolicy::Permissive);
        assert!(policy.check("👍").is_ok());
        assert!(policy.check("").is_err());
        assert!(policy.check(&"x".repeat(MAX_EMOTICON_BYTES + 1)).is_err());
    }

    #[test]
    fn parse_builds_allow_list() {
        let policy = EmoticonPolicy::parse(" 👍 , 👎 ,");
        assert_eq!(
            policy,
            EmoticonPolicy::AllowList(vec!["👍".to_string(), "👎".to_string()])
        );
        assert!(policy.check("👎").is_ok());
        assert!(policy.check("😊").is_err());
    }

    #[test]
    fn blank_value_falls_back_to_default() {
        assert_eq!(EmoticonPolicy::parse("  "), EmoticonPolicy::default());
    }
}
