//! Verification engine configuration.

use serde::{Deserialize, Serialize};

/// Tunables for field extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum number of space-separated tokens before a free-text person
    /// candidate is accepted as a name. Single tokens are overwhelmingly
    /// false positives in OCR output. Heuristic, uncalibrated — hence
    /// configurable.
    pub name_min_tokens: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { name_min_tokens: 2 }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_token_threshold() {
        assert_eq!(EngineConfig::default().name_min_tokens, 2);
    }

    #[test]
    fn toml_override() {
        let cfg: EngineConfig = toml::from_str("name_min_tokens = 3").unwrap();
        assert_eq!(cfg.name_min_tokens, 3);
    }
}
