//! Heading-classified section filtering

use tracing::debug;

use crate::PrunerConfig;

/// Rule-based boilerplate filter over heading-sectioned text
pub struct PolicyPruner {
    // Lowercased once at construction; matching is substring-on-lowercase.
    patterns: Vec<String>,
}

impl PolicyPruner {
    /// Create a pruner with the given pattern configuration
    pub fn new(config: PrunerConfig) -> Self {
        Self {
            patterns: config
                .discard_headings
                .into_iter()
                .map(|p| p.to_lowercase())
                .collect(),
        }
    }

    /// Remove boilerplate sections from `text`
    ///
    /// A document with no recognized headings is returned unchanged. Each
    /// heading of any level is classified independently; a matched heading
    /// drops its line and body up to the next heading.
    pub fn prune(&self, text: &str) -> String {
        if !text.lines().any(is_heading) {
            return text.to_string();
        }

        let mut kept: Vec<&str> = Vec::new();
        let mut discarding = false;
        let mut dropped_sections = 0usize;

        for line in text.lines() {
            if is_heading(line) {
                discarding = self.is_boilerplate(heading_text(line));
                if discarding {
                    dropped_sections += 1;
                    continue;
                }
            }
            if !discarding {
                kept.push(line);
            }
        }

        debug!(dropped_sections, "pruned policy text");

        let mut result = kept.join("\n");
        if text.ends_with('\n') && !result.is_empty() {
            result.push('\n');
        }
        result
    }

    fn is_boilerplate(&self, heading: &str) -> bool {
        let heading = heading.to_lowercase();
        self.patterns.iter().any(|p| heading.contains(p.as_str()))
    }
}

impl Default for PolicyPruner {
    fn default() -> Self {
        Self::new(PrunerConfig::default())
    }
}

/// ATX heading: one to six `#` followed by whitespace
fn is_heading(line: &str) -> bool {
    let trimmed = line.trim_start();
    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    (1..=6).contains(&hashes)
        && trimmed[hashes..]
            .chars()
            .next()
            .map_or(true, char::is_whitespace)
}

/// Heading text without the `#` markers
fn heading_text(line: &str) -> &str {
    line.trim_start().trim_start_matches('#').trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pruner() -> PolicyPruner {
        PolicyPruner::default()
    }

    #[test]
    fn test_no_headings_passes_through_unchanged() {
        let text = "Plain paragraph.\n\nAnother paragraph, no headings at all.";
        assert_eq!(pruner().prune(text), text);
    }

    #[test]
    fn test_boilerplate_section_dropped_entirely() {
        let text = "# Benefits\nRoom rent covered.\n# Table of Contents\n1. Benefits\n2. Exclusions\n# Exclusions\nWar.\n";
        let result = pruner().prune(text);
        assert!(result.contains("Room rent covered."));
        assert!(result.contains("War."));
        assert!(!result.contains("Table of Contents"));
        assert!(!result.contains("1. Benefits"));
    }

    #[test]
    fn test_retained_sections_keep_original_order() {
        let text = "# One\nfirst\n# Glossary\nnoise\n# Two\nsecond\n";
        let result = pruner().prune(text);
        let one = result.find("first").unwrap();
        let two = result.find("second").unwrap();
        assert!(one < two);
    }

    #[test]
    fn test_preamble_before_first_heading_is_retained() {
        let text = "Policy UIN: ABC123\n# Glossary\nnoise\n# Benefits\ncovered\n";
        let result = pruner().prune(text);
        assert!(result.contains("Policy UIN: ABC123"));
    }

    #[test]
    fn test_sub_headings_classified_independently() {
        // Boilerplate sub-section under a substantive parent is dropped;
        // substantive sub-section under a dropped parent is kept.
        let text = "# Coverage\ncovered\n## Arbitration\nlegal noise\n## Limits\ncapped\n# Glossary\n## Key Benefits\nsignal\n";
        let result = pruner().prune(text);
        assert!(result.contains("covered"));
        assert!(result.contains("capped"));
        assert!(result.contains("signal"));
        assert!(!result.contains("legal noise"));
    }

    #[test]
    fn test_heading_matching_multiple_patterns_dropped_once() {
        let text = "# Keep\nyes\n# Glossary and Definitions\na\nb\n# Also Keep\nyes2\n";
        let result = pruner().prune(text);
        assert!(!result.contains("Glossary"));
        assert_eq!(result.matches("yes").count(), 2);
    }

    #[test]
    fn test_pruning_is_idempotent() {
        let text = "Intro.\n# Benefits\ncovered\n# Annexure II\nforms\n# Claims\nprocess\n";
        let once = pruner().prune(text);
        let twice = pruner().prune(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_case_insensitive_classification() {
        let text = "# TABLE OF CONTENTS\nnoise\n# Benefits\ncovered\n";
        let result = pruner().prune(text);
        assert!(!result.contains("noise"));
        assert!(result.contains("covered"));
    }

    #[test]
    fn test_hash_without_space_is_not_a_heading() {
        let text = "#hashtag in prose stays put";
        assert_eq!(pruner().prune(text), text);
    }
}
