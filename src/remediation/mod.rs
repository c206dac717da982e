//! Remediation advice for findings.
//!
//! [`Advisor`] maps a finding title to fix text by evaluating an ordered
//! rule list, first match wins. The list always ends with a catch-all, so
//! every title gets advice. Extra rules from the config file are tried
//! before the built-ins.

mod rules;

pub use rules::{BuiltinRule, BUILTIN_RULES, FALLBACK_FIX};

use crate::config::RemediationRuleConfig;
use crate::error::{MobscanError, Result};
use crate::model::Finding;
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// A compiled remediation rule.
#[derive(Debug, Clone)]
struct CompiledRule {
    name: String,
    pattern: Regex,
    fix: String,
}

/// Ordered remediation rule set.
#[derive(Debug, Clone)]
pub struct Advisor {
    rules: Vec<CompiledRule>,
}

static DEFAULT_ADVISOR: LazyLock<Advisor> = LazyLock::new(Advisor::builtin);

/// Fix text for a title using the built-in rules.
#[must_use]
pub fn recommend(title: &str) -> &'static str {
    DEFAULT_ADVISOR.recommend(title)
}

impl Advisor {
    /// The built-in rule set.
    #[must_use]
    pub fn builtin() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .filter_map(|rule| match compile(rule.pattern) {
                Ok(pattern) => Some(CompiledRule {
                    name: rule.name.to_string(),
                    pattern,
                    fix: rule.fix.to_string(),
                }),
                Err(e) => {
                    tracing::warn!("Skipping built-in remediation rule {}: {e}", rule.name);
                    None
                }
            })
            .collect();
        Self { rules }
    }

    /// Built-in rules with `extra` rules tried first.
    pub fn with_rules(extra: &[RemediationRuleConfig]) -> Result<Self> {
        let mut rules = extra
            .iter()
            .map(|rule| {
                let pattern = compile(&rule.pattern).map_err(|e| {
                    MobscanError::config(format!(
                        "remediation rule '{}' has an invalid pattern: {e}",
                        rule.display_name()
                    ))
                })?;
                Ok(CompiledRule {
                    name: rule.display_name().to_string(),
                    pattern,
                    fix: rule.fix.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        rules.extend(Self::builtin().rules);
        Ok(Self { rules })
    }

    /// Fix text of the first rule matching `title`.
    #[must_use]
    pub fn recommend(&self, title: &str) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(title) && !rule.fix.trim().is_empty())
            .map_or(FALLBACK_FIX, |rule| rule.fix.as_str())
    }

    /// Name of the rule that would answer for `title`.
    #[must_use]
    pub fn matching_rule(&self, title: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(title) && !rule.fix.trim().is_empty())
            .map(|rule| rule.name.as_str())
    }

    /// The report's own remediation when it has one, otherwise advice.
    #[must_use]
    pub fn resolve<'a>(&'a self, finding: &'a Finding) -> &'a str {
        finding
            .remediation
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| self.recommend(&finding.title))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for Advisor {
    fn default() -> Self {
        Self::builtin()
    }
}

fn compile(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}
