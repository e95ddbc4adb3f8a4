//! Key patterns and rename rules
//!
//! Both are parsed from comma-separated host inputs and compiled once, so the
//! filter and rename loops never touch a pattern string again.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::template::Template;
use crate::{CoreError, Result};

/// Always excluded: the automation host's own access token.
pub const MANDATORY_EXCLUDE: &str = "GITHUB_TOKEN";

static MANDATORY_EXCLUDE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MANDATORY_EXCLUDE).unwrap());

/// Split a comma-separated input, trimming entries and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| CoreError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Ordered list of compiled key patterns
#[derive(Debug, Clone, Default)]
pub struct PatternList {
    patterns: Vec<Regex>,
}

impl PatternList {
    /// Compile every entry of a comma-separated pattern input.
    pub fn parse(raw: &str) -> Result<Self> {
        let patterns = split_list(raw)
            .into_iter()
            .map(compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Copy of this list with [`MANDATORY_EXCLUDE`] in front.
    pub fn with_mandatory_exclude(&self) -> Self {
        let mut patterns = Vec::with_capacity(self.patterns.len() + 1);
        patterns.push(MANDATORY_EXCLUDE_REGEX.clone());
        patterns.extend(self.patterns.iter().cloned());

        Self { patterns }
    }

    /// True if any pattern finds a match anywhere in `key`.
    pub fn is_match(&self, key: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(key))
    }

    /// First pattern matching `key` (for log messages)
    pub fn matching_pattern(&self, key: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.is_match(key))
            .map(Regex::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl fmt::Display for PatternList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .patterns
            .iter()
            .map(Regex::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

/// One `search=replacement` rename rule
#[derive(Debug, Clone)]
pub struct RenameRule {
    search: Regex,
    replacement: String,
    template: Template,
}

impl RenameRule {
    pub fn new(search: &str, replacement: impl Into<String>) -> Result<Self> {
        let search = compile(search)?;
        let replacement = replacement.into();
        let template = Template::parse(&replacement, &search);

        Ok(Self {
            search,
            replacement,
            template,
        })
    }

    /// Parse a single entry, splitting on the first `=`.
    ///
    /// An entry without `=` keeps the legacy behaviour: the whole entry is the
    /// search pattern and the replacement is empty, so the matched text is
    /// removed from the key.
    pub fn parse(entry: &str) -> Result<Self> {
        match entry.split_once('=') {
            Some((search, replacement)) => Self::new(search.trim(), replacement.trim()),
            None => {
                tracing::warn!(
                    rule = entry,
                    "rename rule has no `=`; matched text will be removed"
                );
                Self::new(entry.trim(), "")
            }
        }
    }

    /// Replace the first match in `key`, expanding `$1`, `$<name>`, `$&` etc.
    pub fn apply(&self, key: &str) -> String {
        let Some(caps) = self.search.captures(key) else {
            return key.to_string();
        };
        let Some(whole) = caps.get(0) else {
            return key.to_string();
        };

        let mut renamed = String::with_capacity(key.len() + self.replacement.len());
        renamed.push_str(&key[..whole.start()]);
        self.template.expand(&caps, key, &mut renamed);
        renamed.push_str(&key[whole.end()..]);
        renamed
    }
}

impl fmt::Display for RenameRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.search.as_str(), self.replacement)
    }
}

/// Ordered rename rules; each rule sees the keys produced by the previous one
#[derive(Debug, Clone, Default)]
pub struct RenameRuleList {
    rules: Vec<RenameRule>,
}

impl RenameRuleList {
    pub fn parse(raw: &str) -> Result<Self> {
        let rules = split_list(raw)
            .into_iter()
            .map(RenameRule::parse)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenameRule> {
        self.rules.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<Vec<RenameRule>> for RenameRuleList {
    fn from(rules: Vec<RenameRule>) -> Self {
        Self { rules }
    }
}

impl fmt::Display for RenameRuleList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .rules
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}
