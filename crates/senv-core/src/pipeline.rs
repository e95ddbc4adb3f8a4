//! Include, exclude and rename stages
//!
//! Each stage borrows the current map and returns a new one; nothing is
//! mutated in place. The stages run strictly in order:
//! include -> exclude -> rename. [`generate`] wraps them with JSON parsing in
//! front and the single file write at the end.

use std::path::{Path, PathBuf};

use crate::{PatternList, RenameRuleList, Result, SecretMap, render};

/// Keep entries whose key matches at least one pattern. Empty list keeps all.
pub fn include(secrets: &SecretMap, patterns: &PatternList) -> SecretMap {
    if patterns.is_empty() {
        return secrets.clone();
    }
    secrets.filter_keys(|key| patterns.is_match(key))
}

/// Drop entries whose key matches any pattern, including the built-in one.
pub fn exclude(secrets: &SecretMap, patterns: &PatternList) -> SecretMap {
    drop_matching(secrets, &patterns.with_mandatory_exclude())
}

fn drop_matching(secrets: &SecretMap, effective: &PatternList) -> SecretMap {
    secrets.filter_keys(|key| match effective.matching_pattern(key) {
        Some(pattern) => {
            tracing::trace!(key, pattern, "excluding secret");
            false
        }
        None => true,
    })
}

/// Apply every rule, in order, to every key.
///
/// When two keys end up with the same name the later value wins and the
/// entry stays where the first one was.
pub fn rename(secrets: &SecretMap, rules: &RenameRuleList) -> SecretMap {
    if rules.is_empty() {
        return secrets.clone();
    }

    let mut current = secrets.clone();
    for rule in rules.iter() {
        current = current
            .into_iter()
            .map(|(key, value)| (rule.apply(&key), value))
            .collect();
    }
    current
}

/// Typed configuration for the filter and rename stages
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub include: PatternList,
    pub exclude: PatternList,
    pub rename: RenameRuleList,
}

impl PipelineOptions {
    /// Parse the three comma-separated host inputs.
    pub fn parse(include: &str, exclude: &str, rename: &str) -> Result<Self> {
        Ok(Self {
            include: PatternList::parse(include)?,
            exclude: PatternList::parse(exclude)?,
            rename: RenameRuleList::parse(rename)?,
        })
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub path: PathBuf,
    pub keys: Vec<String>,
}

pub struct Pipeline {
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// Run include, exclude and rename over `secrets`.
    pub fn transform(&self, secrets: &SecretMap) -> SecretMap {
        let opts = &self.options;

        tracing::debug!(include = %opts.include, "using include list");
        let included = include(secrets, &opts.include);
        tracing::debug!(keys = %included.key_summary(), "keys after include");

        let effective = opts.exclude.with_mandatory_exclude();
        tracing::debug!(exclude = %effective, "using exclude list");
        let excluded = drop_matching(&included, &effective);
        tracing::debug!(keys = %excluded.key_summary(), "keys after exclude");

        tracing::debug!(rename = %opts.rename, "using rename rules");
        let renamed = rename(&excluded, &opts.rename);
        tracing::debug!(keys = %renamed.key_summary(), "keys after rename");

        renamed
    }
}

/// Parse `secrets_json`, transform it and write the env file to `path`.
///
/// Nothing is written unless every earlier step succeeded.
pub fn generate(
    secrets_json: &str,
    path: &Path,
    options: PipelineOptions,
) -> Result<GenerateReport> {
    let secrets = SecretMap::from_json(secrets_json)?;
    tracing::debug!(keys = %secrets.key_summary(), "parsed secrets");

    let output = Pipeline::new(options).transform(&secrets);
    render::write_env_file(&output, path)?;

    Ok(GenerateReport {
        path: path.to_path_buf(),
        keys: output.keys().map(String::from).collect(),
    })
}
