//! Core pipeline for senv
//!
//! This crate contains:
//! - Domain models (SecretMap, PatternList, RenameRuleList)
//! - Include/exclude filters and the rename pass
//! - Env-file rendering (deterministic `KEY="VALUE"` output)

pub mod error;
pub mod pattern;
pub mod pipeline;
pub mod render;
pub mod secrets;
mod template;

pub use error::{CoreError, Result};
pub use pattern::{MANDATORY_EXCLUDE, PatternList, RenameRule, RenameRuleList, split_list};
pub use pipeline::{GenerateReport, Pipeline, PipelineOptions, generate};
pub use render::{render, write_env_file};
pub use secrets::SecretMap;
