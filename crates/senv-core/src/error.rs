use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(
        "Cannot parse JSON secrets ({0}). Be sure to set secrets: ${{{{ toJSON(secrets) }}}}"
    )]
    MalformedSecretsInput(String),

    #[error("Invalid regular expression `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Cannot write env file {}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
