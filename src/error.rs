//! Error types for the library. The binary wraps these in `anyhow`.

use std::time::Duration;

use thiserror::Error;

use crate::analysis::Task;

/// Why a definition lookup produced no definition.
///
/// "Not found" is not in here: a missing word is a normal lookup result.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("invalid dictionary URL: {0}")]
    InvalidUrl(String),

    #[error("failed to build request: {0}")]
    Request(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response contained no definition")]
    EmptyPayload,

    #[error("lookup timed out after {0:?}")]
    TimedOut(Duration),
}

/// Failures of the fan-out/fan-in run itself, never of a single analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("analysis ended before every task reported (missing: {missing:?})")]
    Incomplete { missing: Vec<Task> },

    #[error("{0} reported more than once")]
    DuplicateReport(Task),
}
