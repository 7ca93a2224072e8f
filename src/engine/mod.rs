pub mod fanout;

use async_trait::async_trait;

use crate::analysis::AnalysisResult;
use crate::error::AnalysisError;

/// The outermost boundary. main.rs only knows this trait.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Run every analysis for `word` and return the merged result.
    ///
    /// Task-local failures are recorded in the result; `Err` means the run
    /// itself broke and no complete result exists.
    async fn analyze(&self, word: &str) -> Result<AnalysisResult, AnalysisError>;
}
