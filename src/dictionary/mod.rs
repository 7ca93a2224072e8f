pub mod free;
pub mod mock;

use async_trait::async_trait;

use crate::error::LookupError;

/// Where definitions come from. Could be the public API or a test script.
///
/// A word the dictionary does not know is `Ok` with
/// [`DEFINITION_NOT_FOUND`](crate::consts::DEFINITION_NOT_FOUND); only a
/// failed lookup is `Err`.
#[async_trait]
pub trait Dictionary: Send + Sync {
    async fn lookup(&self, word: &str) -> Result<String, LookupError>;
}
