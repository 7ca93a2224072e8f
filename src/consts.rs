//! Project-wide constants.

use std::time::Duration;

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");

/// Base URL of the free dictionary service. The word is appended as a path segment.
pub const DICTIONARY_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Returned by a lookup when the service has no entry for the word.
/// This is a normal outcome, not an error.
pub const DEFINITION_NOT_FOUND: &str = "Word definition not found";

/// Default lookup timeout used by the CLI.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Number of analyses run per word.
pub const TASK_COUNT: usize = 4;
