use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use super::Dictionary;
use crate::consts::{DEFINITION_NOT_FOUND, DICTIONARY_API_URL};
use crate::error::LookupError;

const USER_AGENT: &str = concat!("wordcheck/", env!("CARGO_PKG_VERSION"));

/// Client for the free dictionary API (dictionaryapi.dev).
///
/// One GET per lookup, no retries. Any status >= 400 means "not found".
pub struct FreeDictionary {
    client: reqwest::Client,
    base_url: Url,
}

impl FreeDictionary {
    pub fn new() -> Result<Self, LookupError> {
        Self::with_base_url(DICTIONARY_API_URL)
    }

    /// Point at a different service root, e.g. a local mock server.
    pub fn with_base_url(base_url: &str) -> Result<Self, LookupError> {
        let base_url =
            Url::parse(base_url).map_err(|e| LookupError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(LookupError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LookupError::Request(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// `{base}/{word}`, with the word percent-encoded as a single segment.
    pub fn url_for(&self, word: &str) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(word);
        Ok(url)
    }
}

#[async_trait]
impl Dictionary for FreeDictionary {
    async fn lookup(&self, word: &str) -> Result<String, LookupError> {
        let url = self.url_for(word)?;
        debug!(%url, "requesting definition");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status.as_u16() >= 400 {
            debug!(%status, word, "dictionary has no entry");
            return Ok(DEFINITION_NOT_FOUND.to_string());
        }

        let body = response.text().await?;
        first_definition(&body)
    }
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    meanings: Vec<Meaning>,
}

#[derive(Debug, Deserialize)]
struct Meaning {
    #[serde(default)]
    definitions: Vec<Sense>,
}

#[derive(Debug, Deserialize)]
struct Sense {
    definition: String,
}

/// First definition of the first meaning of the first entry.
pub fn first_definition(body: &str) -> Result<String, LookupError> {
    let entries: Vec<Entry> = serde_json::from_str(body)?;
    entries
        .into_iter()
        .next()
        .and_then(|entry| entry.meanings.into_iter().next())
        .and_then(|meaning| meaning.definitions.into_iter().next())
        .map(|sense| sense.definition)
        .ok_or(LookupError::EmptyPayload)
}
