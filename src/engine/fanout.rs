//! Runs the four analyses in parallel and merges their reports into one result.

use async_trait::async_trait;
use rand::RngExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::Engine;
use crate::analysis::{Accumulator, AnalysisResult, Definition, PartialResult, Task};
use crate::consts::TASK_COUNT;
use crate::dictionary::Dictionary;
use crate::error::{AnalysisError, LookupError};
use crate::events::{Event, EventBus};
use crate::tasks::{duplicates, palindrome, permutations};

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Give up on the definition lookup after this long. `None` waits forever.
    pub lookup_timeout: Option<Duration>,
    /// Each worker sleeps a random time below this before reporting.
    /// Shuffles arrival order at the merge loop.
    pub report_jitter: Option<Duration>,
}

/// Fan-out/fan-in engine.
///
/// Each analysis runs as its own task and sends exactly one
/// [`PartialResult`] into a shared channel. A watcher joins all workers and
/// then drops the last sender, which closes the channel. The merge loop is
/// the only owner of the [`Accumulator`]; it drains the channel and
/// finalizes once the channel is closed.
pub struct FanOutEngine {
    dictionary: Arc<dyn Dictionary>,
    events: Option<Arc<EventBus>>,
    config: EngineConfig,
}

impl FanOutEngine {
    pub fn new(dictionary: Arc<dyn Dictionary>, config: EngineConfig) -> Self {
        Self {
            dictionary,
            events: None,
            config,
        }
    }

    /// Publish progress to `events` during each run.
    pub fn with_events(mut self, events: Arc<EventBus>) -> Self {
        self.events = Some(events);
        self
    }

    fn emit(&self, event: Event) {
        if let Some(events) = &self.events {
            events.emit(event);
        }
    }

    fn spawn_workers(
        &self,
        word: &str,
        tx: &mpsc::Sender<PartialResult>,
    ) -> Vec<(Task, JoinHandle<()>)> {
        let jitter = self.config.report_jitter;
        let mut workers = Vec::with_capacity(TASK_COUNT);

        let dictionary = Arc::clone(&self.dictionary);
        let timeout = self.config.lookup_timeout;
        let owned = word.to_string();
        let sender = tx.clone();
        workers.push((
            Task::Definition,
            tokio::spawn(async move {
                let result = lookup(dictionary.as_ref(), &owned, timeout).await;
                if let Some(jitter) = jitter {
                    tokio::time::sleep(random_delay(jitter)).await;
                }
                if sender.send(PartialResult::Definition(result)).await.is_err() {
                    warn!(task = %Task::Definition, "merge loop gone, result dropped");
                }
            }),
        ));

        workers.push((
            Task::Palindrome,
            spawn_local(word, tx, jitter, |w| {
                PartialResult::Palindrome(palindrome::check(w))
            }),
        ));
        workers.push((
            Task::Duplicates,
            spawn_local(word, tx, jitter, |w| {
                PartialResult::Duplicates(duplicates::count(w))
            }),
        ));
        workers.push((
            Task::Permutations,
            spawn_local(word, tx, jitter, |w| {
                PartialResult::Permutations(permutations::generate(w))
            }),
        ));

        workers
    }
}

#[async_trait]
impl Engine for FanOutEngine {
    async fn analyze(&self, word: &str) -> Result<AnalysisResult, AnalysisError> {
        info!(word, "analyzing");

        let (tx, mut rx) = mpsc::channel::<PartialResult>(TASK_COUNT);
        let workers = self.spawn_workers(word, &tx);

        // Closes the channel once every worker is done, reported or not.
        let watcher = tokio::spawn(async move {
            let (tasks, handles): (Vec<Task>, Vec<_>) = workers.into_iter().unzip();
            let outcomes = futures::future::join_all(handles).await;
            for (task, outcome) in tasks.into_iter().zip(outcomes) {
                if let Err(e) = outcome {
                    error!(%task, error = %e, "worker ended without reporting");
                }
            }
            drop(tx);
        });

        let mut acc = Accumulator::new(word);
        while let Some(partial) = rx.recv().await {
            let task = partial.task();
            acc.apply(partial)?;
            let remaining = acc.missing().len();
            debug!(%task, remaining, "merged partial result");
            self.emit(Event::Reported { task, remaining });
        }

        if let Err(e) = watcher.await {
            error!(error = %e, "watcher failed");
        }

        let result = acc.finish()?;
        if let Definition::Unavailable { reason } = &result.definition {
            warn!(word, reason = %reason, "definition unavailable");
        }

        info!(word, permutations = result.permutations.len(), "analysis complete");
        self.emit(Event::Finished {
            word: result.word.clone(),
        });
        Ok(result)
    }
}

async fn lookup(
    dictionary: &dyn Dictionary,
    word: &str,
    timeout: Option<Duration>,
) -> Result<String, LookupError> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, dictionary.lookup(word))
            .await
            .unwrap_or_else(|_| Err(LookupError::TimedOut(limit))),
        None => dictionary.lookup(word).await,
    }
}

/// Run a CPU-bound analysis on the blocking pool.
fn spawn_local<F>(
    word: &str,
    tx: &mpsc::Sender<PartialResult>,
    jitter: Option<Duration>,
    analyze: F,
) -> JoinHandle<()>
where
    F: FnOnce(&str) -> PartialResult + Send + 'static,
{
    let word = word.to_string();
    let tx = tx.clone();
    tokio::task::spawn_blocking(move || {
        let partial = analyze(&word);
        let task = partial.task();
        if let Some(jitter) = jitter {
            std::thread::sleep(random_delay(jitter));
        }
        if tx.blocking_send(partial).is_err() {
            warn!(%task, "merge loop gone, result dropped");
        }
    })
}

fn random_delay(max: Duration) -> Duration {
    let max_ms = max.as_millis() as u64;
    if max_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::rng().random_range(0..max_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_delay_stays_below_max() {
        for _ in 0..100 {
            assert!(random_delay(Duration::from_millis(5)) < Duration::from_millis(5));
        }
    }

    #[test]
    fn zero_jitter_is_zero_delay() {
        assert_eq!(random_delay(Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn default_config_has_no_limits() {
        let config = EngineConfig::default();
        assert!(config.lookup_timeout.is_none());
        assert!(config.report_jitter.is_none());
    }
}
