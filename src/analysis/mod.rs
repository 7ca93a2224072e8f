//! The aggregate result and the per-task partial results merged into it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, LookupError};

/// One of the four analyses run for every word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    Definition,
    Palindrome,
    Duplicates,
    Permutations,
}

impl Task {
    pub const ALL: [Task; 4] = [
        Task::Definition,
        Task::Palindrome,
        Task::Duplicates,
        Task::Permutations,
    ];
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Task::Definition => "definition",
            Task::Palindrome => "palindrome",
            Task::Duplicates => "duplicates",
            Task::Permutations => "permutations",
        };
        f.write_str(name)
    }
}

/// What the definition task contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Definition {
    /// The looked-up text, or the not-found sentinel.
    Text(String),
    /// The lookup failed. The task still counts as reported.
    Unavailable { reason: String },
}

impl Definition {
    /// The definition text; empty when the lookup failed.
    pub fn as_str(&self) -> &str {
        match self {
            Definition::Text(text) => text,
            Definition::Unavailable { .. } => "",
        }
    }
}

impl From<Result<String, LookupError>> for Definition {
    fn from(result: Result<String, LookupError>) -> Self {
        match result {
            Ok(text) => Definition::Text(text),
            Err(e) => Definition::Unavailable {
                reason: e.to_string(),
            },
        }
    }
}

/// The finished report for one word. Read-only once handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub word: String,
    pub definition: Definition,
    pub is_palindrome: bool,
    /// One description per repeated character, in no particular order.
    pub duplicates: Vec<String>,
    pub permutations: Vec<String>,
}

/// A single worker's contribution. Each variant fills exactly one field.
#[derive(Debug)]
pub enum PartialResult {
    Definition(Result<String, LookupError>),
    Palindrome(bool),
    Duplicates(Vec<String>),
    Permutations(Vec<String>),
}

impl PartialResult {
    pub fn task(&self) -> Task {
        match self {
            PartialResult::Definition(_) => Task::Definition,
            PartialResult::Palindrome(_) => Task::Palindrome,
            PartialResult::Duplicates(_) => Task::Duplicates,
            PartialResult::Permutations(_) => Task::Permutations,
        }
    }
}

/// Mutable working copy of an [`AnalysisResult`], owned by the merge loop.
///
/// A `None` field means that task has not reported yet. Fields are written
/// at most once.
#[derive(Debug)]
pub struct Accumulator {
    word: String,
    definition: Option<Definition>,
    is_palindrome: Option<bool>,
    duplicates: Option<Vec<String>>,
    permutations: Option<Vec<String>>,
}

impl Accumulator {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            definition: None,
            is_palindrome: None,
            duplicates: None,
            permutations: None,
        }
    }

    /// Merge one partial result into its field.
    pub fn apply(&mut self, partial: PartialResult) -> Result<(), AnalysisError> {
        let task = partial.task();
        match partial {
            PartialResult::Definition(result) => fill(&mut self.definition, result.into(), task),
            PartialResult::Palindrome(value) => fill(&mut self.is_palindrome, value, task),
            PartialResult::Duplicates(value) => fill(&mut self.duplicates, value, task),
            PartialResult::Permutations(value) => fill(&mut self.permutations, value, task),
        }
    }

    pub fn has_reported(&self, task: Task) -> bool {
        match task {
            Task::Definition => self.definition.is_some(),
            Task::Palindrome => self.is_palindrome.is_some(),
            Task::Duplicates => self.duplicates.is_some(),
            Task::Permutations => self.permutations.is_some(),
        }
    }

    /// Tasks that have not reported yet.
    pub fn missing(&self) -> Vec<Task> {
        Task::ALL
            .into_iter()
            .filter(|t| !self.has_reported(*t))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Freeze into the final result. Fails unless all four tasks reported.
    pub fn finish(self) -> Result<AnalysisResult, AnalysisError> {
        match (
            self.definition,
            self.is_palindrome,
            self.duplicates,
            self.permutations,
        ) {
            (Some(definition), Some(is_palindrome), Some(duplicates), Some(permutations)) => {
                Ok(AnalysisResult {
                    word: self.word,
                    definition,
                    is_palindrome,
                    duplicates,
                    permutations,
                })
            }
            (definition, is_palindrome, duplicates, permutations) => {
                let reported = [
                    definition.is_some(),
                    is_palindrome.is_some(),
                    duplicates.is_some(),
                    permutations.is_some(),
                ];
                let missing = Task::ALL
                    .into_iter()
                    .zip(reported)
                    .filter(|(_, done)| !done)
                    .map(|(task, _)| task)
                    .collect();
                Err(AnalysisError::Incomplete { missing })
            }
        }
    }
}

fn fill<T>(slot: &mut Option<T>, value: T, task: Task) -> Result<(), AnalysisError> {
    if slot.is_some() {
        return Err(AnalysisError::DuplicateReport(task));
    }
    *slot = Some(value);
    Ok(())
}
