use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use wordcheck::analysis::{AnalysisResult, Definition, Task};
use wordcheck::consts::DEFINITION_NOT_FOUND;
use wordcheck::dictionary::Dictionary;
use wordcheck::dictionary::free::FreeDictionary;
use wordcheck::dictionary::mock::MockDictionary;
use wordcheck::engine::Engine;
use wordcheck::engine::fanout::{EngineConfig, FanOutEngine};
use wordcheck::error::{AnalysisError, LookupError};
use wordcheck::events::{Event, EventBus};

fn build_engine(dictionary: MockDictionary, config: EngineConfig) -> FanOutEngine {
    FanOutEngine::new(Arc::new(dictionary), config)
}

/// A dictionary whose lookup panics, so its worker never reports.
struct PanickingDictionary;

#[async_trait]
impl Dictionary for PanickingDictionary {
    async fn lookup(&self, _word: &str) -> Result<String, LookupError> {
        panic!("lookup crashed");
    }
}

fn as_set(items: &[String]) -> HashSet<String> {
    items.iter().cloned().collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn every_field_is_populated() {
    let engine = build_engine(
        MockDictionary::found("One who pretends to be somebody else."),
        EngineConfig::default(),
    );

    let result = engine.analyze("impostor").await.unwrap();
    assert_eq!(result.word, "impostor");
    assert_eq!(
        result.definition,
        Definition::Text("One who pretends to be somebody else.".to_string())
    );
    assert!(!result.is_palindrome);
    assert_eq!(result.duplicates, vec!["there are 2 of letter o"]);
    assert_eq!(result.permutations.len(), 40_320);
    assert_eq!(result.permutations[0], "impostor");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn not_found_is_recorded_as_text() {
    let engine = build_engine(MockDictionary::not_found(), EngineConfig::default());

    let result = engine.analyze("racecar").await.unwrap();
    assert_eq!(
        result.definition,
        Definition::Text(DEFINITION_NOT_FOUND.to_string())
    );
    assert!(result.is_palindrome);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn failed_lookup_does_not_affect_other_tasks() {
    let engine = build_engine(
        MockDictionary::failing("connection reset"),
        EngineConfig::default(),
    );

    let result = engine.analyze("aab").await.unwrap();
    match &result.definition {
        Definition::Unavailable { reason } => assert!(reason.contains("connection reset")),
        other => panic!("expected Unavailable, got {other:?}"),
    }
    assert_eq!(result.definition.as_str(), "");
    assert!(!result.is_palindrome);
    assert_eq!(result.duplicates, vec!["there are 2 of letter a"]);
    assert_eq!(
        result.permutations,
        vec!["aab", "aba", "aab", "aba", "baa", "baa"]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn timeout_is_an_explicit_degraded_definition() {
    let engine = build_engine(
        MockDictionary::found("too late").with_delay(Duration::from_secs(5)),
        EngineConfig {
            lookup_timeout: Some(Duration::from_millis(50)),
            ..EngineConfig::default()
        },
    );

    let result = engine.analyze("abc").await.unwrap();
    match &result.definition {
        Definition::Unavailable { reason } => assert!(reason.contains("timed out")),
        other => panic!("expected Unavailable, got {other:?}"),
    }
    assert_eq!(result.permutations.len(), 6);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn slow_lookup_reports_last() {
    let events = Arc::new(EventBus::default());
    let mut rx = events.subscribe();
    let engine = build_engine(
        MockDictionary::found("slow").with_delay(Duration::from_millis(300)),
        EngineConfig::default(),
    )
    .with_events(Arc::clone(&events));

    let result = engine.analyze("level").await.unwrap();
    assert_eq!(result.definition, Definition::Text("slow".to_string()));

    let mut reported = Vec::new();
    while let Ok(event) = rx.try_recv() {
        reported.push(event);
    }

    assert_eq!(reported.len(), 5);
    assert_eq!(
        reported[3],
        Event::Reported {
            task: Task::Definition,
            remaining: 0
        }
    );
    assert_eq!(
        reported[4],
        Event::Finished {
            word: "level".to_string()
        }
    );
    let remaining: Vec<usize> = reported[..4]
        .iter()
        .map(|e| match e {
            Event::Reported { remaining, .. } => *remaining,
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    assert_eq!(remaining, vec![3, 2, 1, 0]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn one_lookup_per_run() {
    let dictionary = Arc::new(MockDictionary::found("x"));
    let engine = FanOutEngine::new(
        Arc::clone(&dictionary) as Arc<dyn Dictionary>,
        EngineConfig::default(),
    );

    engine.analyze("ab").await.unwrap();
    assert_eq!(dictionary.calls(), 1);
    engine.analyze("ba").await.unwrap();
    assert_eq!(dictionary.calls(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn arrival_order_does_not_change_result() {
    let config = EngineConfig {
        report_jitter: Some(Duration::from_millis(20)),
        ..EngineConfig::default()
    };
    let found = build_engine(MockDictionary::found("a thing"), config.clone());
    let failing = build_engine(MockDictionary::failing("offline"), config);

    let baseline = found.analyze("banana").await.unwrap();
    for run in 0..20 {
        let engine = if run % 2 == 0 { &found } else { &failing };
        let result: AnalysisResult = engine.analyze("banana").await.unwrap();

        assert_eq!(result.word, baseline.word);
        assert_eq!(result.is_palindrome, baseline.is_palindrome);
        assert_eq!(result.permutations, baseline.permutations);
        assert_eq!(as_set(&result.duplicates), as_set(&baseline.duplicates));

        let definition = result.definition.as_str();
        assert!(
            definition == "a thing" || definition == DEFINITION_NOT_FOUND || definition.is_empty(),
            "unexpected definition {definition:?} on run {run}"
        );
    }

    assert_eq!(
        as_set(&baseline.duplicates),
        as_set(&[
            "there are 3 of letter a".to_string(),
            "there are 2 of letter n".to_string(),
        ])
    );
    assert_eq!(baseline.permutations.len(), 720);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn empty_word_is_passed_through() {
    let engine = build_engine(MockDictionary::not_found(), EngineConfig::default());

    let result = engine.analyze("").await.unwrap();
    assert_eq!(result.word, "");
    assert!(result.is_palindrome);
    assert!(result.duplicates.is_empty());
    assert_eq!(result.permutations, vec![String::new()]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn end_to_end_with_http_dictionary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let dictionary = FreeDictionary::with_base_url(&server.uri()).unwrap();
    let engine = FanOutEngine::new(Arc::new(dictionary), EngineConfig::default());

    let result = engine.analyze("fizz").await.unwrap();
    assert_eq!(result.definition.as_str(), DEFINITION_NOT_FOUND);
    assert_eq!(result.duplicates, vec!["there are 2 of letter z"]);
    assert_eq!(result.permutations.len(), 24);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn worker_that_never_reports_yields_incomplete() {
    let events = Arc::new(EventBus::default());
    let mut rx = events.subscribe();
    let engine = FanOutEngine::new(Arc::new(PanickingDictionary), EngineConfig::default())
        .with_events(Arc::clone(&events));

    let err = tokio::time::timeout(Duration::from_secs(5), engine.analyze("abc"))
        .await
        .expect("merge loop must stop once every worker is done")
        .unwrap_err();

    match err {
        AnalysisError::Incomplete { missing } => assert_eq!(missing, vec![Task::Definition]),
        other => panic!("expected Incomplete, got {other:?}"),
    }

    let mut reported = Vec::new();
    while let Ok(event) = rx.try_recv() {
        reported.push(event);
    }
    assert_eq!(reported.len(), 3);
    assert!(reported.iter().all(|e| matches!(e, Event::Reported { task, .. } if *task != Task::Definition)));
}
