//! Integration tests for a full research run.
//!
//! These drive the pipeline end to end against the mock collaborators:
//! 1. Plan queries
//! 2. Search and collect URLs
//! 3. Extract each URL with retries
//! 4. Summarize
//! 5. Stream cumulative snapshots

use futures::StreamExt;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use research::{
    testing::{MockAI, MockAICall, MockExtractor, MockOutcome, MockSearcher},
    ArticleResult, PipelineConfig, ProgressSnapshot, QueryPlan, ResearchError, ResearchPipeline,
    ResearchRequest, RunStatus, SearchResponse, FAILED_TO_SCRAPE,
};

const TOPIC: &str = "history of the printing press";

fn url(n: usize) -> String {
    format!("https://news.example.com/story-{n}")
}

fn urls(range: std::ops::RangeInclusive<usize>) -> Vec<String> {
    range.map(url).collect()
}

fn as_refs(urls: &[String]) -> Vec<&str> {
    urls.iter().map(String::as_str).collect()
}

/// Extractor where every listed URL yields a good article titled after its index.
fn good_extractor(urls: &[String]) -> MockExtractor {
    urls.iter()
        .enumerate()
        .fold(MockExtractor::new(), |ex, (i, u)| {
            ex.with_article(u, &format!("Story {}", i + 1), 300)
        })
}

fn one_query_ai() -> MockAI {
    MockAI::new().with_plan(QueryPlan::new(["printing press"], "one broad query"))
}

/// Check the cumulative-snapshot contract across a whole run.
fn assert_cumulative(snapshots: &[ProgressSnapshot]) {
    for pair in snapshots.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        assert_eq!(prev.run_id, next.run_id);
        assert_eq!(prev.query, next.query);
        assert!(next.articles.len() >= prev.articles.len());
        assert!(next.articles.len() <= prev.articles.len() + 1);
        assert_eq!(&next.articles[..prev.articles.len()], &prev.articles[..]);
        assert!(next.successful_articles >= prev.successful_articles);
        assert!(next.failed_articles >= prev.failed_articles);
        assert!(next.duration >= prev.duration);
    }
    for snapshot in snapshots {
        assert_eq!(
            snapshot.successful_articles + snapshot.failed_articles,
            snapshot.articles.len()
        );
        assert!(snapshot.articles.len() <= snapshot.total_articles);
    }
}

#[tokio::test]
async fn test_full_run_caps_at_five_and_streams_every_step() {
    let found = urls(1..=7);
    let searcher = MockSearcher::new().with_links("printing press", &as_refs(&found));
    let extractor = good_extractor(&found);
    let pipeline = ResearchPipeline::new(one_query_ai(), searcher, extractor.clone());

    let snapshots = pipeline.collect(ResearchRequest::new(TOPIC)).await.unwrap();

    // planning + one per URL + completion
    assert_eq!(snapshots.len(), 7);
    assert_eq!(snapshots[0].status, RunStatus::QueriesGenerated);
    assert!(snapshots[0].plan.is_some());
    assert!(snapshots[1..].iter().all(|s| s.plan.is_none()));
    for (i, snapshot) in snapshots[1..6].iter().enumerate() {
        assert_eq!(snapshot.status, RunStatus::Processed { done: i + 1, total: 5 });
        assert_eq!(snapshot.status.to_string(), format!("Processed {}/5", i + 1));
    }

    let last = snapshots.last().unwrap();
    assert_eq!(last.status, RunStatus::Completed);
    assert_eq!(last.query, TOPIC);
    assert_eq!(last.total_articles, 5);
    assert_eq!(last.successful_articles, 5);
    assert_eq!(last.failed_articles, 0);

    let processed: Vec<&str> = last.articles.iter().map(ArticleResult::url).collect();
    assert_eq!(processed, as_refs(&found[..5]));
    assert_eq!(last.articles[0].summary(), Some("Summary of Story 1"));

    // URLs past the cap are never fetched
    assert_eq!(extractor.attempts(&url(6)), 0);
    assert_eq!(extractor.attempts(&url(7)), 0);

    assert_cumulative(&snapshots);
}

#[tokio::test]
async fn test_fewer_urls_than_cap() {
    let found = urls(1..=2);
    let searcher = MockSearcher::new().with_links("printing press", &as_refs(&found));
    let pipeline = ResearchPipeline::new(one_query_ai(), searcher, good_extractor(&found));

    let snapshots = pipeline.collect(ResearchRequest::new(TOPIC)).await.unwrap();

    assert_eq!(snapshots.len(), 4);
    let last = snapshots.last().unwrap();
    assert_eq!(last.total_articles, 2);
    assert_eq!(last.successful_articles + last.failed_articles, 2);
}

#[tokio::test]
async fn test_urls_are_collected_in_query_order() {
    let ai = MockAI::new().with_plan(QueryPlan::new(["first", "second"], "two angles"));
    let searcher = MockSearcher::new()
        .with_links("first", &[url(1).as_str(), url(2).as_str()])
        .with_links("second", &[url(3).as_str()]);
    let pipeline = ResearchPipeline::new(ai, searcher.clone(), good_extractor(&urls(1..=3)));

    let snapshots = pipeline.collect(ResearchRequest::new(TOPIC)).await.unwrap();

    assert_eq!(searcher.queries(), vec!["first", "second"]);
    let processed: Vec<&str> = snapshots.last().unwrap().articles.iter().map(ArticleResult::url).collect();
    assert_eq!(processed, vec![url(1), url(2), url(3)]);
}

#[tokio::test]
async fn test_duplicate_urls_are_processed_once_per_position() {
    let ai = MockAI::new().with_plan(QueryPlan::new(["a", "b"], "overlapping queries"));
    let searcher = MockSearcher::new()
        .with_links("a", &[url(1).as_str()])
        .with_links("b", &[url(1).as_str()]);
    let extractor = good_extractor(&urls(1..=1));
    let pipeline = ResearchPipeline::new(ai, searcher, extractor.clone());

    let snapshots = pipeline.collect(ResearchRequest::new(TOPIC)).await.unwrap();

    let last = snapshots.last().unwrap();
    assert_eq!(last.total_articles, 2);
    assert_eq!(last.articles.len(), 2);
    assert_eq!(extractor.attempts(&url(1)), 2);
}

#[tokio::test(start_paused = true)]
async fn test_retry_succeeds_on_third_try() {
    let target = url(1);
    let searcher = MockSearcher::new().with_links("printing press", &[target.as_str()]);
    let extractor = MockExtractor::new().with_script(
        &target,
        vec![
            MockOutcome::Error("connection reset".into()),
            MockOutcome::Error("timed out".into()),
            MockOutcome::Content(MockExtractor::content("Third Time", 250)),
        ],
    );
    let pipeline = ResearchPipeline::new(one_query_ai(), searcher, extractor.clone());
    let start = tokio::time::Instant::now();

    let snapshots = pipeline.collect(ResearchRequest::new(TOPIC)).await.unwrap();

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(3000), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(4500), "{elapsed:?}");
    assert_eq!(extractor.attempts(&target), 3);

    let last = snapshots.last().unwrap();
    assert_eq!(last.successful_articles, 1);
    assert!(matches!(
        &last.articles[0],
        ArticleResult::Success { title, summary: Some(_), error: None, .. } if title == "Third Time"
    ));
    assert!(last.duration >= Duration::from_millis(3000));
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_retries_record_failure_without_summarizing() {
    let target = url(1);
    let ai = one_query_ai();
    let searcher = MockSearcher::new().with_links("printing press", &[target.as_str()]);
    let extractor = MockExtractor::new().with_error(&target, "HTTP 500");
    let pipeline = ResearchPipeline::new(ai.clone(), searcher, extractor.clone());

    let snapshots = pipeline.collect(ResearchRequest::new(TOPIC)).await.unwrap();

    let last = snapshots.last().unwrap();
    assert_eq!(last.status, RunStatus::Completed);
    assert_eq!(last.failed_articles, 1);
    assert_eq!(
        last.articles[0],
        ArticleResult::failure(target.clone(), FAILED_TO_SCRAPE)
    );
    assert_eq!(last.articles[0].error(), Some("Failed to scrape"));
    assert_eq!(extractor.attempts(&target), 3);
    assert_eq!(ai.summarize_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_short_bodies_are_rejected_by_the_pipeline_gate() {
    let target = url(1);
    let searcher = MockSearcher::new().with_links("printing press", &[target.as_str()]);
    // Clears the extractor's floor but not the 200-char gate.
    let extractor = MockExtractor::new().with_article(&target, "Stub", 150);
    let pipeline = ResearchPipeline::new(one_query_ai(), searcher, extractor.clone());

    let snapshots = pipeline.collect(ResearchRequest::new(TOPIC)).await.unwrap();

    let last = snapshots.last().unwrap();
    assert_eq!(last.failed_articles, 1);
    assert!(!last.articles[0].is_success());
    assert_eq!(extractor.attempts(&target), 3);
}

#[tokio::test]
async fn test_summarizer_failure_keeps_article_but_counts_failed() {
    let found = urls(1..=2);
    let ai = one_query_ai().with_summary_error("Story 1", "model overloaded");
    let searcher = MockSearcher::new().with_links("printing press", &as_refs(&found));
    let pipeline = ResearchPipeline::new(ai, searcher, good_extractor(&found));

    let snapshots = pipeline.collect(ResearchRequest::new(TOPIC)).await.unwrap();

    let last = snapshots.last().unwrap();
    assert_eq!(last.successful_articles, 1);
    assert_eq!(last.failed_articles, 1);

    match &last.articles[0] {
        ArticleResult::Success {
            title,
            body,
            summary,
            error,
            ..
        } => {
            assert_eq!(title, "Story 1");
            assert_eq!(body.chars().count(), 300);
            assert!(summary.is_none());
            assert!(error.as_deref().is_some_and(|e| e.contains("model overloaded")));
        }
        other => panic!("expected extracted article, got {other:?}"),
    }
    assert_eq!(last.articles[1].summary(), Some("Summary of Story 2"));
    assert_eq!(last.status, RunStatus::Completed);
}

#[tokio::test]
async fn test_no_urls_ends_with_no_results() {
    let searcher = MockSearcher::new().with_links("printing press", &[]);
    let extractor = MockExtractor::new();
    let pipeline = ResearchPipeline::new(one_query_ai(), searcher, extractor.clone());

    let snapshots = pipeline.collect(ResearchRequest::new(TOPIC)).await.unwrap();

    assert_eq!(snapshots.len(), 2);
    let last = &snapshots[1];
    assert_eq!(last.status, RunStatus::NoResults);
    assert_eq!(last.status.to_string(), "Failed: No URLs found");
    assert!(last.articles.is_empty());
    assert_eq!(last.total_articles, 0);
    assert_eq!(last.successful_articles, 0);
    assert_eq!(last.failed_articles, 0);
    assert!(extractor.calls().is_empty());
}

#[tokio::test]
async fn test_failed_queries_are_skipped() {
    let ai = MockAI::new().with_plan(QueryPlan::new(["broken", "quota", "works"], "three"));
    let searcher = MockSearcher::new()
        .with_error("broken", "connection refused")
        .with_response("quota", SearchResponse::failed("Daily limit exceeded"))
        .with_links("works", &[url(1).as_str()]);
    let pipeline = ResearchPipeline::new(ai, searcher.clone(), good_extractor(&urls(1..=1)));

    let snapshots = pipeline.collect(ResearchRequest::new(TOPIC)).await.unwrap();

    assert_eq!(searcher.queries(), vec!["broken", "quota", "works"]);
    let last = snapshots.last().unwrap();
    assert_eq!(last.status, RunStatus::Completed);
    assert_eq!(last.total_articles, 1);
}

#[tokio::test]
async fn test_all_queries_failing_means_no_results() {
    let searcher = MockSearcher::new().with_error("printing press", "dns failure");
    let pipeline = ResearchPipeline::new(one_query_ai(), searcher, MockExtractor::new());

    let snapshots = pipeline.collect(ResearchRequest::new(TOPIC)).await.unwrap();

    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[1].status, RunStatus::NoResults);
}

#[tokio::test]
async fn test_planning_failure_ends_run_with_error() {
    let ai = MockAI::new().with_plan_error("invalid api key");
    let searcher = MockSearcher::new();
    let pipeline = ResearchPipeline::new(ai, searcher.clone(), MockExtractor::new());

    let mut run = pipeline.run(ResearchRequest::new(TOPIC));

    let first = run.next().await.unwrap();
    assert!(matches!(first, Err(ResearchError::Planning(_))));
    assert!(run.next().await.is_none());
    assert!(searcher.queries().is_empty());

    let err = pipeline.collect(ResearchRequest::new(TOPIC)).await.unwrap_err();
    assert!(err.to_string().contains("invalid api key"));
}

#[tokio::test]
async fn test_plan_is_requested_for_the_topic() {
    let ai = one_query_ai();
    let pipeline = ResearchPipeline::new(ai.clone(), MockSearcher::new(), MockExtractor::new());

    pipeline.collect(ResearchRequest::new(TOPIC)).await.unwrap();

    assert_eq!(
        ai.calls()[0],
        MockAICall::Plan {
            topic: TOPIC.to_string()
        }
    );
}

#[tokio::test]
async fn test_runs_are_independent() {
    let found = urls(1..=1);
    let searcher = MockSearcher::new().with_links("printing press", &as_refs(&found));
    let pipeline = ResearchPipeline::new(one_query_ai(), searcher, good_extractor(&found));

    let first = pipeline.collect(ResearchRequest::new(TOPIC)).await.unwrap();
    let second = pipeline.collect(ResearchRequest::new(TOPIC)).await.unwrap();

    assert_ne!(first[0].run_id, second[0].run_id);
    assert_eq!(first.len(), second.len());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_mid_retry_stops_without_final_snapshot() {
    let target = url(1);
    let searcher = MockSearcher::new().with_links("printing press", &[target.as_str()]);
    let extractor = MockExtractor::new().with_error(&target, "HTTP 503");
    let pipeline = ResearchPipeline::new(one_query_ai(), searcher, extractor.clone());
    let cancel = CancellationToken::new();

    let mut run = pipeline.run_with_cancel(ResearchRequest::new(TOPIC), cancel.clone());

    let first = run.next().await.unwrap().unwrap();
    assert_eq!(first.status, RunStatus::QueriesGenerated);

    let canceller = cancel.clone();
    tokio::spawn(async move {
        // Lands inside the first retry delay.
        tokio::time::sleep(Duration::from_millis(500)).await;
        canceller.cancel();
    });

    assert!(run.next().await.is_none());
    assert_eq!(extractor.attempts(&target), 1);
}

#[tokio::test]
async fn test_cancel_before_start_yields_nothing() {
    let ai = one_query_ai();
    let pipeline = ResearchPipeline::new(ai.clone(), MockSearcher::new(), MockExtractor::new());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut run = pipeline.run_with_cancel(ResearchRequest::new(TOPIC), cancel);

    assert!(run.next().await.is_none());
    assert!(ai.calls().is_empty());
}

#[tokio::test]
async fn test_custom_config_changes_cap() {
    let found = urls(1..=4);
    let searcher = MockSearcher::new().with_links("printing press", &as_refs(&found));
    let pipeline = ResearchPipeline::with_config(
        one_query_ai(),
        searcher,
        good_extractor(&found),
        PipelineConfig::default().with_max_articles(2),
    );

    let snapshots = pipeline.collect(ResearchRequest::new(TOPIC)).await.unwrap();

    assert_eq!(snapshots.last().unwrap().total_articles, 2);
    assert_cumulative(&snapshots);
}

#[tokio::test]
async fn test_snapshot_serializes_for_consumers() {
    let found = urls(1..=1);
    let searcher = MockSearcher::new().with_links("printing press", &as_refs(&found));
    let pipeline = ResearchPipeline::new(one_query_ai(), searcher, good_extractor(&found));

    let snapshots = pipeline.collect(ResearchRequest::new(TOPIC)).await.unwrap();
    let json = serde_json::to_value(snapshots.last().unwrap()).unwrap();

    assert_eq!(json["status"], "Completed");
    assert_eq!(json["query"], TOPIC);
    assert_eq!(json["total_articles"], 1);
    assert_eq!(json["articles"][0]["status"], "success");
    assert!(json["duration_seconds"].is_number());
    assert!(json.get("plan").is_none());
}
