// tests/session_error_suppression.rs

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use runpad::session::{SessionEvent, SessionOptions};
use runpad_test_utils::harness::spawn_session;
use runpad_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn fast_options(initial_code: &str, suppression_ms: u64) -> SessionOptions {
    let mut options = SessionOptions::new(initial_code);
    options.suppression_window = Duration::from_millis(suppression_ms);
    options
}

#[tokio::test]
async fn error_submits_message_and_empty_output() -> TestResult {
    with_timeout(async {
        init_tracing();

        let session = spawn_session(fast_options("say x", 100));
        let submitted = Arc::clone(&session.submitted);

        session.send(SessionEvent::RunStarted).await;
        session
            .send(SessionEvent::RunFailed {
                message: "x is not defined".to_string(),
            })
            .await;
        session.shutdown().await?;

        let records = submitted.lock().unwrap().clone();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "say x");
        assert_eq!(records[0].output, "");
        assert_eq!(records[0].evaluation, "");
        assert_eq!(records[0].error, "x is not defined");

        Ok(())
    })
    .await
}

#[tokio::test]
async fn suppression_blocks_completion_until_window_elapses() -> TestResult {
    with_timeout(async {
        init_tracing();

        let session = spawn_session(fast_options("say x", 300));
        let submitted = Arc::clone(&session.submitted);

        // 1. Error opens the suppression window.
        session.send(SessionEvent::RunStarted).await;
        session
            .send(SessionEvent::RunFailed {
                message: "x is not defined".to_string(),
            })
            .await;

        // 2. A re-run completes inside the window; the completion is eaten.
        session.send(SessionEvent::RunStarted).await;
        session
            .send(SessionEvent::RunFinished {
                output: Some("ghost".to_string()),
            })
            .await;
        sleep(Duration::from_millis(100)).await;
        assert_eq!(submitted.lock().unwrap().len(), 1);

        // 3. After the window clears, the same cycle can still complete.
        sleep(Duration::from_millis(400)).await;
        session
            .send(SessionEvent::RunFinished {
                output: Some("real".to_string()),
            })
            .await;
        session.shutdown().await?;

        let records = submitted.lock().unwrap().clone();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].error, "x is not defined");
        assert_eq!(records[1].output, "real");

        Ok(())
    })
    .await
}

#[tokio::test]
async fn duplicate_error_in_submitted_cycle_is_a_noop() -> TestResult {
    with_timeout(async {
        init_tracing();

        let session = spawn_session(fast_options("say x", 100));
        let submitted = Arc::clone(&session.submitted);

        session.send(SessionEvent::RunStarted).await;
        session
            .send(SessionEvent::RunFailed {
                message: "first".to_string(),
            })
            .await;
        session
            .send(SessionEvent::RunFailed {
                message: "second".to_string(),
            })
            .await;
        session.shutdown().await?;

        let records = submitted.lock().unwrap().clone();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].error, "first");

        Ok(())
    })
    .await
}

#[tokio::test]
async fn fresh_cycle_error_submits_even_while_suppressing() -> TestResult {
    with_timeout(async {
        init_tracing();

        let session = spawn_session(fast_options("say x", 300));
        let submitted = Arc::clone(&session.submitted);

        session.send(SessionEvent::RunStarted).await;
        session
            .send(SessionEvent::RunFailed {
                message: "first".to_string(),
            })
            .await;

        // The suppression window eats completions, not a new cycle's error.
        session.send(SessionEvent::RunStarted).await;
        session
            .send(SessionEvent::RunFailed {
                message: "second".to_string(),
            })
            .await;
        session.shutdown().await?;

        let records = submitted.lock().unwrap().clone();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].error, "first");
        assert_eq!(records[1].error, "second");

        Ok(())
    })
    .await
}
