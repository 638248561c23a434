// tests/session_run_cycle.rs

use std::error::Error;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use runpad::session::{Session, SessionEvent, SessionOptions};
use runpad::widget::{CodeWidget, ScriptedWidget};
use runpad_test_utils::harness::spawn_session;
use runpad_test_utils::recording_sink::RecordingSink;
use runpad_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn loaded_reveals_editor() -> TestResult {
    with_timeout(async {
        init_tracing();

        let session = spawn_session(SessionOptions::new("print 1"));
        let widget = session.widget.clone();

        session.send(SessionEvent::Loaded).await;
        session.shutdown().await?;

        assert!(widget.load_begun());
        assert_eq!(widget.setup_scripts().len(), 1);
        assert!(widget.toggle_hidden());
        assert!(widget.editable());
        assert!(widget.editor_shown());
        assert!(widget.focus_released());

        Ok(())
    })
    .await
}

#[tokio::test]
async fn run_finished_submits_captured_output() -> TestResult {
    with_timeout(async {
        init_tracing();

        let session = spawn_session(SessionOptions::new("print 1"));
        let submitted = Arc::clone(&session.submitted);

        session.send(SessionEvent::Loaded).await;
        session.send(SessionEvent::RunStarted).await;
        session
            .send(SessionEvent::RunFinished {
                output: Some("1".to_string()),
            })
            .await;
        session.shutdown().await?;

        let records = submitted.lock().unwrap().clone();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "print 1");
        assert_eq!(records[0].output, "1");
        assert_eq!(records[0].evaluation, "");
        assert_eq!(records[0].error, "");

        Ok(())
    })
    .await
}

#[tokio::test]
async fn falsy_capture_becomes_empty_output() -> TestResult {
    with_timeout(async {
        init_tracing();

        let session = spawn_session(SessionOptions::new("x = 1"));
        let submitted = Arc::clone(&session.submitted);

        session.send(SessionEvent::RunStarted).await;
        session.send(SessionEvent::RunFinished { output: None }).await;
        session.shutdown().await?;

        let records = submitted.lock().unwrap().clone();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].output, "");
        assert_eq!(records[0].error, "");

        Ok(())
    })
    .await
}

#[tokio::test]
async fn second_terminal_event_in_same_cycle_is_ignored() -> TestResult {
    with_timeout(async {
        init_tracing();

        let session = spawn_session(SessionOptions::new("print 1"));
        let submitted = Arc::clone(&session.submitted);

        session.send(SessionEvent::RunStarted).await;
        session
            .send(SessionEvent::RunFinished {
                output: Some("1".to_string()),
            })
            .await;
        // An error arriving after the submission must not produce a record.
        session
            .send(SessionEvent::RunFailed {
                message: "late failure".to_string(),
            })
            .await;
        session.shutdown().await?;

        let records = submitted.lock().unwrap().clone();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].output, "1");
        assert_eq!(records[0].error, "");

        Ok(())
    })
    .await
}

#[tokio::test]
async fn terminal_event_without_a_start_is_ignored() -> TestResult {
    with_timeout(async {
        init_tracing();

        let session = spawn_session(SessionOptions::new("print 1"));
        let submitted = Arc::clone(&session.submitted);

        session
            .send(SessionEvent::RunFinished {
                output: Some("phantom".to_string()),
            })
            .await;
        session
            .send(SessionEvent::RunFailed {
                message: "phantom".to_string(),
            })
            .await;
        session.shutdown().await?;

        assert!(submitted.lock().unwrap().is_empty());

        Ok(())
    })
    .await
}

#[tokio::test]
async fn each_cycle_submits_exactly_once() -> TestResult {
    with_timeout(async {
        init_tracing();

        let session = spawn_session(SessionOptions::new("print 1"));
        let submitted = Arc::clone(&session.submitted);

        session.send(SessionEvent::RunStarted).await;
        session
            .send(SessionEvent::RunFinished {
                output: Some("first".to_string()),
            })
            .await;
        session.send(SessionEvent::RunStarted).await;
        session
            .send(SessionEvent::RunFinished {
                output: Some("second".to_string()),
            })
            .await;
        session.shutdown().await?;

        let records = submitted.lock().unwrap().clone();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].output, "first");
        assert_eq!(records[1].output, "second");

        Ok(())
    })
    .await
}

#[tokio::test]
async fn code_is_read_at_submission_time() -> TestResult {
    with_timeout(async {
        init_tracing();

        let session = spawn_session(SessionOptions::new("print 1"));
        let submitted = Arc::clone(&session.submitted);
        let widget = session.widget.clone();

        session.send(SessionEvent::RunStarted).await;
        // The learner keeps typing while the run is in flight.
        widget.set_code("print 2");
        session
            .send(SessionEvent::RunFinished {
                output: Some("2".to_string()),
            })
            .await;
        session.shutdown().await?;

        let records = submitted.lock().unwrap().clone();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "print 2");

        Ok(())
    })
    .await
}

#[tokio::test]
async fn sink_failure_propagates_out_of_the_session_loop() -> TestResult {
    with_timeout(async {
        init_tracing();

        let widget = ScriptedWidget::default();
        widget.begin_load("print 1");

        let (tx, rx) = mpsc::channel::<SessionEvent>(16);
        let submitted = Arc::new(Mutex::new(Vec::new()));
        let sink = RecordingSink::rejecting(Arc::clone(&submitted));

        let session = Session::new(
            SessionOptions::new("print 1"),
            widget.clone(),
            sink,
            rx,
            tx.clone(),
        );
        let handle = tokio::spawn(session.run());

        tx.send(SessionEvent::RunStarted).await?;
        tx.send(SessionEvent::RunFinished {
            output: Some("1".to_string()),
        })
        .await?;

        let result = handle.await?;
        assert!(result.is_err());
        assert!(submitted.lock().unwrap().is_empty());

        Ok(())
    })
    .await
}
