use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use runpad::answer::AnswerRecord;
use runpad::errors::Result;
use runpad::session::{Session, SessionEvent, SessionOptions};
use runpad::widget::{CodeWidget, ScriptedWidget};

use crate::recording_sink::RecordingSink;

/// A session running against a scripted widget and a recording sink.
pub struct SpawnedSession {
    pub widget: ScriptedWidget,
    pub events: mpsc::Sender<SessionEvent>,
    pub submitted: Arc<Mutex<Vec<AnswerRecord>>>,
    pub handle: JoinHandle<Result<()>>,
}

impl SpawnedSession {
    /// Send one event into the session loop.
    pub async fn send(&self, event: SessionEvent) {
        self.events
            .send(event)
            .await
            .expect("session stopped receiving events");
    }

    /// Snapshot of the records submitted so far.
    pub fn submitted(&self) -> Vec<AnswerRecord> {
        self.submitted.lock().unwrap().clone()
    }

    /// Shut the session down and wait for the loop to exit.
    ///
    /// Events sent before this call are processed before the shutdown, so
    /// assertions made afterwards see their effects.
    pub async fn shutdown(self) -> Result<()> {
        self.send(SessionEvent::Shutdown).await;
        self.handle.await.expect("session task panicked")
    }
}

/// Spawn a session over a fresh scripted widget and recording sink.
pub fn spawn_session(options: SessionOptions) -> SpawnedSession {
    let widget = ScriptedWidget::default();
    widget.begin_load(&options.initial_code);

    let (events, rx) = mpsc::channel::<SessionEvent>(16);
    let submitted = Arc::new(Mutex::new(Vec::new()));
    let sink = RecordingSink::new(Arc::clone(&submitted));

    let session = Session::new(options, widget.clone(), sink, rx, events.clone());
    let handle = tokio::spawn(session.run());

    SpawnedSession {
        widget,
        events,
        submitted,
        handle,
    }
}
