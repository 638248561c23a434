// src/session/driver.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::answer::AnswerRecord;
use crate::errors::Result;
use crate::submit::AnswerSink;
use crate::widget::{CodeWidget, SetupScript};

use super::core::SessionCore;
use super::{RunId, RunOutcome, SessionCommand, SessionEvent, SessionOptions};

/// Drives one widget session in response to `SessionEvent`s,
/// and delegates record submission to an `AnswerSink`.
///
/// This is a pure IO shell around `SessionCore`, which contains all the
/// session semantics. This struct handles async IO: reading events from the
/// channel, arming timers, driving the widget and submitting records.
pub struct Session<W: CodeWidget, S: AnswerSink> {
    core: SessionCore,
    options: SessionOptions,
    widget: W,
    sink: S,
    event_rx: mpsc::Receiver<SessionEvent>,
    timer_tx: mpsc::Sender<SessionEvent>,
}

impl<W: CodeWidget, S: AnswerSink> fmt::Debug for Session<W, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("core", &self.core)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<W: CodeWidget, S: AnswerSink> Session<W, S> {
    /// Build a session around an already-loading widget.
    ///
    /// `timer_tx` must be a sender for the same channel `event_rx` reads
    /// from; timer expiries re-enter the loop as ordinary events.
    pub fn new(
        options: SessionOptions,
        widget: W,
        sink: S,
        event_rx: mpsc::Receiver<SessionEvent>,
        timer_tx: mpsc::Sender<SessionEvent>,
    ) -> Self {
        Self {
            core: SessionCore::new(),
            options,
            widget,
            sink,
            event_rx,
            timer_tx,
        }
    }

    /// Main event loop.
    ///
    /// - Consumes `SessionEvent`s from `event_rx`.
    /// - Feeds them into the core state machine.
    /// - Executes commands returned by the core (reveal, timers, submit).
    pub async fn run(mut self) -> Result<()> {
        info!("session started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("session event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "session received event");

            // Feed the event into the pure core and get commands back.
            let step = self.core.step(event);

            // Execute the commands.
            for command in step.commands {
                self.execute_command(command).await?;
            }

            // If the core says to stop, break out of the loop.
            if !step.keep_running {
                info!("core requested exit; stopping session");
                break;
            }
        }

        info!("session exiting");
        Ok(())
    }

    /// Execute a single command from the core.
    async fn execute_command(&mut self, command: SessionCommand) -> Result<()> {
        match command {
            SessionCommand::RevealEditor => self.reveal_editor(),
            SessionCommand::ArmFallback { run } => self.arm_fallback(run),
            SessionCommand::ArmSuppressionClear => self.arm_suppression_clear(),
            SessionCommand::Submit(outcome) => self.submit(outcome).await?,
            SessionCommand::ResetEditor => {
                debug!("resetting editor to initial code");
                self.widget.set_code(&self.options.initial_code);
            }
        }
        Ok(())
    }

    fn reveal_editor(&self) {
        debug!("widget loaded; revealing editor");

        self.widget
            .inject_setup_scripts(&[SetupScript::output_capture()]);
        self.widget.hide_toggle_button();
        self.widget.set_editable();
        self.widget.show_editor();

        // The widget takes the input focus while loading; give it back.
        self.widget.release_focus();
    }

    fn arm_fallback(&self, run: RunId) {
        let tx = self.timer_tx.clone();
        let timeout = self.options.fallback_timeout;

        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            // An expiry for a cycle that already ended is discarded by the
            // core, so firing late is harmless.
            let _ = tx.send(SessionEvent::FallbackElapsed { run }).await;
        });
    }

    fn arm_suppression_clear(&self) {
        let tx = self.timer_tx.clone();
        let window = self.options.suppression_window;

        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let _ = tx.send(SessionEvent::SuppressionElapsed).await;
        });
    }

    /// Build the cycle's record from its outcome and hand it to the sink.
    ///
    /// The code field is read from the widget at submission time, matching
    /// what the learner sees when the record is produced.
    async fn submit(&mut self, outcome: RunOutcome) -> Result<()> {
        let code = self.widget.code();

        let record = match outcome {
            RunOutcome::TimedOut => {
                debug!(code = %code, "no output received; submitting before run finished");
                AnswerRecord::timed_out(code)
            }
            RunOutcome::Finished { output } => {
                debug!(code = %code, output = ?output, "run finished; submitting output");
                AnswerRecord::finished(code, output)
            }
            RunOutcome::Failed { message } => {
                debug!(code = %code, error = %message, "run failed; submitting error");
                AnswerRecord::failed(code, message)
            }
        };

        self.sink.submit(record).await
    }
}
