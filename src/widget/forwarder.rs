// src/widget/forwarder.rs

//! Translation of raw widget events into session events.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::session::SessionEvent;

use super::{CodeWidget, WidgetEvent};

/// Spawn the task that translates raw widget events into session events.
///
/// The embed's `execute` event carries no payload, so the forwarder performs
/// the captured-output query here and embeds the result in
/// [`SessionEvent::RunFinished`]. The task ends when the raw channel closes
/// or the session stops listening.
pub fn spawn_forwarder<W>(
    widget: W,
    mut widget_rx: mpsc::Receiver<WidgetEvent>,
    session_tx: mpsc::Sender<SessionEvent>,
) -> JoinHandle<()>
where
    W: CodeWidget + 'static,
{
    tokio::spawn(async move {
        while let Some(event) = widget_rx.recv().await {
            debug!(?event, "widget event received");

            let translated = match event {
                WidgetEvent::Load => SessionEvent::Loaded,
                WidgetEvent::StartExecute => SessionEvent::RunStarted,
                WidgetEvent::Execute => {
                    let output = widget.captured_output().await;
                    SessionEvent::RunFinished { output }
                }
                WidgetEvent::Error { message } => SessionEvent::RunFailed { message },
            };

            if let Err(err) = session_tx.send(translated).await {
                // Session side went away; nothing left to forward to.
                warn!("failed to forward session event: {err}");
                break;
            }
        }

        debug!("widget event channel closed; forwarder exiting");
    })
}
