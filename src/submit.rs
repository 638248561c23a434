// src/submit.rs

//! Answer submission abstraction.
//!
//! The session talks to an `AnswerSink` instead of the host's grading flow
//! directly. This makes it easy to swap in a recording sink in tests while
//! keeping the production hand-off a plain channel send.
//!
//! - `ChannelSink` is the implementation used by the harness: it forwards
//!   each record over an mpsc channel to whoever collects them.
//! - Tests can provide their own `AnswerSink` that, for example, stores
//!   records in memory for later assertions.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;

use crate::answer::AnswerRecord;
use crate::errors::{Error, Result};

/// Trait abstracting where submitted answer records go.
///
/// The session calls `submit` at most once per run cycle.
pub trait AnswerSink: Send {
    /// Hand one answer record to the host.
    fn submit(
        &mut self,
        record: AnswerRecord,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Production sink that forwards records over an mpsc channel.
pub struct ChannelSink {
    tx: mpsc::Sender<AnswerRecord>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<AnswerRecord>) -> Self {
        Self { tx }
    }
}

impl AnswerSink for ChannelSink {
    fn submit(
        &mut self,
        record: AnswerRecord,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        // Clone the sender so the future doesn't borrow `self` across `await`.
        let tx = self.tx.clone();

        Box::pin(async move {
            tx.send(record).await.map_err(Error::from)?;
            Ok(())
        })
    }
}
