use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use runpad::answer::AnswerRecord;
use runpad::errors::Result;
use runpad::submit::AnswerSink;

/// A fake sink that records every submitted answer record in memory.
///
/// Built via [`RecordingSink::rejecting`], it instead refuses every
/// submission, for tests that exercise the session's error path.
pub struct RecordingSink {
    submitted: Arc<Mutex<Vec<AnswerRecord>>>,
    reject: bool,
}

impl RecordingSink {
    pub fn new(submitted: Arc<Mutex<Vec<AnswerRecord>>>) -> Self {
        Self {
            submitted,
            reject: false,
        }
    }

    /// A sink whose host side refuses every submission.
    pub fn rejecting(submitted: Arc<Mutex<Vec<AnswerRecord>>>) -> Self {
        Self {
            submitted,
            reject: true,
        }
    }
}

impl AnswerSink for RecordingSink {
    fn submit(
        &mut self,
        record: AnswerRecord,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let submitted = Arc::clone(&self.submitted);
        let reject = self.reject;

        Box::pin(async move {
            if reject {
                return Err(anyhow::anyhow!("host refused the answer record").into());
            }

            {
                let mut guard = submitted.lock().unwrap();
                guard.push(record);
            }
            Ok(())
        })
    }
}
