// src/widget/instrumentation.rs

//! Output-capture instrumentation for the embedded widget.

/// Expression evaluated inside the widget to read the visible transcript
/// after a run.
///
/// Separating transcript entries with newlines is a TODO for the
/// instrumentation script; for now multi-line output arrives run together.
pub const CAPTURE_EXPRESSION: &str = "$('body div').text();";

const OUTPUT_CAPTURE_CODE: &str = "ht();

oldsay = window.say
say = function(x) {
  write(x);
  oldsay(x);
};";

/// A script the widget evaluates while preparing its run environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupScript {
    pub code: String,
    pub mime_type: String,
}

impl SetupScript {
    /// The standard instrumentation script.
    ///
    /// Hides the on-screen actor and mirrors every `say` call into the
    /// written transcript so [`CAPTURE_EXPRESSION`] can read it back.
    pub fn output_capture() -> Self {
        Self {
            code: OUTPUT_CAPTURE_CODE.to_string(),
            mime_type: "text/javascript".to_string(),
        }
    }
}
