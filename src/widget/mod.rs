// src/widget/mod.rs

//! Embedded code-widget abstraction.
//!
//! This module ties together:
//! - the [`CodeWidget`] trait the session engine drives
//! - the raw [`WidgetEvent`]s the embed emits
//! - the forwarder task that translates raw events into session events
//! - the output-capture instrumentation script
//! - a scripted in-memory widget for the replay harness and tests.

use std::future::Future;
use std::pin::Pin;

pub mod forwarder;
pub mod instrumentation;
pub mod scripted;

pub use forwarder::spawn_forwarder;
pub use instrumentation::{SetupScript, CAPTURE_EXPRESSION};
pub use scripted::ScriptedWidget;

/// Raw events emitted by the embedded widget.
///
/// The forwarder translates these into session events; the engine never
/// consumes them directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The embed finished loading and is ready for setup.
    Load,
    /// The learner asked the widget to run their code.
    StartExecute,
    /// The learner's code ran to completion.
    Execute,
    /// The learner's code raised an error.
    Error { message: String },
}

/// Trait abstracting the embedded code editor/runtime widget.
///
/// Production embeds wrap the real widget handle; the harness and tests use
/// [`ScriptedWidget`]. Handles are cheap to clone and every clone observes
/// the same underlying widget.
pub trait CodeWidget: Clone + Send + Sync {
    /// Start loading the embed with this initial buffer content.
    fn begin_load(&self, code: &str);

    /// Replace the editor buffer contents.
    fn set_code(&self, code: &str);

    /// Current editor buffer contents.
    fn code(&self) -> String;

    /// Evaluate setup scripts inside the widget's execution environment.
    fn inject_setup_scripts(&self, scripts: &[SetupScript]);

    /// Hide the widget's block/text mode toggle.
    fn hide_toggle_button(&self);

    /// Make the editor buffer editable.
    fn set_editable(&self);

    /// Reveal the editor pane.
    fn show_editor(&self);

    /// Drop the input focus the widget grabs while loading.
    fn release_focus(&self);

    /// Query the transcript text produced by the last run.
    ///
    /// Production embeds evaluate [`CAPTURE_EXPRESSION`] inside the widget;
    /// returns `None` when the widget reports no capturable output.
    fn captured_output(
        &self,
    ) -> Pin<Box<dyn Future<Output = Option<String>> + Send + '_>>;
}
