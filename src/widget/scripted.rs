// src/widget/scripted.rs

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use super::{CodeWidget, SetupScript};

#[derive(Debug, Default)]
struct ScriptedState {
    code: String,
    staged_output: Option<String>,
    load_begun: bool,
    setup_scripts: Vec<SetupScript>,
    toggle_hidden: bool,
    editable: bool,
    editor_shown: bool,
    focus_released: bool,
}

/// In-memory stand-in for the embedded widget.
///
/// Holds the editor buffer and a staged capture result behind shared state,
/// and records which reveal operations were performed so tests can assert
/// on them. Used by the replay harness and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedWidget {
    state: Arc<Mutex<ScriptedState>>,
}

impl ScriptedWidget {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ScriptedState {
                code: code.into(),
                ..ScriptedState::default()
            })),
        }
    }

    /// Stage the transcript text the next capture query returns.
    pub fn stage_output(&self, output: Option<String>) {
        self.state.lock().unwrap().staged_output = output;
    }

    pub fn load_begun(&self) -> bool {
        self.state.lock().unwrap().load_begun
    }

    pub fn setup_scripts(&self) -> Vec<SetupScript> {
        self.state.lock().unwrap().setup_scripts.clone()
    }

    pub fn toggle_hidden(&self) -> bool {
        self.state.lock().unwrap().toggle_hidden
    }

    pub fn editable(&self) -> bool {
        self.state.lock().unwrap().editable
    }

    pub fn editor_shown(&self) -> bool {
        self.state.lock().unwrap().editor_shown
    }

    pub fn focus_released(&self) -> bool {
        self.state.lock().unwrap().focus_released
    }
}

impl CodeWidget for ScriptedWidget {
    fn begin_load(&self, code: &str) {
        let mut state = self.state.lock().unwrap();
        state.code = code.to_string();
        state.load_begun = true;
    }

    fn set_code(&self, code: &str) {
        self.state.lock().unwrap().code = code.to_string();
    }

    fn code(&self) -> String {
        self.state.lock().unwrap().code.clone()
    }

    fn inject_setup_scripts(&self, scripts: &[SetupScript]) {
        self.state
            .lock()
            .unwrap()
            .setup_scripts
            .extend_from_slice(scripts);
    }

    fn hide_toggle_button(&self) {
        self.state.lock().unwrap().toggle_hidden = true;
    }

    fn set_editable(&self) {
        self.state.lock().unwrap().editable = true;
    }

    fn show_editor(&self) {
        self.state.lock().unwrap().editor_shown = true;
    }

    fn release_focus(&self) {
        self.state.lock().unwrap().focus_released = true;
    }

    fn captured_output(
        &self,
    ) -> Pin<Box<dyn Future<Output = Option<String>> + Send + '_>> {
        let output = self.state.lock().unwrap().staged_output.clone();
        Box::pin(async move { output })
    }
}
