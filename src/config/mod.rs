// src/config/mod.rs

//! Scenario configuration for the replay harness.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_scenario_path, load_and_validate, load_from_path};
pub use model::{RawScenarioFile, ScenarioFile, SessionSection, StepAction, StepConfig};
