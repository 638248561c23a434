#![allow(dead_code)]

use runpad::answer::rules::AnswerRule;
use runpad::config::{RawScenarioFile, ScenarioFile, SessionSection, StepAction, StepConfig};

/// Builder for `ScenarioFile` to simplify test setup.
pub struct ScenarioBuilder {
    scenario: RawScenarioFile,
}

impl ScenarioBuilder {
    pub fn new(initial_code: &str) -> Self {
        Self {
            scenario: RawScenarioFile {
                session: SessionSection {
                    initial_code: initial_code.to_string(),
                    ..SessionSection::default()
                },
                step: Vec::new(),
                check: Vec::new(),
            },
        }
    }

    pub fn fallback_ms(mut self, ms: u64) -> Self {
        self.scenario.session.fallback_ms = ms;
        self
    }

    pub fn suppression_ms(mut self, ms: u64) -> Self {
        self.scenario.session.suppression_ms = ms;
        self
    }

    pub fn settle_ms(mut self, ms: u64) -> Self {
        self.scenario.session.settle_ms = Some(ms);
        self
    }

    pub fn start_at(mut self, at_ms: u64) -> Self {
        self.scenario.step.push(StepConfig {
            at_ms,
            action: StepAction::Start,
        });
        self
    }

    pub fn finish_at(mut self, at_ms: u64, output: Option<&str>) -> Self {
        self.scenario.step.push(StepConfig {
            at_ms,
            action: StepAction::Finish {
                output: output.map(str::to_string),
            },
        });
        self
    }

    pub fn fail_at(mut self, at_ms: u64, message: &str) -> Self {
        self.scenario.step.push(StepConfig {
            at_ms,
            action: StepAction::Fail {
                message: message.to_string(),
            },
        });
        self
    }

    pub fn edit_at(mut self, at_ms: u64, code: &str) -> Self {
        self.scenario.step.push(StepConfig {
            at_ms,
            action: StepAction::Edit {
                code: code.to_string(),
            },
        });
        self
    }

    pub fn reset_at(mut self, at_ms: u64) -> Self {
        self.scenario.step.push(StepConfig {
            at_ms,
            action: StepAction::Reset,
        });
        self
    }

    pub fn with_check(mut self, check: AnswerRule) -> Self {
        self.scenario.check.push(check);
        self
    }

    pub fn build(self) -> ScenarioFile {
        ScenarioFile::try_from(self.scenario)
            .expect("Failed to build valid scenario from builder")
    }
}
