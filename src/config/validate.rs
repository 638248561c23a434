// src/config/validate.rs

use crate::config::model::{RawScenarioFile, ScenarioFile};
use crate::errors::{Result, RunpadError};

impl TryFrom<RawScenarioFile> for ScenarioFile {
    type Error = crate::errors::RunpadError;

    fn try_from(raw: RawScenarioFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_scenario(&raw)?;
        Ok(ScenarioFile::new_unchecked(raw.session, raw.step, raw.check))
    }
}

fn validate_raw_scenario(raw: &RawScenarioFile) -> Result<()> {
    validate_session_section(raw)?;
    validate_step_order(raw)?;
    Ok(())
}

fn validate_session_section(raw: &RawScenarioFile) -> Result<()> {
    if raw.session.fallback_ms == 0 {
        return Err(RunpadError::ScenarioError(
            "[session].fallback_ms must be >= 1 (got 0)".to_string(),
        ));
    }

    if raw.session.suppression_ms == 0 {
        return Err(RunpadError::ScenarioError(
            "[session].suppression_ms must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn validate_step_order(raw: &RawScenarioFile) -> Result<()> {
    let mut last_at = 0u64;
    for (index, step) in raw.step.iter().enumerate() {
        if step.at_ms < last_at {
            return Err(RunpadError::ScenarioError(format!(
                "step {} fires at {}ms, before the previous step at {}ms",
                index, step.at_ms, last_at
            )));
        }
        last_at = step.at_ms;
    }
    Ok(())
}
