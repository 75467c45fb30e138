// src/core/types.rs — Refinement domain types

use serde::{Deserialize, Serialize};

use crate::infra::errors::GenerationError;
use crate::provider::TokenUsage;
use crate::rubric::EvaluationResult;

/// One failed pass through the loop: the prompt that was sent and the
/// evaluation of what came back (which carries the candidate text).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationRecord {
    pub iteration: u32,
    pub prompt: String,
    pub evaluation: EvaluationResult,
}

impl IterationRecord {
    pub fn candidate(&self) -> &str {
        &self.evaluation.candidate
    }
}

/// Terminal status of a refinement run. Exactly one is reached per run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunStatus {
    /// The rubric was satisfied.
    Succeeded,
    /// The iteration budget was spent without satisfying the rubric. Not an
    /// error: the caller decides whether to retry with a larger budget.
    Exhausted,
    /// The generation service failed; the error is carried verbatim.
    Failed(GenerationError),
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Succeeded => write!(f, "succeeded"),
            RunStatus::Exhausted => write!(f, "exhausted"),
            RunStatus::Failed(e) => write!(f, "failed ({e})"),
        }
    }
}

/// Final result of a refinement run, with full history for diagnosis.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub status: RunStatus,
    /// Last candidate text, if any Task generation completed.
    pub output: Option<String>,
    /// Last evaluation, if any candidate was evaluated.
    pub evaluation: Option<EvaluationResult>,
    /// Completed Task-role generations.
    pub iterations: u32,
    /// One record per failed evaluation, oldest first.
    pub history: Vec<IterationRecord>,
    pub usage: TokenUsage,
}

impl RunOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self.status, RunStatus::Succeeded)
    }
}

/// Loop-level settings resolved before a run.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub max_iterations: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self { max_iterations: 4 }
    }
}

impl From<&crate::infra::config::RefineConfig> for LoopConfig {
    fn from(cfg: &crate::infra::config::RefineConfig) -> Self {
        Self {
            max_iterations: cfg.max_iterations,
        }
    }
}

/// Real-time progress events emitted by the controller.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    RunStart {
        max_iterations: u32,
    },
    IterationStart {
        iteration: u32,
        max_iterations: u32,
    },
    CandidateReady {
        iteration: u32,
        chars: usize,
    },
    ChecksFailed {
        iteration: u32,
        failed: Vec<String>,
    },
    PromptRewritten {
        iteration: u32,
    },
    Complete {
        status: String,
        iterations: u32,
        total_tokens: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::errors::{GenerationError, GenerationErrorKind};

    #[test]
    fn test_run_status_display() {
        assert_eq!(format!("{}", RunStatus::Succeeded), "succeeded");
        assert_eq!(format!("{}", RunStatus::Exhausted), "exhausted");
        let failed = RunStatus::Failed(GenerationError::new(
            GenerationErrorKind::RateLimited,
            "429",
        ));
        assert_eq!(format!("{}", failed), "failed (rate limited: 429)");
    }

    #[test]
    fn test_iteration_record_candidate_accessor() {
        let record = IterationRecord {
            iteration: 0,
            prompt: "Write a brief".into(),
            evaluation: EvaluationResult {
                candidate: "incomplete draft".into(),
                failed: vec!["Sources".into()],
            },
        };
        assert_eq!(record.candidate(), "incomplete draft");
    }

    #[test]
    fn test_loop_config_default() {
        assert_eq!(LoopConfig::default().max_iterations, 4);
    }

    #[test]
    fn test_loop_config_from_refine_config() {
        let refine = crate::infra::config::RefineConfig { max_iterations: 7 };
        assert_eq!(LoopConfig::from(&refine).max_iterations, 7);
    }

    #[test]
    fn test_outcome_succeeded() {
        let outcome = RunOutcome {
            status: RunStatus::Succeeded,
            output: Some("text".into()),
            evaluation: None,
            iterations: 1,
            history: vec![],
            usage: TokenUsage::default(),
        };
        assert!(outcome.succeeded());

        let outcome = RunOutcome {
            status: RunStatus::Exhausted,
            ..outcome
        };
        assert!(!outcome.succeeded());
    }
}
