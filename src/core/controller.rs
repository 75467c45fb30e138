// src/core/controller.rs — The refinement loop

use std::sync::Arc;

use super::meta_prompt::MetaPromptTemplate;
use super::types::{IterationRecord, LoopConfig, ProgressEvent, RunOutcome, RunStatus};
use crate::infra::config::ProfilesConfig;
use crate::infra::errors::{GenerationError, RepromptError};
use crate::provider::roles::RoleModels;
use crate::provider::{GenRole, GenerationClient, GenerationRequest, TokenUsage};
use crate::rubric::Rubric;

/// Drives the generate → evaluate → rewrite loop for one refinement run.
///
/// All state for a run lives in local variables of [`run`]; nothing is
/// shared across runs and nothing survives the call. A service failure at
/// either role halts the run with the error carried verbatim in the
/// outcome; rubric failures are never errors, they drive the rewrite.
pub struct RefinementController {
    client: Arc<dyn GenerationClient>,
    roles: RoleModels,
    profiles: ProfilesConfig,
    meta_template: MetaPromptTemplate,
    config: LoopConfig,
    on_progress: Option<Box<dyn Fn(ProgressEvent) + Send>>,
}

impl RefinementController {
    pub fn new(client: Arc<dyn GenerationClient>, roles: RoleModels, config: LoopConfig) -> Self {
        Self {
            client,
            roles,
            profiles: ProfilesConfig::default(),
            meta_template: MetaPromptTemplate::default(),
            config,
            on_progress: None,
        }
    }

    pub fn with_profiles(mut self, profiles: ProfilesConfig) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn with_meta_template(mut self, template: MetaPromptTemplate) -> Self {
        self.meta_template = template;
        self
    }

    /// Set a callback for real-time progress events.
    pub fn with_progress(mut self, cb: impl Fn(ProgressEvent) + Send + 'static) -> Self {
        self.on_progress = Some(Box::new(cb));
        self
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(ref cb) = self.on_progress {
            cb(event);
        }
    }

    fn request(&self, role: GenRole, prompt: String) -> GenerationRequest {
        let profile = match role {
            GenRole::Task => &self.profiles.task,
            GenRole::Meta => &self.profiles.meta,
        };
        GenerationRequest::new(role, self.roles.for_role(role), prompt).with_profile(profile)
    }

    /// Run the refinement loop to a terminal state.
    ///
    /// Returns `Err` only for configuration faults caught before any
    /// generation call (blank prompt, zero budget, or — impossible with a
    /// pre-validated template — a rewrite-render failure). Every service
    /// failure is reported inside the outcome as [`RunStatus::Failed`].
    pub async fn run(&self, initial_prompt: &str, rubric: &Rubric) -> Result<RunOutcome, RepromptError> {
        if initial_prompt.trim().is_empty() {
            return Err(RepromptError::Config("initial prompt is empty".into()));
        }
        if self.config.max_iterations == 0 {
            return Err(RepromptError::Config("max_iterations must be positive".into()));
        }

        let max = self.config.max_iterations;
        let mut prompt = initial_prompt.to_string();
        let mut history: Vec<IterationRecord> = Vec::new();
        let mut usage = TokenUsage::default();
        let mut iteration: u32 = 0;

        self.emit(ProgressEvent::RunStart {
            max_iterations: max,
        });

        loop {
            self.emit(ProgressEvent::IterationStart {
                iteration,
                max_iterations: max,
            });
            tracing::debug!(iteration, "sending prompt to task model");

            let candidate = match self
                .client
                .generate(self.request(GenRole::Task, prompt.clone()))
                .await
            {
                Ok(completion) => {
                    usage.add(&completion.usage);
                    completion.text
                }
                Err(e) => {
                    tracing::error!(iteration, error = %e, "task generation failed");
                    return Ok(self.failed_outcome(e, history, usage));
                }
            };
            self.emit(ProgressEvent::CandidateReady {
                iteration,
                chars: candidate.chars().count(),
            });

            let evaluation = rubric.evaluate(&candidate);
            if evaluation.passed() {
                tracing::info!(iteration, "candidate accepted by rubric");
                self.emit(ProgressEvent::Complete {
                    status: RunStatus::Succeeded.to_string(),
                    iterations: iteration + 1,
                    total_tokens: usage.total(),
                });
                return Ok(RunOutcome {
                    status: RunStatus::Succeeded,
                    output: Some(candidate),
                    evaluation: Some(evaluation),
                    iterations: iteration + 1,
                    history,
                    usage,
                });
            }

            tracing::debug!(iteration, failed = ?evaluation.failed, "rubric checks failed");
            self.emit(ProgressEvent::ChecksFailed {
                iteration,
                failed: evaluation.failed.clone(),
            });
            history.push(IterationRecord {
                iteration,
                prompt: prompt.clone(),
                evaluation: evaluation.clone(),
            });

            if iteration + 1 >= max {
                // Budget spent: report the last candidate rather than
                // silently succeeding.
                tracing::warn!(iterations = max, "iteration budget exhausted");
                self.emit(ProgressEvent::Complete {
                    status: RunStatus::Exhausted.to_string(),
                    iterations: iteration + 1,
                    total_tokens: usage.total(),
                });
                return Ok(RunOutcome {
                    status: RunStatus::Exhausted,
                    output: Some(candidate),
                    evaluation: Some(evaluation),
                    iterations: iteration + 1,
                    history,
                    usage,
                });
            }

            let rewrite = self
                .meta_template
                .render(&prompt, &candidate, &evaluation.failed)?;
            prompt = match self
                .client
                .generate(self.request(GenRole::Meta, rewrite))
                .await
            {
                Ok(completion) => {
                    usage.add(&completion.usage);
                    completion.text.trim().to_string()
                }
                Err(e) => {
                    tracing::error!(iteration, error = %e, "meta rewrite failed");
                    return Ok(self.failed_outcome(e, history, usage));
                }
            };
            self.emit(ProgressEvent::PromptRewritten { iteration });
            iteration += 1;
        }
    }

    /// Terminal outcome for a service failure. Iterations count completed
    /// Task generations, which at this point equals the history length.
    fn failed_outcome(
        &self,
        error: GenerationError,
        history: Vec<IterationRecord>,
        usage: TokenUsage,
    ) -> RunOutcome {
        let iterations = history.len() as u32;
        self.emit(ProgressEvent::Complete {
            status: RunStatus::Failed(error.clone()).to_string(),
            iterations,
            total_tokens: usage.total(),
        });
        RunOutcome {
            status: RunStatus::Failed(error),
            output: history.last().map(|r| r.evaluation.candidate.clone()),
            evaluation: history.last().map(|r| r.evaluation.clone()),
            iterations,
            history,
            usage,
        }
    }
}
