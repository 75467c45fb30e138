// src/cli/run.rs — Run a refinement from the command line

use std::path::Path;
use std::sync::Arc;

use crate::core::controller::RefinementController;
use crate::core::meta_prompt::MetaPromptTemplate;
use crate::core::types::{LoopConfig, RunOutcome, RunStatus};
use crate::infra::config::Config;
use crate::infra::credentials;
use crate::infra::errors::RepromptError;
use crate::provider::gradient::GradientClient;
use crate::provider::roles::{RoleModels, DEFAULT_MODEL};
use crate::provider::GenerationClient;
use crate::rubric::loader;

/// Wire config + credential + rubric into a controller and run it.
///
/// Prints the final candidate to stdout (progress goes to stderr); the
/// caller maps the returned status to an exit code.
pub async fn run_refinement(
    initial_prompt: &str,
    config: &Config,
    task_model: Option<&str>,
    meta_model: Option<&str>,
    max_iterations: Option<u32>,
    rubric_path: Option<&str>,
    quiet: bool,
) -> Result<RunOutcome, RepromptError> {
    // Credential and rubric problems surface here, before any generation
    // call is made.
    let access_key = credentials::resolve_access_key()?;

    let rubric = match rubric_path {
        Some(path) => loader::load(Path::new(path))?,
        None => loader::builtin_default(),
    };

    let roles = RoleModels::from_config(
        DEFAULT_MODEL,
        task_model.or(config.models.task.as_deref()),
        meta_model.or(config.models.meta.as_deref()),
    );

    let mut loop_config = LoopConfig::from(&config.refine);
    if let Some(n) = max_iterations {
        loop_config.max_iterations = n;
    }

    let meta_template = match &config.meta.template {
        Some(source) => MetaPromptTemplate::new(source.clone())?,
        None => MetaPromptTemplate::default(),
    };

    let client: Arc<dyn GenerationClient> = Arc::new(GradientClient::with_base_url(
        access_key,
        config.provider.base_url.clone(),
    ));

    let mut controller = RefinementController::new(client, roles.clone(), loop_config)
        .with_profiles(config.profiles.clone())
        .with_meta_template(meta_template);
    if !quiet {
        controller = controller.with_progress(super::progress::terminal_progress());
    }

    if !quiet {
        eprintln!(
            "[run] {} | task model: {} | rubric: {} check(s)",
            preview(initial_prompt, 60),
            roles.task,
            rubric.len(),
        );
    }

    let outcome = controller.run(initial_prompt, &rubric).await?;

    match &outcome.status {
        RunStatus::Succeeded => {
            if let Some(text) = &outcome.output {
                println!("{text}");
            }
        }
        RunStatus::Exhausted => {
            // Best-effort candidate still goes to stdout so pipelines can
            // use it; the non-zero exit code signals the shortfall.
            if let Some(text) = &outcome.output {
                println!("{text}");
            }
            if !quiet {
                if let Some(eval) = &outcome.evaluation {
                    eprintln!(
                        "[warn] iteration budget exhausted; still missing: {}",
                        eval.failed.join(", "),
                    );
                }
            }
        }
        RunStatus::Failed(_) => {}
    }

    Ok(outcome)
}

/// Char-boundary-safe prompt preview for the status line.
fn preview(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{cut}…")
    }
}
