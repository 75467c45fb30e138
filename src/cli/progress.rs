// src/cli/progress.rs — Terminal progress renderer

use crate::core::types::ProgressEvent;

/// Build a progress callback that writes formatted output to stderr.
///
/// All progress output goes to stderr so stdout remains clean for the
/// final candidate text.
pub fn terminal_progress() -> impl Fn(ProgressEvent) + Send + 'static {
    move |event| eprintln!("{}", format_event(&event))
}

fn format_event(event: &ProgressEvent) -> String {
    match event {
        ProgressEvent::RunStart { max_iterations } => {
            format!("[run] budget: {} iteration(s)", max_iterations)
        }
        ProgressEvent::IterationStart {
            iteration,
            max_iterations,
        } => format!("[iter {}/{}] generating...", iteration + 1, max_iterations),
        ProgressEvent::CandidateReady { iteration, chars } => {
            format!("[iter {}] candidate ready ({} chars)", iteration + 1, chars)
        }
        ProgressEvent::ChecksFailed { iteration, failed } => format!(
            "[iter {}] failed checks: {}",
            iteration + 1,
            failed.join(", "),
        ),
        ProgressEvent::PromptRewritten { iteration } => {
            format!("[iter {}] prompt rewritten", iteration + 1)
        }
        ProgressEvent::Complete {
            status,
            iterations,
            total_tokens,
        } => format!(
            "[done] {} after {} iteration(s), {} tokens",
            status, iterations, total_tokens,
        ),
    }
}
