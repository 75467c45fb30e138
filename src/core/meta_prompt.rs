// src/core/meta_prompt.rs — Meta-role rewrite prompt

use minijinja::{context, Environment};

use crate::infra::errors::RepromptError;

/// Default rewrite instruction. Asks for ONLY an improved prompt so the
/// completion can be fed straight back into the next Task generation.
pub const DEFAULT_TEMPLATE: &str = r#"You are a prompt-writing assistant. The ORIGINAL_PROMPT and RESPONSE are below.

Produce ONLY an improved prompt (<= 120 words) that will make the task model include the missing sections. Keep it concise and preserve the user's original intent.

ORIGINAL_PROMPT:
{{ original_prompt }}

RESPONSE:
{{ response }}

MISSING_OR_INCOMPLETE_SECTIONS:
{% if failed_checks %}{{ failed_checks | join(", ") }}{% else %}none{% endif %}

Guidance:
{% for check in failed_checks %}- Ask explicitly for "{{ check }}" as its own clearly labelled section.
{% endfor %}
Return ONLY the improved prompt text (no commentary)."#;

/// Renders the prompt sent to the Meta role. The wording is configuration,
/// not contract; the one hard requirement, enforced at load, is that the
/// template interpolates every failed check name.
#[derive(Debug, Clone)]
pub struct MetaPromptTemplate {
    source: String,
}

impl MetaPromptTemplate {
    pub fn new(source: impl Into<String>) -> Result<Self, RepromptError> {
        let template = Self {
            source: source.into(),
        };
        // Probe-render: catches syntax errors and templates that would loop
        // the Meta model blind to the failure report.
        let probe = template
            .render_with("p", "r", &["__probe_check__".to_string()])
            .map_err(|e| RepromptError::Config(format!("invalid meta template: {e}")))?;
        if !probe.contains("__probe_check__") {
            return Err(RepromptError::Config(
                "meta template must interpolate failed_checks".into(),
            ));
        }
        Ok(template)
    }

    /// Deterministic for fixed inputs; failed names appear in rubric order.
    pub fn render(
        &self,
        original_prompt: &str,
        response: &str,
        failed: &[String],
    ) -> Result<String, RepromptError> {
        self.render_with(original_prompt, response, failed)
            .map_err(|e| RepromptError::Config(format!("meta template render failed: {e}")))
    }

    fn render_with(
        &self,
        original_prompt: &str,
        response: &str,
        failed: &[String],
    ) -> Result<String, minijinja::Error> {
        let env = Environment::new();
        env.render_str(
            &self.source,
            context! {
                original_prompt => original_prompt,
                response => response,
                failed_checks => failed,
            },
        )
    }
}

impl Default for MetaPromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE).expect("default meta template is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_lists_every_failed_check() {
        let template = MetaPromptTemplate::default();
        let failed = vec!["Top 3 trends".to_string(), "Sources".to_string()];
        let rendered = template
            .render("Write a market brief", "some draft", &failed)
            .unwrap();
        assert!(rendered.contains("Write a market brief"));
        assert!(rendered.contains("some draft"));
        assert!(rendered.contains("Top 3 trends"));
        assert!(rendered.contains("Sources"));
        assert!(rendered.contains("Top 3 trends, Sources"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let template = MetaPromptTemplate::default();
        let failed = vec!["Sources".to_string()];
        let a = template.render("p", "r", &failed).unwrap();
        let b = template.render("p", "r", &failed).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_template() {
        let template = MetaPromptTemplate::new(
            "Fix {{ original_prompt }}; it is missing {{ failed_checks | join(\" and \") }}.",
        )
        .unwrap();
        let rendered = template
            .render("the brief", "draft", &["A".to_string(), "B".to_string()])
            .unwrap();
        assert_eq!(rendered, "Fix the brief; it is missing A and B.");
    }

    #[test]
    fn test_template_syntax_error_rejected() {
        let result = MetaPromptTemplate::new("{{ unclosed");
        assert!(result.is_err());
    }

    #[test]
    fn test_template_without_failed_checks_rejected() {
        let result = MetaPromptTemplate::new("Improve: {{ original_prompt }}");
        assert!(result.is_err());
    }
}
