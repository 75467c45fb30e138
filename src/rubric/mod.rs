// src/rubric/mod.rs — Structural output checks

pub mod loader;

use serde::{Deserialize, Serialize};

use crate::infra::errors::RepromptError;

/// A named structural check over a candidate output.
///
/// Checks are pure and total: any string input (including empty) yields a
/// pass/fail verdict, never an error.
#[derive(Debug, Clone)]
pub struct Check {
    pub name: String,
    pub kind: CheckKind,
}

#[derive(Debug, Clone)]
pub enum CheckKind {
    /// Candidate contains at least one of the phrases (case-insensitive).
    ContainsAny(Vec<String>),
    /// Candidate contains every phrase (case-insensitive).
    ContainsAll(Vec<String>),
    /// Candidate has at least this many whitespace-separated words.
    MinWords(usize),
}

impl Check {
    pub fn contains_any(name: impl Into<String>, phrases: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind: CheckKind::ContainsAny(phrases.iter().map(|p| p.to_string()).collect()),
        }
    }

    pub fn passes(&self, candidate: &str) -> bool {
        let lower = candidate.to_lowercase();
        match &self.kind {
            CheckKind::ContainsAny(phrases) => phrases
                .iter()
                .any(|p| lower.contains(p.to_lowercase().as_str())),
            CheckKind::ContainsAll(phrases) => phrases
                .iter()
                .all(|p| lower.contains(p.to_lowercase().as_str())),
            CheckKind::MinWords(n) => candidate.split_whitespace().count() >= *n,
        }
    }
}

/// An ordered, non-empty sequence of named checks. Declaration order is the
/// order failures are reported in.
#[derive(Debug, Clone)]
pub struct Rubric {
    checks: Vec<Check>,
}

impl Rubric {
    pub fn new(checks: Vec<Check>) -> Result<Self, RepromptError> {
        if checks.is_empty() {
            return Err(RepromptError::Config("rubric has no checks".into()));
        }
        let mut seen: Vec<&str> = Vec::new();
        for check in &checks {
            if check.name.trim().is_empty() {
                return Err(RepromptError::Config("rubric check has a blank name".into()));
            }
            if seen.contains(&check.name.as_str()) {
                return Err(RepromptError::Config(format!(
                    "duplicate rubric check name '{}'",
                    check.name
                )));
            }
            match &check.kind {
                CheckKind::ContainsAny(phrases) | CheckKind::ContainsAll(phrases) => {
                    if phrases.is_empty() || phrases.iter().any(|p| p.trim().is_empty()) {
                        return Err(RepromptError::Config(format!(
                            "rubric check '{}' has an empty phrase",
                            check.name
                        )));
                    }
                }
                CheckKind::MinWords(_) => {}
            }
            seen.push(&check.name);
        }
        Ok(Self { checks })
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Apply every check to the candidate. All checks always run; failures
    /// are reported in declaration order.
    pub fn evaluate(&self, candidate: &str) -> EvaluationResult {
        let failed = self
            .checks
            .iter()
            .filter(|c| !c.passes(candidate))
            .map(|c| c.name.clone())
            .collect();
        EvaluationResult {
            candidate: candidate.to_string(),
            failed,
        }
    }
}

/// Outcome of evaluating one candidate against a rubric. Immutable once
/// produced; an empty failed list means the candidate passed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub candidate: String,
    pub failed: Vec<String>,
}

impl EvaluationResult {
    pub fn passed(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_rubric() -> Rubric {
        Rubric::new(vec![
            Check::contains_any("Top 3 trends", &["top 3 trends", "top 3"]),
            Check::contains_any("Sources", &["source"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_pass_iff_all_checks_satisfied() {
        let rubric = sample_rubric();
        let result = rubric.evaluate("Top 3 trends are... Sources: industry reports");
        assert!(result.passed());
        assert_eq!(result.failed, Vec::<String>::new());

        let result = rubric.evaluate("Top 3 trends only");
        assert!(!result.passed());
        assert_eq!(result.failed, vec!["Sources".to_string()]);
    }

    #[test]
    fn test_case_insensitive_matching() {
        let rubric = sample_rubric();
        assert!(rubric.evaluate("TOP 3 TRENDS ... SOURCE list").passed());
    }

    #[test]
    fn test_all_checks_run_failure_order_is_declaration_order() {
        let rubric = sample_rubric();
        let result = rubric.evaluate("nothing relevant");
        assert_eq!(
            result.failed,
            vec!["Top 3 trends".to_string(), "Sources".to_string()]
        );
    }

    #[test]
    fn test_deterministic_over_repeated_calls() {
        let rubric = sample_rubric();
        let a = rubric.evaluate("some candidate text");
        let b = rubric.evaluate("some candidate text");
        assert_eq!(a.failed, b.failed);
        assert_eq!(a.candidate, b.candidate);
    }

    #[test]
    fn test_total_over_empty_input() {
        let rubric = sample_rubric();
        let result = rubric.evaluate("");
        assert_eq!(result.failed.len(), 2);
        assert_eq!(result.candidate, "");
    }

    #[test]
    fn test_contains_all() {
        let check = Check {
            name: "both".into(),
            kind: CheckKind::ContainsAll(vec!["alpha".into(), "beta".into()]),
        };
        assert!(check.passes("Alpha then Beta"));
        assert!(!check.passes("alpha only"));
    }

    #[test]
    fn test_min_words() {
        let check = Check {
            name: "length".into(),
            kind: CheckKind::MinWords(3),
        };
        assert!(check.passes("one two three"));
        assert!(!check.passes("one two"));
        assert!(!check.passes(""));
    }

    #[test]
    fn test_empty_rubric_rejected() {
        assert!(Rubric::new(vec![]).is_err());
    }

    #[test]
    fn test_blank_name_rejected() {
        let result = Rubric::new(vec![Check::contains_any("  ", &["x"])]);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = Rubric::new(vec![
            Check::contains_any("Sources", &["source"]),
            Check::contains_any("Sources", &["citation"]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_phrase_list_rejected() {
        let result = Rubric::new(vec![Check {
            name: "bad".into(),
            kind: CheckKind::ContainsAny(vec![]),
        }]);
        assert!(result.is_err());
    }
}
