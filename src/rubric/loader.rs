// src/rubric/loader.rs — Rubric files (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Check, CheckKind, Rubric};
use crate::infra::errors::RepromptError;

/// On-disk rubric shape:
///
/// ```toml
/// [[check]]
/// name = "Top 3 trends"
/// any = ["top 3 trends", "top 3"]
///
/// [[check]]
/// name = "Word count"
/// min_words = 120
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RubricFile {
    #[serde(default, rename = "check")]
    checks: Vec<CheckSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CheckSpec {
    name: String,
    #[serde(default)]
    any: Vec<String>,
    #[serde(default)]
    all: Vec<String>,
    min_words: Option<usize>,
}

impl CheckSpec {
    fn into_check(self) -> Result<Check, RepromptError> {
        let conditions =
            usize::from(!self.any.is_empty()) + usize::from(!self.all.is_empty()) + usize::from(self.min_words.is_some());
        if conditions != 1 {
            return Err(RepromptError::Config(format!(
                "rubric check '{}' must set exactly one of any/all/min_words",
                self.name
            )));
        }
        let kind = if !self.any.is_empty() {
            CheckKind::ContainsAny(self.any)
        } else if !self.all.is_empty() {
            CheckKind::ContainsAll(self.all)
        } else {
            CheckKind::MinWords(self.min_words.unwrap_or(0))
        };
        Ok(Check {
            name: self.name,
            kind,
        })
    }
}

pub fn from_toml_str(content: &str) -> Result<Rubric, RepromptError> {
    let file: RubricFile = toml::from_str(content)?;
    let checks = file
        .checks
        .into_iter()
        .map(CheckSpec::into_check)
        .collect::<Result<Vec<_>, _>>()?;
    Rubric::new(checks)
}

pub fn load(path: &Path) -> Result<Rubric, RepromptError> {
    let content = std::fs::read_to_string(path)?;
    from_toml_str(&content)
}

/// Built-in rubric: the market-brief sections, with the alternate
/// phrasings each section is allowed to appear under.
pub fn builtin_default() -> Rubric {
    Rubric::new(vec![
        Check::contains_any("Top 3 trends", &["top 3 trends", "top 3"]),
        Check::contains_any("Competitor analysis", &["competitor analysis", "competitor"]),
        Check::contains_any("Actionable insight", &["actionable insight", "actionable"]),
        Check::contains_any("Sources", &["source"]),
    ])
    .expect("built-in rubric is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_default_has_four_checks() {
        let rubric = builtin_default();
        assert_eq!(rubric.len(), 4);
        let names: Vec<&str> = rubric.checks().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Top 3 trends",
                "Competitor analysis",
                "Actionable insight",
                "Sources"
            ]
        );
    }

    #[test]
    fn test_parse_rubric_toml() {
        let rubric = from_toml_str(
            r#"
[[check]]
name = "Top 3 trends"
any = ["top 3 trends", "top 3"]

[[check]]
name = "Word count"
min_words = 120

[[check]]
name = "Both halves"
all = ["summary", "detail"]
"#,
        )
        .unwrap();
        assert_eq!(rubric.len(), 3);
        assert!(matches!(
            rubric.checks()[1].kind,
            CheckKind::MinWords(120)
        ));
    }

    #[test]
    fn test_empty_file_rejected() {
        assert!(from_toml_str("").is_err());
    }

    #[test]
    fn test_check_without_condition_rejected() {
        let result = from_toml_str("[[check]]\nname = \"bare\"\n");
        assert!(matches!(result, Err(RepromptError::Config(_))));
    }

    #[test]
    fn test_check_with_two_conditions_rejected() {
        let result = from_toml_str(
            "[[check]]\nname = \"double\"\nany = [\"a\"]\nmin_words = 5\n",
        );
        assert!(matches!(result, Err(RepromptError::Config(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(matches!(
            from_toml_str("[[check]\nname = oops"),
            Err(RepromptError::Toml(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rubric.toml");
        std::fs::write(&path, "[[check]]\nname = \"Sources\"\nany = [\"source\"]\n").unwrap();
        let rubric = load(&path).unwrap();
        assert_eq!(rubric.len(), 1);
    }
}
