use crate::error::SteerError;
use crate::paths::is_slug;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TaskCategory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskCategory {
    WritingCode,
    ReviewingCode,
    Testing,
    BuildError,
    Security,
    Documentation,
    Refactoring,
    E2e,
}

impl TaskCategory {
    pub fn all() -> &'static [TaskCategory] {
        &[
            TaskCategory::WritingCode,
            TaskCategory::ReviewingCode,
            TaskCategory::Testing,
            TaskCategory::BuildError,
            TaskCategory::Security,
            TaskCategory::Documentation,
            TaskCategory::Refactoring,
            TaskCategory::E2e,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskCategory::WritingCode => "writing-code",
            TaskCategory::ReviewingCode => "reviewing-code",
            TaskCategory::Testing => "testing",
            TaskCategory::BuildError => "build-error",
            TaskCategory::Security => "security",
            TaskCategory::Documentation => "documentation",
            TaskCategory::Refactoring => "refactoring",
            TaskCategory::E2e => "e2e",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskCategory {
    type Err = SteerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "writing-code" | "writing_code" => Ok(TaskCategory::WritingCode),
            "reviewing-code" | "reviewing_code" => Ok(TaskCategory::ReviewingCode),
            "testing" => Ok(TaskCategory::Testing),
            "build-error" | "build_error" => Ok(TaskCategory::BuildError),
            "security" => Ok(TaskCategory::Security),
            "documentation" => Ok(TaskCategory::Documentation),
            "refactoring" => Ok(TaskCategory::Refactoring),
            "e2e" => Ok(TaskCategory::E2e),
            _ => Err(SteerError::InvalidCategory(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// LanguageTag
// ---------------------------------------------------------------------------

/// Lowercase slug naming a language, e.g. `rust` or `typescript`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageTag(String);

impl LanguageTag {
    pub fn new(tag: impl AsRef<str>) -> Result<Self, SteerError> {
        let normalized = tag.as_ref().trim().to_ascii_lowercase();
        if !is_slug(&normalized) {
            return Err(SteerError::InvalidLanguage(tag.as_ref().to_string()));
        }
        Ok(LanguageTag(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for LanguageTag {
    type Err = SteerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageTag::new(s)
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = SteerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        LanguageTag::new(s)
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.0
    }
}

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Global,
    LanguageSpecific,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Global => "global",
            Scope::LanguageSpecific => "language_specific",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TaskSignal
// ---------------------------------------------------------------------------

/// Input to a single resolution: what kind of task, in which language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSignal {
    pub language: Option<LanguageTag>,
    pub category: TaskCategory,
}

impl TaskSignal {
    pub fn new(category: TaskCategory) -> Self {
        Self {
            language: None,
            category,
        }
    }

    pub fn with_language(mut self, language: LanguageTag) -> Self {
        self.language = Some(language);
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_roundtrip() {
        for cat in TaskCategory::all() {
            let parsed: TaskCategory = cat.as_str().parse().unwrap();
            assert_eq!(parsed, *cat);
        }
    }

    #[test]
    fn category_serde_matches_as_str() {
        for cat in TaskCategory::all() {
            let yaml = serde_yaml::to_string(cat).unwrap();
            assert_eq!(yaml.trim(), cat.as_str());
        }
    }

    #[test]
    fn category_accepts_snake_case_alias() {
        let cat: TaskCategory = "build_error".parse().unwrap();
        assert_eq!(cat, TaskCategory::BuildError);
    }

    #[test]
    fn unknown_category_rejected() {
        let err = "deploying".parse::<TaskCategory>().unwrap_err();
        assert!(matches!(err, SteerError::InvalidCategory(s) if s == "deploying"));
    }

    #[test]
    fn language_tag_normalizes_case() {
        let tag = LanguageTag::new("Rust").unwrap();
        assert_eq!(tag.as_str(), "rust");
    }

    #[test]
    fn language_tag_rejects_non_slug() {
        for bad in ["", "c++", "type script", "-go"] {
            assert!(LanguageTag::new(bad).is_err(), "expected invalid: {bad}");
        }
    }

    #[test]
    fn language_tag_deserialize_validates() {
        let ok: LanguageTag = serde_yaml::from_str("python").unwrap();
        assert_eq!(ok.as_str(), "python");
        assert!(serde_yaml::from_str::<LanguageTag>("not valid").is_err());
    }
}
