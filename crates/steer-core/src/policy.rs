use crate::types::TaskCategory;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

// ---------------------------------------------------------------------------
// CategoryPolicy
// ---------------------------------------------------------------------------

/// What a task category pulls in: rule topics (ordered) and the keywords an
/// agent's trigger text must mention to be considered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPolicy {
    pub topics: Vec<String>,
    pub keywords: Vec<String>,
}

impl CategoryPolicy {
    fn new(topics: &[&str], keywords: &[&str]) -> Self {
        Self {
            topics: topics.iter().map(|t| t.to_string()).collect(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Partial per-category override as written in `steer.yaml`. An omitted half
/// keeps the built-in value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// KeywordMatcher
// ---------------------------------------------------------------------------

/// Case-insensitive keyword anchored at a word start: `test` hits "tests"
/// and "testing" but not "latest".
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keyword: String,
    pattern: Regex,
}

impl KeywordMatcher {
    pub fn new(keyword: &str) -> Option<Self> {
        match Regex::new(&format!(r"(?i)\b{}", regex::escape(keyword))) {
            Ok(pattern) => Some(Self {
                keyword: keyword.to_string(),
                pattern,
            }),
            Err(e) => {
                warn!(keyword, error = %e, "keyword dropped from policy");
                None
            }
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

impl PartialEq for KeywordMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.keyword == other.keyword
    }
}

impl Eq for KeywordMatcher {}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Category → topics and category → keywords tables used by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Policy {
    categories: BTreeMap<TaskCategory, CategoryPolicy>,
    #[serde(skip)]
    matchers: BTreeMap<TaskCategory, Vec<KeywordMatcher>>,
}

impl Default for Policy {
    fn default() -> Self {
        use TaskCategory::*;

        let categories = [
            (
                WritingCode,
                CategoryPolicy::new(
                    &["coding-style", "patterns"],
                    &["implement", "feature", "planning", "architecture"],
                ),
            ),
            (
                ReviewingCode,
                CategoryPolicy::new(
                    &["coding-style", "security"],
                    &["review", "quality", "maintainability"],
                ),
            ),
            (
                Testing,
                CategoryPolicy::new(&["testing"], &["test", "tdd", "coverage"]),
            ),
            (
                BuildError,
                CategoryPolicy::new(&["coding-style"], &["build", "compile", "type error"]),
            ),
            (
                Security,
                CategoryPolicy::new(&["security"], &["security", "vulnerability", "secret"]),
            ),
            (
                Documentation,
                CategoryPolicy::new(&["documentation"], &["documentation", "codemap", "readme"]),
            ),
            (
                Refactoring,
                CategoryPolicy::new(
                    &["coding-style", "patterns"],
                    &["refactor", "dead code", "cleanup"],
                ),
            ),
            (
                E2e,
                CategoryPolicy::new(&["testing"], &["e2e", "end-to-end", "playwright"]),
            ),
        ];

        Self::from_categories(categories.into_iter().collect())
    }
}

impl Policy {
    fn from_categories(categories: BTreeMap<TaskCategory, CategoryPolicy>) -> Self {
        let matchers = categories
            .iter()
            .map(|(category, p)| {
                let compiled = p
                    .keywords
                    .iter()
                    .filter_map(|kw| KeywordMatcher::new(kw))
                    .collect();
                (*category, compiled)
            })
            .collect();
        Self {
            categories,
            matchers,
        }
    }

    /// Built-in tables with `overrides` applied per category.
    pub fn with_overrides(overrides: &BTreeMap<TaskCategory, CategoryOverride>) -> Self {
        let mut policy = Policy::default();
        for (category, ov) in overrides {
            let entry = policy
                .categories
                .entry(*category)
                .or_insert_with(|| CategoryPolicy::new(&[], &[]));
            if let Some(topics) = &ov.topics {
                entry.topics = topics.iter().map(|t| t.trim().to_string()).collect();
            }
            if let Some(keywords) = &ov.keywords {
                entry.keywords = normalize_keywords(keywords);
            }
        }
        Self::from_categories(policy.categories)
    }

    pub fn topics_for(&self, category: TaskCategory) -> &[String] {
        self.categories
            .get(&category)
            .map(|p| p.topics.as_slice())
            .unwrap_or(&[])
    }

    pub fn keywords_for(&self, category: TaskCategory) -> &[String] {
        self.categories
            .get(&category)
            .map(|p| p.keywords.as_slice())
            .unwrap_or(&[])
    }

    /// Compiled form of [`Policy::keywords_for`], in the same order.
    pub fn matchers_for(&self, category: TaskCategory) -> &[KeywordMatcher] {
        self.matchers
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (TaskCategory, &CategoryPolicy)> {
        self.categories.iter().map(|(c, p)| (*c, p))
    }
}

/// Lowercase, trim, drop blanks and repeats (first occurrence wins).
fn normalize_keywords(keywords: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(keywords.len());
    for kw in keywords {
        let kw = kw.trim().to_lowercase();
        if !kw.is_empty() && !out.contains(&kw) {
            out.push(kw);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
