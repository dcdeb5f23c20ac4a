//! Rule repository: the two-tier rule layout loaded into an immutable index.
//!
//! ```text
//! rules/
//! ├── coding-style.md          # Global, topic "coding-style"
//! ├── testing.md               # Global, topic "testing"
//! └── languages/
//!     ├── rust/
//!     │   └── coding-style.md  # overrides the global coding-style for rust
//!     └── python/
//!         └── testing.md
//! ```
//!
//! Any file extension is accepted; the topic is the file stem, taken
//! verbatim. Two files whose stems collide in the same tier are rejected.

use crate::error::{Result, SteerError};
use crate::io::{read_text, require_dir, sorted_entries};
use crate::paths::{self, LANGUAGES_DIR};
use crate::types::{LanguageTag, Scope};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

// ---------------------------------------------------------------------------
// RuleDocument
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDocument {
    topic: String,
    scope: Scope,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<LanguageTag>,
    path: PathBuf,
    content: String,
}

impl RuleDocument {
    pub fn global(
        topic: impl Into<String>,
        content: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            topic: topic.into(),
            scope: Scope::Global,
            language: None,
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn language_specific(
        language: LanguageTag,
        topic: impl Into<String>,
        content: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            topic: topic.into(),
            scope: Scope::LanguageSpecific,
            language: Some(language),
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn language(&self) -> Option<&LanguageTag> {
        self.language.as_ref()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rule body, verbatim.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn key(&self) -> RuleKey<'_> {
        RuleKey {
            topic: &self.topic,
            language: self.language.as_ref(),
        }
    }
}

/// `(topic, language-or-global)`; displayed as `topic` or `lang/topic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleKey<'a> {
    pub topic: &'a str,
    pub language: Option<&'a LanguageTag>,
}

impl fmt::Display for RuleKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.language {
            Some(lang) => write!(f, "{lang}/{}", self.topic),
            None => f.write_str(self.topic),
        }
    }
}

// ---------------------------------------------------------------------------
// RuleRepository
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct TopicEntry {
    global: Option<RuleDocument>,
    languages: BTreeMap<LanguageTag, RuleDocument>,
}

/// Read-only index of rule documents keyed by `(topic, language-or-global)`.
///
/// Built once by [`RuleRepository::load`]; there is no way to add or replace
/// entries afterwards.
#[derive(Debug, Default)]
pub struct RuleRepository {
    topics: BTreeMap<String, TopicEntry>,
    len: usize,
}

impl RuleRepository {
    /// Load the rule tree rooted at `root`.
    pub fn load(root: &Path) -> Result<Self> {
        require_dir(root, "rules")?;

        let mut repo = RuleRepository::default();
        for path in sorted_entries(root)? {
            if path.is_dir() {
                if path.file_name().is_some_and(|n| n == LANGUAGES_DIR) {
                    repo.load_languages(&path)?;
                    continue;
                }
                return Err(SteerError::load(
                    &path,
                    format!("unexpected directory; only '{LANGUAGES_DIR}/' may appear under the rules root"),
                ));
            }
            let topic = topic_of(&path)?;
            let content = read_text(&path)?;
            repo.insert(RuleDocument::global(topic, content, path))?;
        }

        debug!(path = %root.display(), count = repo.len, "loaded rule repository");
        Ok(repo)
    }

    fn load_languages(&mut self, dir: &Path) -> Result<()> {
        for lang_dir in sorted_entries(dir)? {
            if !lang_dir.is_dir() {
                return Err(SteerError::load(
                    &lang_dir,
                    format!("files under '{LANGUAGES_DIR}/' must live in a language directory"),
                ));
            }
            let name = lang_dir
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            let language = LanguageTag::new(name)
                .ok()
                .filter(|tag| tag.as_str() == name)
                .ok_or_else(|| {
                    SteerError::load(&lang_dir, "language directory name must be a lowercase slug")
                })?;

            for path in sorted_entries(&lang_dir)? {
                if path.is_dir() {
                    return Err(SteerError::load(
                        &path,
                        "language rule directories may not be nested",
                    ));
                }
                let topic = topic_of(&path)?;
                let content = read_text(&path)?;
                self.insert(RuleDocument::language_specific(
                    language.clone(),
                    topic,
                    content,
                    path,
                ))?;
            }
        }
        Ok(())
    }

    /// Build a repository from already-constructed documents, enforcing the
    /// same key uniqueness as [`RuleRepository::load`].
    pub fn from_documents(docs: impl IntoIterator<Item = RuleDocument>) -> Result<Self> {
        let mut repo = RuleRepository::default();
        for doc in docs {
            repo.insert(doc)?;
        }
        Ok(repo)
    }

    fn insert(&mut self, doc: RuleDocument) -> Result<()> {
        let entry = self.topics.entry(doc.topic.clone()).or_default();
        let slot = match &doc.language {
            Some(lang) => entry.languages.get(lang),
            None => entry.global.as_ref(),
        };
        if let Some(existing) = slot {
            return Err(SteerError::DuplicateRule {
                key: doc.key().to_string(),
                first: existing.path.clone(),
                second: doc.path,
            });
        }
        match doc.language.clone() {
            Some(lang) => {
                entry.languages.insert(lang, doc);
            }
            None => entry.global = Some(doc),
        }
        self.len += 1;
        Ok(())
    }

    /// Resolve `topics` for `language`, in request order.
    ///
    /// A language document wins over the global one for the same topic. A
    /// topic with neither is left out. With no language only global
    /// documents are considered. Repeated topics are emitted once.
    pub fn resolve<S: AsRef<str>>(
        &self,
        language: Option<&LanguageTag>,
        topics: &[S],
    ) -> Vec<&RuleDocument> {
        let mut seen = HashSet::new();
        topics
            .iter()
            .map(AsRef::as_ref)
            .filter(|topic| seen.insert(*topic))
            .filter_map(|topic| {
                let entry = self.topics.get(topic)?;
                language
                    .and_then(|lang| entry.languages.get(lang))
                    .or(entry.global.as_ref())
            })
            .collect()
    }

    /// Exact lookup, no fallback to the global document.
    pub fn get(&self, topic: &str, language: Option<&LanguageTag>) -> Option<&RuleDocument> {
        let entry = self.topics.get(topic)?;
        match language {
            Some(lang) => entry.languages.get(lang),
            None => entry.global.as_ref(),
        }
    }

    /// All documents ordered by topic, global before language overrides.
    pub fn iter(&self) -> impl Iterator<Item = &RuleDocument> {
        self.topics
            .values()
            .flat_map(|entry| entry.global.iter().chain(entry.languages.values()))
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }

    pub fn languages(&self) -> BTreeSet<&LanguageTag> {
        self.topics
            .values()
            .flat_map(|entry| entry.languages.keys())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

// ---------------------------------------------------------------------------
// Filesystem helpers
// ---------------------------------------------------------------------------

/// Topic is the file stem as written; only an unreadable name is rejected.
fn topic_of(path: &Path) -> Result<String> {
    match paths::stem(path) {
        Some(topic) if !topic.is_empty() => Ok(topic.to_string()),
        _ => Err(SteerError::load(path, "rule file name is not valid UTF-8")),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
