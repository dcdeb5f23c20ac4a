use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = "steer.yaml";
pub const DEFAULT_RULES_DIR: &str = "rules";
pub const DEFAULT_AGENTS_DIR: &str = "agents";

/// Subdirectory of the rules root holding `<lang>/<topic>` overrides.
pub const LANGUAGES_DIR: &str = "languages";

pub const AGENT_EXTENSION: &str = "md";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn languages_dir(rules_root: &Path) -> PathBuf {
    rules_root.join(LANGUAGES_DIR)
}

pub fn language_dir(rules_root: &Path, language: &str) -> PathBuf {
    languages_dir(rules_root).join(language)
}

/// Dotfiles and dot-directories are never part of the layout.
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

/// File stem as UTF-8, i.e. the rule topic or agent file name.
pub fn stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}

// ---------------------------------------------------------------------------
// Slug validation
// ---------------------------------------------------------------------------

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_re() -> &'static Regex {
    SLUG_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

/// Topics, language tags and agent names share one naming rule.
pub fn is_slug(s: &str) -> bool {
    !s.is_empty() && s.len() <= 64 && slug_re().is_match(s)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_slugs() {
        for slug in ["coding-style", "a", "rust", "e2e", "x1"] {
            assert!(is_slug(slug), "expected valid: {slug}");
        }
    }

    #[test]
    fn invalid_slugs() {
        for slug in [
            "",
            "-starts-with-dash",
            "ends-with-dash-",
            "has spaces",
            "UPPER",
            "a_b",
        ] {
            assert!(!is_slug(slug), "expected invalid: {slug}");
        }
    }

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/proj/rules");
        assert_eq!(
            language_dir(root, "rust"),
            PathBuf::from("/tmp/proj/rules/languages/rust")
        );
        assert_eq!(
            config_path(Path::new("/tmp/proj")),
            PathBuf::from("/tmp/proj/steer.yaml")
        );
    }

    #[test]
    fn hidden_detection() {
        assert!(is_hidden(Path::new("rules/.DS_Store")));
        assert!(!is_hidden(Path::new("rules/testing.md")));
    }
}
