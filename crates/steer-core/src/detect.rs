//! Project language detection from manifest marker files.

use crate::types::LanguageTag;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// Marker files per language tag. `package.json` alone means javascript;
/// with a `tsconfig.json` alongside it is treated as typescript.
const MARKERS: &[(&str, &[&str])] = &[
    ("rust", &["Cargo.toml"]),
    ("go", &["go.mod"]),
    (
        "python",
        &["pyproject.toml", "setup.py", "requirements.txt", "Pipfile"],
    ),
    ("typescript", &["tsconfig.json"]),
    ("javascript", &["package.json"]),
    ("java", &["pom.xml", "build.gradle"]),
    ("kotlin", &["build.gradle.kts"]),
    ("swift", &["Package.swift"]),
    ("ruby", &["Gemfile"]),
    ("php", &["composer.json"]),
];

/// Every language with a marker file directly in `project_dir`, sorted.
pub fn detect_languages(project_dir: &Path) -> Vec<LanguageTag> {
    let mut found: BTreeSet<&str> = MARKERS
        .iter()
        .filter(|(_, files)| files.iter().any(|f| project_dir.join(f).is_file()))
        .map(|(lang, _)| *lang)
        .collect();

    if found.contains("typescript") {
        found.remove("javascript");
    }

    found
        .into_iter()
        .filter_map(|lang| LanguageTag::new(lang).ok())
        .collect()
}

/// The project's single language, or `None` when nothing or more than one
/// language is detected.
pub fn detect_language(project_dir: &Path) -> Option<LanguageTag> {
    let mut languages = detect_languages(project_dir);
    if languages.len() != 1 {
        debug!(
            path = %project_dir.display(),
            count = languages.len(),
            "no single project language"
        );
        return None;
    }
    languages.pop()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for f in files {
            std::fs::write(dir.path().join(f), "").unwrap();
        }
        dir
    }

    fn detected(dir: &TempDir) -> Option<String> {
        detect_language(dir.path()).map(|t| t.to_string())
    }

    #[test]
    fn single_markers() {
        for (file, lang) in [
            ("Cargo.toml", "rust"),
            ("go.mod", "go"),
            ("requirements.txt", "python"),
            ("package.json", "javascript"),
            ("pom.xml", "java"),
            ("build.gradle.kts", "kotlin"),
            ("Gemfile", "ruby"),
        ] {
            let dir = project(&[file]);
            assert_eq!(detected(&dir).as_deref(), Some(lang), "marker {file}");
        }
    }

    #[test]
    fn tsconfig_promotes_to_typescript() {
        let dir = project(&["package.json", "tsconfig.json"]);
        assert_eq!(detected(&dir).as_deref(), Some("typescript"));
    }

    #[test]
    fn several_python_markers_count_once() {
        let dir = project(&["pyproject.toml", "setup.py"]);
        assert_eq!(detected(&dir).as_deref(), Some("python"));
    }

    #[test]
    fn polyglot_is_none() {
        let dir = project(&["Cargo.toml", "package.json"]);
        assert_eq!(detected(&dir), None);
        let all: Vec<String> = detect_languages(dir.path())
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(all, ["javascript", "rust"]);
    }

    #[test]
    fn empty_project_is_none() {
        let dir = project(&[]);
        assert_eq!(detected(&dir), None);
    }

    #[test]
    fn marker_directory_does_not_count() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("go.mod")).unwrap();
        assert_eq!(detected(&dir), None);
    }
}
