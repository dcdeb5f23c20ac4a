use crate::output::print_json;
use std::path::Path;
use steer_core::detect::{detect_language, detect_languages};

pub fn run(root: &Path, project: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let dir = project.unwrap_or(root);
    if !dir.is_dir() {
        anyhow::bail!("project directory not found: {}", dir.display());
    }

    let language = detect_language(dir);
    let all = detect_languages(dir);

    if json {
        let value = serde_json::json!({
            "language": language,
            "detected": all,
        });
        return print_json(&value);
    }

    match (&language, all.len()) {
        (Some(lang), _) => println!("{lang}"),
        (None, 0) => println!("unknown"),
        (None, _) => {
            let tags: Vec<&str> = all.iter().map(|t| t.as_str()).collect();
            println!("unknown (polyglot: {})", tags.join(", "));
        }
    }
    Ok(())
}
