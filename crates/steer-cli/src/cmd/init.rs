use anyhow::Context;
use std::path::Path;
use steer_core::{config::Config, io, paths};

const CODING_STYLE_MD: &str = "\
# Coding Style

- Prefer small, focused functions and files.
- Never mutate shared state in place; return new values.
- Handle every error explicitly.
";

const TESTING_MD: &str = "\
# Testing

- Write the failing test first, then the implementation.
- Keep coverage at or above 80%.
";

const SECURITY_MD: &str = "\
# Security

- No hardcoded secrets; read them from the environment.
- Validate all external input at the boundary.
";

const TDD_GUIDE_MD: &str = "\
---
name: tdd-guide
description: Test-driven development specialist. Use when writing a test, practicing tdd, or raising coverage.
tools: [\"Read\", \"Write\", \"Edit\", \"Bash\", \"Grep\"]
---

Write the test first. Run it and watch it fail. Implement the minimum to pass.
";

const CODE_REVIEWER_MD: &str = "\
---
name: code-reviewer
description: Code review specialist. Use after writing code to review quality and maintainability.
tools: [\"Read\", \"Grep\", \"Glob\", \"Bash\"]
---

Review the diff for correctness, readability and maintainability.
";

const SECURITY_REVIEWER_MD: &str = "\
---
name: security-reviewer
description: Security specialist. Use when code handles user input, auth, or any secret; flags vulnerability patterns.
tools: [\"Read\", \"Grep\", \"Glob\"]
---

Look for injection, leaked secrets and missing authorization checks.
";

/// Starter files relative to the rules and agents roots.
const RULE_FILES: &[(&str, &str)] = &[
    ("coding-style.md", CODING_STYLE_MD),
    ("testing.md", TESTING_MD),
    ("security.md", SECURITY_MD),
];

const AGENT_FILES: &[(&str, &str)] = &[
    ("tdd-guide.md", TDD_GUIDE_MD),
    ("code-reviewer.md", CODE_REVIEWER_MD),
    ("security-reviewer.md", SECURITY_REVIEWER_MD),
];

pub fn run(root: &Path) -> anyhow::Result<()> {
    println!("Initializing steer in: {}", root.display());

    // 1. steer.yaml
    let config_path = paths::config_path(root);
    let config = if config_path.exists() {
        println!("  exists:  {}", paths::CONFIG_FILE);
        Config::load(root).context("failed to load existing steer.yaml")?
    } else {
        let cfg = Config::default();
        cfg.save(root).context("failed to write steer.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
        cfg
    };

    // 2. Directory layout
    let rules_root = config.rules_root(root);
    let agents_root = config.agents_root(root);
    for dir in [paths::languages_dir(&rules_root), agents_root.clone()] {
        io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }

    // 3. Starter rules and agents, never overwriting
    for (dir, files) in [(&rules_root, RULE_FILES), (&agents_root, AGENT_FILES)] {
        for (name, content) in files {
            let path = dir.join(name);
            let rel = path.strip_prefix(root).unwrap_or(&path).display().to_string();
            if io::write_if_missing(&path, content.as_bytes())
                .with_context(|| format!("failed to write {}", path.display()))?
            {
                println!("  created: {rel}");
            } else {
                println!("  exists:  {rel}");
            }
        }
    }

    println!("\nsteer initialized.");
    println!("Next: steer resolve --category writing-code");
    Ok(())
}
