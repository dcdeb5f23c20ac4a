use super::load_catalog;
use crate::output::print_json;
use clap::Args;
use std::path::{Path, PathBuf};
use steer_core::{
    detect::detect_language,
    prompt::assemble_prompt,
    resolver::ResolvedRuleSet,
    types::{LanguageTag, TaskCategory, TaskSignal},
};

#[derive(Args)]
pub struct SignalArgs {
    /// Task category: writing-code, reviewing-code, testing, build-error,
    /// security, documentation, refactoring, e2e
    #[arg(long, short = 'c')]
    pub category: TaskCategory,

    /// Language tag (default: detected from the project's manifest files)
    #[arg(long, short = 'l', conflicts_with = "project")]
    pub language: Option<LanguageTag>,

    /// Project directory to detect the language from (default: workspace root)
    #[arg(long)]
    pub project: Option<PathBuf>,
}

impl SignalArgs {
    fn to_signal(&self, root: &Path) -> TaskSignal {
        let language = self
            .language
            .clone()
            .or_else(|| detect_language(self.project.as_deref().unwrap_or(root)));
        TaskSignal {
            language,
            category: self.category,
        }
    }
}

// ---------------------------------------------------------------------------
// resolve
// ---------------------------------------------------------------------------

pub fn run(root: &Path, args: &SignalArgs, json: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(root)?;
    let signal = args.to_signal(root);
    tracing::info!(
        category = %signal.category,
        language = signal.language.as_ref().map(LanguageTag::as_str).unwrap_or("-"),
        "resolving"
    );
    let set = catalog.resolve(&signal);

    if json {
        return print_json(&set);
    }
    print_resolution(&set);
    Ok(())
}

fn print_resolution(set: &ResolvedRuleSet<'_>) {
    let language = set
        .signal
        .language
        .as_ref()
        .map(LanguageTag::as_str)
        .unwrap_or("unknown");
    println!("Task:     {}", set.signal.category);
    println!("Language: {language}");

    if set.applicable_rules.is_empty() {
        println!("Rules:    none");
    } else {
        println!("Rules:");
        for (i, rule) in set.applicable_rules.iter().enumerate() {
            println!(
                "  {}. {} ({}) {}",
                i + 1,
                rule.key(),
                rule.scope(),
                rule.path().display()
            );
        }
    }

    match set.candidates.first() {
        Some(best) => println!(
            "Agent:    {} (score {}: {})",
            best.agent.name,
            best.score,
            best.matched_keywords.join(", ")
        ),
        None => println!("Agent:    none (no specialized agent for this task)"),
    }
}

// ---------------------------------------------------------------------------
// prompt
// ---------------------------------------------------------------------------

pub fn prompt(root: &Path, args: &SignalArgs, json: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(root)?;
    let signal = args.to_signal(root);
    let set = catalog.resolve(&signal);
    let payload = assemble_prompt(&set);

    if json {
        let value = serde_json::json!({
            "signal": set.signal,
            "agent": set.selected_agent.map(|a| &a.name),
            "tools": set.selected_agent.map(|a| &a.tool_capabilities),
            "model": set.selected_agent.and_then(|a| a.model.as_ref()),
            "prompt": payload,
        });
        return print_json(&value);
    }
    print!("{payload}");
    Ok(())
}
