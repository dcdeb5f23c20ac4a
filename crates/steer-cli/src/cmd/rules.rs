use super::load_catalog;
use crate::output::{print_json, print_table};
use clap::Subcommand;
use std::path::Path;
use steer_core::types::LanguageTag;

#[derive(Subcommand)]
pub enum RulesSubcommand {
    /// List every rule document with its scope and source file
    List,

    /// Print the rule that applies for a topic (language override, else global)
    Show {
        /// Topic, e.g. coding-style
        topic: String,

        /// Language to resolve the topic for
        #[arg(long, short = 'l')]
        language: Option<LanguageTag>,
    },
}

pub fn run(root: &Path, subcmd: RulesSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        RulesSubcommand::List => list(root, json),
        RulesSubcommand::Show { topic, language } => show(root, &topic, language.as_ref(), json),
    }
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(root)?;
    let rules = catalog.rules();

    if json {
        let out: Vec<_> = rules
            .iter()
            .map(|r| {
                serde_json::json!({
                    "topic": r.topic(),
                    "scope": r.scope(),
                    "language": r.language(),
                    "path": r.path(),
                })
            })
            .collect();
        return print_json(&out);
    }

    if rules.is_empty() {
        println!("No rules.");
        return Ok(());
    }

    let rows = rules
        .iter()
        .map(|r| {
            vec![
                r.topic().to_string(),
                r.scope().to_string(),
                r.language().map(|l| l.to_string()).unwrap_or_else(|| "-".into()),
                r.path().display().to_string(),
            ]
        })
        .collect();
    print_table(&["TOPIC", "SCOPE", "LANGUAGE", "PATH"], rows);
    Ok(())
}

fn show(root: &Path, topic: &str, language: Option<&LanguageTag>, json: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(root)?;
    let Some(rule) = catalog.rules().resolve(language, &[topic]).pop() else {
        anyhow::bail!("no rule for topic '{topic}'");
    };

    if json {
        return print_json(rule);
    }
    print!("{}", rule.content());
    if !rule.content().ends_with('\n') {
        println!();
    }
    Ok(())
}
